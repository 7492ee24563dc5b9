//! 类型化事件总线
//!
//! 取代自由格式的自定义信号：事件种类是封闭集合，
//! 投递顺序为监听器的注册顺序。

use std::cell::RefCell;
use std::rc::Rc;

/// 应用事件（封闭集合）
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// 视图挂载完成，携带解析后的规范路径
    PageLoaded { path: String },
    /// 守卫重定向已生效，地址栏应改写为目标路径
    RedirectFollowed { from: String, to: String },
    /// 校历视图刷新完成（由校历协作方发布，核心不发布）
    CalendarRefreshed,
}

type Listener = Box<dyn Fn(&AppEvent)>;

/// 事件总线
///
/// 廉价克隆（内部共享）；投递期间不得注册新监听器。
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册监听器；按注册顺序收到事件
    pub fn subscribe(&self, f: impl Fn(&AppEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(f));
    }

    /// 向所有监听器投递事件
    pub fn publish(&self, event: &AppEvent) {
        for f in self.listeners.borrow().iter() {
            f(event);
        }
    }
}
