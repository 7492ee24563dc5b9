//! 宿主环境适配器接口
//!
//! 调度器核心不直接触碰浏览器 API：所有副作用通过本模块定义的
//! 适配器注入。生产实现位于 `crate::web`，测试实现位于 `router/tests.rs`。

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::NavResult;
use crate::nav::route::{CourseRef, TemplateId};

/// 当前登录会话（由外部会话协作方返回）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub username: String,
}

/// 传递给视图初始化协作方的显式上下文
///
/// 取代环境全局量：协作方需要的一切都从这里拿，
/// 且每次访问都应重新查询文档树而非保留旧引用。
#[derive(Debug, Clone)]
pub struct ViewContext {
    /// 解析后的规范路径
    pub path: String,
    /// 匹配的模板；课程详情转换时为 `None`
    pub template: Option<TemplateId>,
    /// 课程详情引用（仅课程详情转换存在）
    pub course: Option<CourseRef>,
    /// 本次转换的会话探测结果（未探测的公开视图为 `false`）
    pub authenticated: bool,
    /// 该视图是否为本会话内首次完成挂载
    pub first_visit: bool,
}

// =========================================================
// 页面拉取
// =========================================================

/// 页面标记拉取适配器
#[async_trait(?Send)]
pub trait PageFetcher {
    /// 拉取视图的源文档并抽取视图范围内的内容
    async fn fetch_view(&self, template: TemplateId) -> NavResult<String>;

    /// 拉取课程详情共享模板（结构与具体课程无关，会话内只拉一次）
    async fn fetch_course_template(&self) -> NavResult<String>;
}

// =========================================================
// 文档树宿主
// =========================================================

/// 文档树宿主适配器：挂载、固定清理与视觉状态
pub trait DomHost {
    /// 将视图标记挂载到内容根节点
    fn mount_view(&self, markup: &str) -> NavResult<()>;

    /// 一次性取出文档中预渲染的视图标记（入口视图的缓存种子）
    ///
    /// 返回 `Some` 时缓存从活动文档树播种，跳过网络拉取。
    fn take_inline_markup(&self, template: TemplateId) -> Option<String>;

    /// 固定清理：移除打开的模态浮层并清除 body 级模态标记
    fn clear_modals(&self);

    /// 断开并重连可复用视图碎片，使其内部初始化在重挂载时重跑
    fn recycle_fragments(&self);

    /// 设置/清除 body 级标记 class
    fn set_body_flag(&self, flag: &str, on: bool);

    /// 更新导航控件的激活态
    fn set_active_nav(&self, path: &str);

    /// 读取选择器当前值
    fn select_value(&self, id: &str) -> Option<String>;

    /// 静默写入选择器值（不派发事件）
    fn set_select_value(&self, id: &str, value: &str);

    /// 对选择器派发 change 事件，触发视图自身的重载监听
    fn emit_change(&self, id: &str);

    /// 进度指示器：进入加载态（名义首增量）
    fn progress_begin(&self);

    /// 进度指示器：推进到完成并在短暂延迟后隐藏
    fn progress_finish(&self);
}

// =========================================================
// 会话探测
// =========================================================

/// 会话探测适配器（外部会话协作方）
#[async_trait(?Send)]
pub trait SessionProbe {
    /// 获取当前会话；`None` 表示未登录
    ///
    /// 调度器将 `Err` 与 `None` 同等对待（fail closed）。
    async fn current_session(&self) -> NavResult<Option<Session>>;
}

// =========================================================
// 会话级存储与时钟
// =========================================================

/// 会话级键值存储（SessionStorage）
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回 `false` 表示写入失败（存储不可用等）
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 时钟适配器（毫秒级 Unix 时间，预填充载荷判龄用）
pub trait Clock {
    fn now_millis(&self) -> u64;
}

// =========================================================
// 视图初始化宿主
// =========================================================

/// 视图初始化宿主：按模板调用对应的初始化协作方
///
/// 生产实现是 `crate::views` 中的类型化查找表。
#[async_trait(?Send)]
pub trait ViewHost {
    /// 调用匹配视图的初始化入口（每次转换恰好一次）
    async fn run_view_initializer(&self, ctx: &ViewContext) -> NavResult<()>;

    /// 调用跨视图共享初始化（无论路径，总是运行）
    async fn run_shared_initializer(&self, ctx: &ViewContext) -> NavResult<()>;
}
