//! 导航服务模块 - 核心引擎
//!
//! 实现"清理 -> 守卫 -> 取缓存或拉取 -> 挂载 -> 初始化 -> 广播"的
//! 导航生命周期（状态机：Idle -> Loading -> 渲染分支 -> Idle）。
//! 所有浏览器副作用通过 `adapter` 注入；History 推入由外层桥接完成。

use std::cell::{Cell, RefCell};

use crate::config;
use crate::error::NavError;
use crate::logging;
use crate::nav::adapter::{
    Clock, DomHost, PageFetcher, SessionProbe, SessionStore, ViewContext, ViewHost,
};
use crate::nav::bus::{AppEvent, EventBus};
use crate::nav::cache::{COURSE_DETAIL_KEY, PageCache};
use crate::nav::cleanup::CleanupRegistry;
use crate::nav::route::{self, CourseRef, GatePolicy, TemplateId};
use crate::nav::state::{self, CoursesPageState};

/// 守卫重定向链的防环上限（实际链最长为 作业 -> 个人中心 -> 登录）
const MAX_REDIRECTS: usize = 4;

/// 导航状态（路由器独占所有权，仅在转换期间修改）
#[derive(Default)]
struct NavigationState {
    current_path: Option<String>,
    current_template: Option<TemplateId>,
    /// 上一次渲染是否为锁定视图（锁定视图不参与幂等短路，
    /// 登录后重访同一路径必须重新走守卫）
    locked: bool,
    /// 是否已完成过至少一次加载
    completed_once: bool,
}

/// 单次转换的出口
enum Outcome {
    Done,
    Aborted,
    Redirect(String),
}

/// 路由器门面
///
/// 泛型于宿主适配器；生产装配见 `crate::web`，测试装配见 `tests`。
/// 进程级单例，经 `Rc` 共享；并发的 `navigate` 调用会在挂起点交错，
/// 代号检查保证后完成的转换不会被先前的覆盖。
pub struct Navigator<F, D, S, K, C, V> {
    fetcher: F,
    dom: D,
    session: S,
    store: K,
    clock: C,
    views: V,
    bus: EventBus,
    cache: RefCell<PageCache>,
    cleanups: CleanupRegistry,
    nav_state: RefCell<NavigationState>,
    courses_state: RefCell<CoursesPageState>,
    /// 单调递增的导航代号；落后于当前代号的转换放弃自身的挂载结果
    generation: Cell<u64>,
}

impl<F, D, S, K, C, V> Navigator<F, D, S, K, C, V>
where
    F: PageFetcher,
    D: DomHost,
    S: SessionProbe,
    K: SessionStore,
    C: Clock,
    V: ViewHost,
{
    pub fn new(fetcher: F, dom: D, session: S, store: K, clock: C, views: V, bus: EventBus) -> Self {
        Self {
            fetcher,
            dom,
            session,
            store,
            clock,
            views,
            bus,
            cache: RefCell::new(PageCache::new()),
            cleanups: CleanupRegistry::new(),
            nav_state: RefCell::new(NavigationState::default()),
            courses_state: RefCell::new(CoursesPageState::default()),
            generation: Cell::new(0),
        }
    }

    /// 事件总线句柄（协作方订阅/发布用）
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// 注册卸载回调，下一次导航转换时执行
    pub fn register_cleanup(&self, f: impl FnOnce() -> crate::error::NavResult<()> + 'static) {
        self.cleanups.register(f);
    }

    /// 当前规范路径
    pub fn current_path(&self) -> Option<String> {
        self.nav_state.borrow().current_path.clone()
    }

    /// **核心方法：导航**
    ///
    /// 守卫产生的重定向在内部循环消化，避免异步递归。
    /// 任何失败都已在内部降级为日志，路由器永远可以继续下一次导航。
    pub async fn navigate(&self, path: &str) {
        let mut target = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            let generation = self.generation.get() + 1;
            self.generation.set(generation);

            match self.transition(&target, generation).await {
                Outcome::Redirect(next) => {
                    self.bus.publish(&AppEvent::RedirectFollowed {
                        from: target,
                        to: next.clone(),
                    });
                    target = next;
                }
                Outcome::Done | Outcome::Aborted => return,
            }
        }
        logging::error("[Router] 重定向链过长，已放弃本次导航");
        self.dom.progress_finish();
    }

    async fn transition(&self, raw_path: &str, generation: u64) -> Outcome {
        let canonical = route::extract_base_path(raw_path);

        // --- Step 1: 幂等短路 ---
        {
            let nav = self.nav_state.borrow();
            if nav.completed_once
                && !nav.locked
                && nav.current_path.as_deref() == Some(canonical.as_str())
            {
                logging::info(&format!("[Router] 已在 {}，跳过本次导航", canonical));
                return Outcome::Done;
            }
        }

        // --- Step 2: 进入加载态 ---
        self.dom.progress_begin();

        // 离开课程列表前捕获选择器状态
        if self.nav_state.borrow().current_template == Some(TemplateId::Courses) {
            self.save_courses_page_state();
        }

        // --- Step 3: 固定清理先行，随后执行注册表清理 ---
        self.dom.clear_modals();
        self.dom.set_body_flag(config::BODY_COURSE_FLAG, false);
        self.dom.recycle_fragments();
        self.cleanups.run();

        // --- Step 4: 课程详情分支（绕过路由表与缓存常规路径） ---
        if let Some(course) = route::parse_course_detail(&canonical) {
            return self.render_course_detail(canonical, course, generation).await;
        }

        // --- Step 5: 路由表解析；未命中则中止（软失败，停留在原视图） ---
        let Some(template) = route::resolve(&canonical) else {
            let err = NavError::not_found(canonical).in_op("route.resolve");
            logging::error(&format!("[Router] {}，停留在原视图", err));
            self.dom.progress_finish();
            return Outcome::Aborted;
        };

        // --- Step 6: 认证守卫 ---
        // 只有受保护路径与首页（访客布局的唯一消费方）触发会话探测
        let needs_probe = route::is_protected(&canonical) || template == TemplateId::Home;
        let authenticated = if needs_probe {
            self.probe_session().await
        } else {
            false
        };

        if route::is_protected(&canonical) && !authenticated {
            match route::gate_policy(template) {
                Some(GatePolicy::RedirectLogin) => {
                    logging::info("[Router] 未认证访问个人中心族，重定向到登录页");
                    return Outcome::Redirect("/login".to_string());
                }
                Some(GatePolicy::RedirectProfile) => {
                    // 留下原因标记，供个人中心视图给出上下文提示
                    logging::info("[Router] 未认证访问作业页，转入个人中心");
                    if !self.store.set(config::ASSIGNMENTS_GATE_KEY, "assignments") {
                        let err = NavError::storage("原因标记写入失败").in_op("gate.stash");
                        logging::warn(&format!("[Router] {}", err));
                    }
                    return Outcome::Redirect("/profile".to_string());
                }
                Some(GatePolicy::Lock) | None => {
                    return self.render_locked(canonical, template, generation).await;
                }
            }
        }

        self.render_standard(canonical, template, authenticated, generation)
            .await
    }

    // =========================================================
    // 渲染分支
    // =========================================================

    /// 常规渲染：缓存命中或拉取 -> 挂载 -> 初始化 -> 广播
    async fn render_standard(
        &self,
        canonical: String,
        template: TemplateId,
        authenticated: bool,
        generation: u64,
    ) -> Outcome {
        // --- Step 7: 缓存命中跳过网络 ---
        let cached = self.cache.borrow().get(&canonical).map(str::to_string);
        let markup = match cached {
            Some(m) => m,
            // 入口视图可能随初始文档预渲染：优先从活动文档树播种缓存
            None => match self.dom.take_inline_markup(template) {
                Some(inline) => {
                    self.cache.borrow_mut().insert(&canonical, inline.clone());
                    inline
                }
                None => match self.fetcher.fetch_view(template).await {
                    Ok(m) => {
                        self.cache.borrow_mut().insert(&canonical, m.clone());
                        m
                    }
                    Err(e) => {
                        // 视图保持原样，不回滚到空白
                        logging::error(&format!("[Router] 视图拉取失败: {}", e));
                        self.dom.progress_finish();
                        return Outcome::Aborted;
                    }
                },
            },
        };

        // 代号落后说明已有更新的导航在跑，放弃本次挂载
        if self.is_stale(generation) {
            return Outcome::Aborted;
        }
        if let Err(e) = self.dom.mount_view(&markup) {
            logging::error(&format!("[Router] 视图挂载失败: {}", e));
            self.dom.progress_finish();
            return Outcome::Aborted;
        }

        // --- Step 8: 导航控件激活态 ---
        self.dom.set_active_nav(&canonical);

        // --- Step 9: 首页的访客/已认证布局变体 ---
        if template == TemplateId::Home {
            self.dom.set_body_flag(config::BODY_GUEST_FLAG, !authenticated);
        }

        // --- Step 10: 匹配视图的初始化协作方（本次转换恰好一次） ---
        let first_visit = self.cache.borrow_mut().mark_initialized(&canonical);
        let ctx = ViewContext {
            path: canonical.clone(),
            template: Some(template),
            course: None,
            authenticated,
            first_visit,
        };
        if let Err(e) = self.views.run_view_initializer(&ctx).await {
            // 单个视图初始化失败不阻断共享初始化与进度完成
            logging::error(&format!("[Router] 视图初始化失败: {}", e));
        }
        if self.is_stale(generation) {
            return Outcome::Aborted;
        }

        // 课程列表重挂载后恢复年份/学期选择（预填充载荷优先）
        if template == TemplateId::Courses {
            self.restore_courses_page_state();
        }

        // --- Step 11: 跨视图共享初始化（总是运行） ---
        if let Err(e) = self.views.run_shared_initializer(&ctx).await {
            logging::error(&format!("[Router] 共享初始化失败: {}", e));
        }
        if self.is_stale(generation) {
            return Outcome::Aborted;
        }

        // --- Step 12: 强制重连仍在挂载中的可复用碎片 ---
        self.dom.recycle_fragments();

        // --- Step 13-14: 提交、广播、完成进度 ---
        self.commit(canonical, Some(template), false);
        Outcome::Done
    }

    /// 课程详情渲染：共享模板只拉取一次，所有课程组合复用
    async fn render_course_detail(
        &self,
        canonical: String,
        course: CourseRef,
        generation: u64,
    ) -> Outcome {
        let cached = self.cache.borrow().course_template().map(str::to_string);
        let markup = match cached {
            Some(m) => m,
            None => match self.fetcher.fetch_course_template().await {
                Ok(m) => {
                    self.cache.borrow_mut().set_course_template(m.clone());
                    m
                }
                Err(e) => {
                    logging::error(&format!("[Router] 课程模板拉取失败: {}", e));
                    self.dom.progress_finish();
                    return Outcome::Aborted;
                }
            },
        };

        if self.is_stale(generation) {
            return Outcome::Aborted;
        }
        if let Err(e) = self.dom.mount_view(&markup) {
            logging::error(&format!("[Router] 课程详情挂载失败: {}", e));
            self.dom.progress_finish();
            return Outcome::Aborted;
        }
        self.dom.set_body_flag(config::BODY_COURSE_FLAG, true);

        let first_visit = self.cache.borrow_mut().mark_initialized(COURSE_DETAIL_KEY);
        let ctx = ViewContext {
            path: canonical.clone(),
            template: None,
            course: Some(course),
            authenticated: false,
            first_visit,
        };
        if let Err(e) = self.views.run_view_initializer(&ctx).await {
            logging::error(&format!("[Router] 课程详情初始化失败: {}", e));
        }
        if self.is_stale(generation) {
            return Outcome::Aborted;
        }

        self.commit(canonical, None, false);
        Outcome::Done
    }

    /// 锁定渲染：不拉取、不缓存真实视图，不运行匹配的初始化协作方
    async fn render_locked(
        &self,
        canonical: String,
        template: TemplateId,
        generation: u64,
    ) -> Outcome {
        let markup = locked_markup(template.page_title());
        if let Err(e) = self.dom.mount_view(&markup) {
            logging::error(&format!("[Router] 锁定视图挂载失败: {}", e));
            self.dom.progress_finish();
            return Outcome::Aborted;
        }
        self.dom.set_active_nav(&canonical);

        // 共享初始化与碎片重连照常运行，跨视图协作方保持一致
        let ctx = ViewContext {
            path: canonical.clone(),
            template: Some(template),
            course: None,
            authenticated: false,
            first_visit: false,
        };
        if let Err(e) = self.views.run_shared_initializer(&ctx).await {
            logging::error(&format!("[Router] 共享初始化失败: {}", e));
        }
        if self.is_stale(generation) {
            return Outcome::Aborted;
        }
        self.dom.recycle_fragments();

        self.commit(canonical, Some(template), true);
        Outcome::Done
    }

    // =========================================================
    // 状态保持
    // =========================================================

    /// 离开课程列表前读取两个活动选择器的值
    fn save_courses_page_state(&self) {
        let year = self
            .dom
            .select_value(config::YEAR_SELECT_ID)
            .and_then(|v| v.parse().ok());
        let term = self.dom.select_value(config::TERM_SELECT_ID);
        *self.courses_state.borrow_mut() = CoursesPageState { year, term };
    }

    /// 课程列表重挂载后恢复选择器并触发一次重载
    ///
    /// 未过期的预填充载荷优先于保存的状态，留给课程列表初始化协作方
    /// 直接消费；否则与视图刚初始化出的默认值不同的保存值被强制写回，
    /// 并只派发一次 change 事件。
    fn restore_courses_page_state(&self) {
        if state::load_slot_prefilter(&self.store, &self.clock).is_some() {
            return;
        }
        let saved = self.courses_state.borrow().clone();
        if saved.is_empty() {
            return;
        }

        let mut changed = false;
        if let Some(year) = saved.year {
            let want = year.to_string();
            if self.dom.select_value(config::YEAR_SELECT_ID).as_deref() != Some(want.as_str()) {
                self.dom.set_select_value(config::YEAR_SELECT_ID, &want);
                changed = true;
            }
        }
        if let Some(term) = &saved.term {
            if self.dom.select_value(config::TERM_SELECT_ID).as_deref() != Some(term.as_str()) {
                self.dom.set_select_value(config::TERM_SELECT_ID, term);
                changed = true;
            }
        }
        if changed {
            logging::info("[Router] 恢复课程列表的年份/学期选择");
            self.dom.emit_change(config::YEAR_SELECT_ID);
        }
    }

    // =========================================================
    // 内部工具
    // =========================================================

    /// 会话探测；探测自身失败一律按未认证处理（fail closed）
    async fn probe_session(&self) -> bool {
        match self.session.current_session().await {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                logging::warn(&format!("[Router] 会话探测失败，按未认证处理: {}", e));
                false
            }
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        if self.generation.get() != generation {
            logging::info("[Router] 转换已被更新的导航取代，放弃结果");
            true
        } else {
            false
        }
    }

    /// 记录当前路径、广播"视图已挂载"、完成进度
    fn commit(&self, canonical: String, template: Option<TemplateId>, locked: bool) {
        {
            let mut nav = self.nav_state.borrow_mut();
            nav.current_path = Some(canonical.clone());
            nav.current_template = template;
            nav.locked = locked;
            nav.completed_once = true;
        }
        self.bus.publish(&AppEvent::PageLoaded { path: canonical });
        self.dom.progress_finish();
    }
}

/// 通用锁定视图标记（复用页面名称文案）
fn locked_markup(title: &str) -> String {
    format!(
        r#"<section class="locked-page">
  <h1>{title}</h1>
  <p>该页面需要登录后才能访问。</p>
  <a href="/login" data-nav="/login" class="locked-page-login">前往登录</a>
</section>"#
    )
}
