//! 原生 Web API 封装与生产装配
//!
//! 此模块提供对浏览器原生 API 的轻量级封装（会话存储、History、
//! 文档树宿主），以减小 WASM 二进制体积，并在 `boot` 中完成
//! 路由器的生产装配。

mod dom;
mod fetch;
pub mod history;
mod storage;

pub use dom::BrowserDom;
pub use fetch::PageLoader;
pub use storage::{BrowserClock, BrowserSessionStore, SessionStorage};

use std::rc::Rc;

use async_trait::async_trait;
use leptos::prelude::WriteSignal;

use crate::api::IlaApi;
use crate::auth::AuthContext;
use crate::components::progress::LoadingPhase;
use crate::error::NavResult;
use crate::nav::adapter::{Session, SessionProbe};
use crate::nav::bus::EventBus;
use crate::nav::router::Navigator;
use crate::views::PageViews;

/// 会话探测适配器
///
/// 委托外部会话协作方，并把每次探测结果同步进认证上下文，
/// UI 无需额外请求即可跟随认证状态。
pub struct SessionGateway {
    api: IlaApi,
    auth: AuthContext,
}

impl SessionGateway {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            api: IlaApi::new(),
            auth,
        }
    }
}

#[async_trait(?Send)]
impl SessionProbe for SessionGateway {
    async fn current_session(&self) -> NavResult<Option<Session>> {
        let result = self.api.current_session().await;
        if let Ok(session) = &result {
            self.auth.record_probe(session.clone());
        }
        result
    }
}

/// 生产装配后的路由器具体类型
pub type AppNavigator =
    Navigator<PageLoader, BrowserDom, SessionGateway, BrowserSessionStore, BrowserClock, PageViews>;

/// 装配生产路由器并安装历史桥接
pub fn boot(auth: AuthContext, set_phase: WriteSignal<LoadingPhase>) -> Rc<AppNavigator> {
    let bus = EventBus::new();
    let navigator = Rc::new(Navigator::new(
        PageLoader,
        BrowserDom::new(set_phase),
        SessionGateway::new(auth),
        BrowserSessionStore,
        BrowserClock,
        PageViews::new(bus.clone()),
        bus,
    ));
    history::install(navigator.clone());
    navigator
}
