//! ILA 前端应用
//!
//! 浏览器常驻的单页应用外壳：路径到视图的映射、视图标记的拉取与
//! 缓存、按视图初始化、认证门控与跨导航状态保持。
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `nav::route`: 路由定义（领域模型）
//! - `nav::router`: 生命周期调度器（核心引擎）
//! - `auth`: 认证状态管理
//! - `views`: 视图初始化协作方
//! - `web`: 浏览器原生 API 封装与生产装配

mod api;
mod auth;
mod components {
    pub mod progress;
}
mod config;
mod error;
mod logging;
pub mod nav;
mod views;
mod web;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::AuthContext;
use crate::components::progress::{LoadingPhase, ProgressBar};

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 探测结果就绪后输出会话标识，便于线上排查
    let auth_state = auth_ctx.state;
    Effect::new(move |_| {
        let state = auth_state.get();
        if state.checked_once {
            match &state.session {
                Some(session) => logging::info(&format!("[Auth] 当前会话: {}", session.username)),
                None => logging::info("[Auth] 当前为访客会话"),
            }
        }
    });

    // 2. 进度相位信号（调度器经宿主接口驱动）
    let (phase, set_phase) = signal(LoadingPhase::Hidden);

    // 3. 装配路由器、安装历史桥接，随后重放初始路径
    //    （入口视图可能已预渲染，首次转换会从文档树播种缓存）
    let navigator = web::boot(auth_ctx, set_phase);
    spawn_local(async move {
        let path = web::history::current_path();
        navigator.navigate(&path).await;
    });

    view! { <ProgressBar phase=phase set_phase=set_phase /> }
}
