//! 认证模块
//!
//! 管理认证状态的响应式镜像，与路由系统解耦：
//! 守卫的会话探测把最近一次结果同步到这里，UI 组件按需订阅。

use leptos::prelude::*;

use crate::nav::adapter::Session;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 最近一次探测到的会话（未登录为 None）
    pub session: Option<Session>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否已至少探测过一次
    pub checked_once: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 记录最近一次会话探测的结果（守卫适配器的副作用）
    pub fn record_probe(&self, session: Option<Session>) {
        self.set_state.update(|state| {
            state.is_authenticated = session.is_some();
            state.session = session;
            state.checked_once = true;
        });
    }

    /// 获取认证状态信号（供 UI 派生使用）
    #[allow(dead_code)]
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
#[allow(dead_code)]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
