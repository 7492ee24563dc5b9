//! History 桥接模块
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 拦截应用内导航控件、先推入规范路径再触发转换、
//! 在浏览器前进/后退时从地址栏重放导航（不再推入新记录）。

use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::nav::bus::AppEvent;
use crate::nav::route;
use crate::web::AppNavigator;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向的地址栏改写）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 安装历史桥接：点击拦截 + popstate 重放 + 重定向地址栏改写
pub fn install(navigator: Rc<AppNavigator>) {
    install_click_interception(navigator.clone());
    install_popstate_listener(navigator.clone());
    install_redirect_listener(&navigator);
}

/// 文档级委托拦截应用内导航控件的激活
///
/// 控件以 `data-nav` 声明目标路径；外部协议、新上下文与下载链接
/// 交还给浏览器默认行为。
fn install_click_interception(navigator: Rc<AppNavigator>) {
    let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        // 控件内部的子元素也可能被点中，向上找声明节点
        let Ok(Some(control)) = target.closest("[data-nav]") else {
            return;
        };
        let Some(raw) = control.get_attribute("data-nav") else {
            return;
        };
        if raw.contains("://") {
            return;
        }
        if control.get_attribute("target").as_deref() == Some("_blank") {
            return;
        }
        if control.get_attribute("download").is_some() {
            return;
        }
        ev.prevent_default();

        let canonical = route::extract_base_path(&raw);
        // 先推入历史栈，地址栏立即反映目的地
        push_history_state(&route::history_display_path(&canonical));

        let navigator = navigator.clone();
        spawn_local(async move {
            navigator.navigate(&canonical).await;
        });
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    // 泄漏闭包以保持监听器存活
    closure.forget();
}

/// 初始化浏览器后退/前进按钮监听
fn install_popstate_listener(navigator: Rc<AppNavigator>) {
    let closure = Closure::<dyn Fn()>::new(move || {
        let path = current_path();
        let navigator = navigator.clone();
        // 重放导航，不推入新的历史记录
        spawn_local(async move {
            navigator.navigate(&path).await;
        });
    });

    if let Some(window) = web_sys::window() {
        let _ =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// 守卫重定向生效后，把地址栏改写为实际落点
fn install_redirect_listener(navigator: &Rc<AppNavigator>) {
    navigator.bus().subscribe(|ev| {
        if let AppEvent::RedirectFollowed { to, .. } = ev {
            replace_history_state(&route::history_display_path(to));
        }
    });
}
