//! 登录视图初始化

use wasm_bindgen::JsCast;

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;

pub(super) async fn initialize(_ctx: &ViewContext) -> NavResult<()> {
    // 登录表单的提交处理属于会话协作方；这里只聚焦首个输入框
    if let Some(doc) = super::document() {
        if let Ok(Some(el)) = doc.query_selector("#login-username") {
            if let Ok(input) = el.dyn_into::<web_sys::HtmlElement>() {
                let _ = input.focus();
            }
        }
    }
    Ok(())
}
