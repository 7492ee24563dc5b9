//! 首页视图初始化

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;

pub(super) async fn initialize(ctx: &ViewContext) -> NavResult<()> {
    let Some(doc) = super::document() else {
        return Ok(());
    };
    // 访客变体下突出登录入口；布局本身的切换由 body 标记完成
    if let Ok(Some(cta)) = doc.query_selector(".hero-login-cta") {
        let _ = if ctx.authenticated {
            cta.class_list().add_1("hidden")
        } else {
            cta.class_list().remove_1("hidden")
        };
    }
    Ok(())
}
