//! 个人中心视图初始化

use crate::config;
use crate::error::NavResult;
use crate::nav::adapter::ViewContext;
use crate::web::SessionStorage;

pub(super) async fn initialize(_ctx: &ViewContext) -> NavResult<()> {
    // 作业页门控留下的原因标记：给出上下文提示后移除
    if SessionStorage::get(config::ASSIGNMENTS_GATE_KEY).is_some() {
        if let Some(doc) = super::document() {
            if let Ok(Some(notice)) = doc.query_selector(".gate-notice") {
                let _ = notice.class_list().remove_1("hidden");
            }
        }
        SessionStorage::delete(config::ASSIGNMENTS_GATE_KEY);
    }
    Ok(())
}
