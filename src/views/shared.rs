//! 跨视图共享初始化
//!
//! 无论路径，每次转换都运行一次。

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;

pub(super) async fn initialize(ctx: &ViewContext) -> NavResult<()> {
    // 全局装饰（面包屑的当前路径标注）在每个视图重挂载后统一刷新
    if let Some(doc) = super::document() {
        if let Ok(Some(crumb)) = doc.query_selector("[data-current-path]") {
            let _ = crumb.set_attribute("data-current-path", &ctx.path);
        }
    }
    Ok(())
}
