//! 作业视图初始化

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;

pub(super) async fn initialize(_ctx: &ViewContext) -> NavResult<()> {
    // 作业列表的拉取与渲染属于领域协作方；到达此处即已通过认证门控
    Ok(())
}
