//! 校历视图初始化

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;
use crate::nav::bus::{AppEvent, EventBus};

pub(super) async fn initialize(_ctx: &ViewContext, bus: &EventBus) -> NavResult<()> {
    // 日历网格的渲染属于领域协作方；刷新完成后广播领域信号，
    // 关心校历的订阅方（如时段提议）据此重新读取
    bus.publish(&AppEvent::CalendarRefreshed);
    Ok(())
}
