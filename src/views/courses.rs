//! 课程列表视图初始化
//!
//! 课程数据的检索、排序与渲染属于领域协作方；这里只负责
//! 消费"提议时段"协作方投递的预填充载荷。

use wasm_bindgen::JsCast;

use crate::config;
use crate::error::NavResult;
use crate::nav::adapter::ViewContext;
use crate::nav::state::{self, SlotPrefilterPayload};
use crate::web::{BrowserClock, BrowserSessionStore};

pub(super) async fn initialize(_ctx: &ViewContext) -> NavResult<()> {
    // 未过期的预填充载荷优先于任何已保存的选择
    if let Some(payload) = state::load_slot_prefilter(&BrowserSessionStore, &BrowserClock) {
        apply_prefilter(&payload);
    }
    Ok(())
}

/// 把预填充载荷写入选择器与时段筛选
///
/// 载荷按约定不由核心删除；有效期内的重复消费是已知语义。
fn apply_prefilter(payload: &SlotPrefilterPayload) {
    let Some(doc) = super::document() else { return };
    set_select(&doc, config::YEAR_SELECT_ID, &payload.year.to_string());
    set_select(&doc, config::TERM_SELECT_ID, &payload.term);
    if let Some(day_filter) = doc.get_element_by_id("slot-day-filter") {
        let _ = day_filter.set_attribute("data-prefill-day", &payload.day);
    }
}

fn set_select(doc: &web_sys::Document, id: &str, value: &str) {
    let Some(el) = doc.get_element_by_id(id) else { return };
    if let Ok(select) = el.dyn_into::<web_sys::HtmlSelectElement>() {
        select.set_value(value);
    }
}
