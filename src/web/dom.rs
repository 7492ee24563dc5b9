//! 文档树宿主实现
//!
//! 调度器的全部 DOM 副作用集中在此：挂载、固定清理、body 标记、
//! 导航激活态、选择器读写与进度相位。

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::progress::LoadingPhase;
use crate::config;
use crate::error::{NavError, NavResult};
use crate::nav::adapter::DomHost;
use crate::nav::route::{self, TemplateId};

/// 生产环境的文档树宿主
pub struct BrowserDom {
    set_phase: WriteSignal<LoadingPhase>,
}

impl BrowserDom {
    pub fn new(set_phase: WriteSignal<LoadingPhase>) -> Self {
        Self { set_phase }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }
}

impl DomHost for BrowserDom {
    fn mount_view(&self, markup: &str) -> NavResult<()> {
        let doc = Self::document().ok_or_else(|| NavError::dom("无法获取 document"))?;
        let root = doc
            .query_selector(config::VIEW_ROOT_SELECTOR)
            .ok()
            .flatten()
            .ok_or_else(|| NavError::dom("视图挂载点缺失").in_op("dom.mount"))?;
        root.set_inner_html(markup);
        Ok(())
    }

    fn take_inline_markup(&self, template: TemplateId) -> Option<String> {
        let doc = Self::document()?;
        let body = doc.body()?;
        // 服务端预渲染入口视图时在 body 上标注模板名；标注只可取用一次
        let marker = body.get_attribute("data-prerendered")?;
        let expected = match template {
            TemplateId::Home => "home",
            TemplateId::Courses => "courses",
            _ => return None,
        };
        if marker != expected {
            return None;
        }
        let root = doc.query_selector(config::VIEW_ROOT_SELECTOR).ok().flatten()?;
        body.remove_attribute("data-prerendered").ok()?;
        Some(root.inner_html())
    }

    fn clear_modals(&self) {
        let Some(doc) = Self::document() else { return };
        if let Ok(list) = doc.query_selector_all(config::MODAL_OVERLAY_SELECTOR) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                {
                    el.remove();
                }
            }
        }
        if let Some(body) = doc.body() {
            let _ = body.class_list().remove_1(config::BODY_MODAL_FLAG);
        }
    }

    fn recycle_fragments(&self) {
        // 拆下再插回同一位置，促使碎片的 connected 回调重新执行
        let Some(doc) = Self::document() else { return };
        let Ok(list) = doc.query_selector_all(config::FRAGMENT_SELECTOR) else {
            return;
        };
        for i in 0..list.length() {
            let Some(node) = list.item(i) else { continue };
            let Some(parent) = node.parent_node() else { continue };
            let next = node.next_sibling();
            let _ = parent.remove_child(&node);
            let _ = parent.insert_before(&node, next.as_ref());
        }
    }

    fn set_body_flag(&self, flag: &str, on: bool) {
        let Some(body) = Self::document().and_then(|d| d.body()) else {
            return;
        };
        let class_list = body.class_list();
        let _ = if on {
            class_list.add_1(flag)
        } else {
            class_list.remove_1(flag)
        };
    }

    fn set_active_nav(&self, path: &str) {
        let Some(doc) = Self::document() else { return };
        let Ok(list) = doc.query_selector_all("[data-nav]") else {
            return;
        };
        for i in 0..list.length() {
            let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let target = el
                .get_attribute("data-nav")
                .map(|p| route::extract_base_path(&p));
            let _ = if target.as_deref() == Some(path) {
                el.class_list().add_1("active")
            } else {
                el.class_list().remove_1("active")
            };
        }
    }

    fn select_value(&self, id: &str) -> Option<String> {
        let el = Self::document()?.get_element_by_id(id)?;
        let select: web_sys::HtmlSelectElement = el.dyn_into().ok()?;
        Some(select.value())
    }

    fn set_select_value(&self, id: &str, value: &str) {
        let Some(el) = Self::document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        if let Ok(select) = el.dyn_into::<web_sys::HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn emit_change(&self, id: &str) {
        let Some(el) = Self::document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        if let Ok(event) = web_sys::Event::new("change") {
            let _ = el.dispatch_event(&event);
        }
    }

    fn progress_begin(&self) {
        self.set_phase.set(LoadingPhase::Loading);
    }

    fn progress_finish(&self) {
        self.set_phase.set(LoadingPhase::Done);
    }
}
