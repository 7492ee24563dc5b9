//! 加载进度指示器
//!
//! 分相位的进度信号：调度器经宿主接口驱动相位切换，
//! 组件负责渲染与完成后的延迟隐藏。

use std::time::Duration;

use leptos::prelude::*;

/// 进度相位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    /// 未显示
    #[default]
    Hidden,
    /// 加载中（名义首增量）
    Loading,
    /// 已完成，短暂停留后隐藏
    Done,
}

/// 顶部进度条组件
#[component]
pub fn ProgressBar(
    phase: ReadSignal<LoadingPhase>,
    set_phase: WriteSignal<LoadingPhase>,
) -> impl IntoView {
    // 完成后短暂停留再隐藏
    Effect::new(move |_| {
        if phase.get() == LoadingPhase::Done {
            set_timeout(
                move || set_phase.set(LoadingPhase::Hidden),
                Duration::from_millis(400),
            );
        }
    });

    let width = move || match phase.get() {
        LoadingPhase::Hidden => "0%",
        LoadingPhase::Loading => "20%",
        LoadingPhase::Done => "100%",
    };
    let class = move || match phase.get() {
        LoadingPhase::Hidden => "page-progress hidden",
        _ => "page-progress",
    };

    view! {
        <div class=class>
            <div class="page-progress-bar" style:width=width></div>
        </div>
    }
}
