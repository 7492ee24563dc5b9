//! 视图初始化协作方
//!
//! 类型化查找表：模板 -> 初始化入口，取代按路径的动态模块加载。
//! 每个视图模块暴露统一的异步 `initialize(ctx)` 入口：
//! 每次访问都重新查询文档树、不保留旧引用、可恢复的状况不报错。
//! 视图的领域内部（课程数据、日历网格、评论、搜索）不属于本层。

mod assignments;
mod calendar;
mod course_detail;
mod courses;
mod home;
mod login;
mod profile;
mod shared;

use async_trait::async_trait;

use crate::error::NavResult;
use crate::nav::adapter::{ViewContext, ViewHost};
use crate::nav::bus::EventBus;
use crate::nav::route::TemplateId;

/// 获取活动文档（协作方共用）
fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// 生产视图表
pub struct PageViews {
    bus: EventBus,
}

impl PageViews {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

#[async_trait(?Send)]
impl ViewHost for PageViews {
    async fn run_view_initializer(&self, ctx: &ViewContext) -> NavResult<()> {
        if ctx.course.is_some() {
            return course_detail::initialize(ctx).await;
        }
        match ctx.template {
            Some(TemplateId::Home) => home::initialize(ctx).await,
            Some(TemplateId::Courses) => courses::initialize(ctx).await,
            Some(TemplateId::Calendar) => calendar::initialize(ctx, &self.bus).await,
            Some(TemplateId::Assignments) => assignments::initialize(ctx).await,
            Some(TemplateId::Profile) => profile::initialize(ctx).await,
            Some(TemplateId::Login) => login::initialize(ctx).await,
            None => Ok(()),
        }
    }

    async fn run_shared_initializer(&self, ctx: &ViewContext) -> NavResult<()> {
        shared::initialize(ctx).await
    }
}
