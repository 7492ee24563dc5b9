//! 课程详情视图初始化
//!
//! 共享模板对所有课程结构一致；这里把深链参数写入模板占位，
//! 具体课程数据由领域协作方按 `{code, year, term}` 拉取。

use crate::error::NavResult;
use crate::nav::adapter::ViewContext;

pub(super) async fn initialize(ctx: &ViewContext) -> NavResult<()> {
    let Some(course) = &ctx.course else {
        return Ok(());
    };
    let Some(doc) = super::document() else {
        return Ok(());
    };

    if let Ok(Some(title)) = doc.query_selector(".course-title") {
        title.set_text_content(Some(&course.code.replace('_', " ")));
    }
    if let Ok(Some(meta)) = doc.query_selector(".course-meta") {
        meta.set_text_content(Some(&format!("{} · {}", course.year, course.term)));
    }
    Ok(())
}
