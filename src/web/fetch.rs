//! 页面标记拉取模块
//!
//! 服务端按路径返回完整 HTML 文档；拉取后在此抽取视图范围内容，
//! 缓存与挂载只处理抽取后的片段。

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::config;
use crate::error::{NavError, NavResult};
use crate::nav::adapter::PageFetcher;
use crate::nav::route::TemplateId;

/// 生产环境的页面加载器
pub struct PageLoader;

impl PageLoader {
    async fn fetch_document(path: &str) -> NavResult<String> {
        let res = Request::get(path)
            .send()
            .await
            .map_err(|e| NavError::network(e.to_string()).in_op("fetch.document"))?;

        if !res.ok() {
            return Err(
                NavError::network(format!("页面拉取返回 {}", res.status())).in_op("fetch.document")
            );
        }
        res.text()
            .await
            .map_err(|e| NavError::network(e.to_string()).in_op("fetch.text"))
    }

    /// 从完整文档中抽取视图范围内容
    fn extract_view_fragment(document_text: &str) -> NavResult<String> {
        let parser = web_sys::DomParser::new()
            .map_err(|e| NavError::dom(format!("{:?}", e)).in_op("fetch.parse"))?;
        let doc = parser
            .parse_from_string(document_text, web_sys::SupportedType::TextHtml)
            .map_err(|e| NavError::dom(format!("{:?}", e)).in_op("fetch.parse"))?;

        if let Ok(Some(root)) = doc.query_selector(config::VIEW_ROOT_SELECTOR) {
            return Ok(root.inner_html());
        }
        // 退化：文档没有标准挂载点时使用整个 body
        doc.body()
            .map(|b| b.inner_html())
            .ok_or_else(|| NavError::dom("文档缺少 body").in_op("fetch.parse"))
    }
}

#[async_trait(?Send)]
impl PageFetcher for PageLoader {
    async fn fetch_view(&self, template: TemplateId) -> NavResult<String> {
        let text = Self::fetch_document(template.source_path()).await?;
        Self::extract_view_fragment(&text)
    }

    async fn fetch_course_template(&self) -> NavResult<String> {
        let text = Self::fetch_document(config::COURSE_TEMPLATE_URL).await?;
        Self::extract_view_fragment(&text)
    }
}
