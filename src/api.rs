use gloo_net::http::Request;
use serde::Deserialize;

use crate::config;
use crate::error::{NavError, NavResult};
use crate::nav::adapter::Session;

/// 会话接口的响应载荷
#[derive(Deserialize)]
struct SessionEnvelope {
    user: Option<Session>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IlaApi {
    pub base_url: String,
}

impl IlaApi {
    pub fn new() -> Self {
        Self {
            base_url: config::API_BASE.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 获取当前会话；未登录时返回 `None`
    pub async fn current_session(&self) -> NavResult<Option<Session>> {
        let url = self.url("/session/current");
        let res = Request::get(&url)
            .send()
            .await
            .map_err(|e| NavError::session(e.to_string()).in_op("session.fetch"))?;

        // 未登录是正常结果，不是错误
        if res.status() == 401 {
            return Ok(None);
        }
        if !res.ok() {
            return Err(NavError::session(format!("会话接口返回 {}", res.status())));
        }

        let envelope: SessionEnvelope = res
            .json()
            .await
            .map_err(|e| NavError::serialization(e.to_string()).in_op("session.parse"))?;
        Ok(envelope.user)
    }
}

impl Default for IlaApi {
    fn default() -> Self {
        Self::new()
    }
}
