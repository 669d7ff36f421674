//! 进度查询客户端 - 业务能力层
//!
//! 只负责"查一次进度"能力，轮询节奏由 ProgressPoller 控制。

use std::future::Future;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::job::ProgressStatus;

/// 进度来源
///
/// 抽出 trait 是为了让轮询器和流程层不依赖具体 HTTP 客户端，
/// 测试中可注入脚本化的假实现。
pub trait StatusSource: Send + Sync + 'static {
    /// 查询一次当前进度
    fn fetch_status(&self) -> impl Future<Output = AppResult<ProgressStatus>> + Send;
}

/// 进度查询客户端
pub struct StatusClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatusClient {
    /// 创建新的进度查询客户端
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/progress", self.base_url.trim_end_matches('/'))
    }
}

impl StatusSource for StatusClient {
    async fn fetch_status(&self) -> AppResult<ProgressStatus> {
        let endpoint = self.endpoint();

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_bad_status(&endpoint, status.as_u16()));
        }

        let progress: ProgressStatus = response
            .json()
            .await
            .map_err(|e| AppError::json_parse_failed(&endpoint, e))?;

        debug!("进度查询成功: {}", progress.status);
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = StatusClient::new(reqwest::Client::new(), "http://127.0.0.1:5000/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/progress");
    }
}
