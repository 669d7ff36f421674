//! 作业提交客户端 - 业务能力层
//!
//! 一次提交对应一个 multipart 请求：题目生成带题型网格的表单值，
//! 资源上传带文件内容或视频 URL。

use std::future::Future;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::job::{JobPayload, JobResponse};
use crate::services::validation::extract_video_id;

/// 作业发送方
///
/// 流程层通过这个 trait 发出请求，测试中注入可控的假实现。
pub trait JobSender: Send + Sync + 'static {
    /// 发送一次作业请求，等待终态
    ///
    /// 约定：传输失败或响应体完全不可解析时返回 Err；
    /// 只要服务端给出了可解析的 JSON（包括 4xx/5xx 的错误体），
    /// 一律以 Ok(JobResponse) 交给流程层按 success 字段处理。
    fn submit(&self, payload: JobPayload) -> impl Future<Output = AppResult<JobResponse>> + Send;
}

/// 作业提交客户端
pub struct JobClient {
    http: reqwest::Client,
    base_url: String,
}

impl JobClient {
    /// 创建新的作业提交客户端
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, payload: &JobPayload) -> String {
        let path = match payload {
            JobPayload::Questions { .. } => "questions",
            JobPayload::FileUpload { .. } | JobPayload::ExternalUrl { .. } => "upload",
        };
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn build_form(payload: JobPayload) -> Form {
        match payload {
            JobPayload::Questions { fields } => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                form
            }
            JobPayload::FileUpload { file } => {
                info!("📤 上传文件: {}", file.file_name);
                Form::new().text("resourceType", "file").part(
                    "file",
                    Part::bytes(file.bytes).file_name(file.file_name),
                )
            }
            JobPayload::ExternalUrl { url } => {
                // 提交前的诊断：能否提取视频 ID 不影响是否提交
                match extract_video_id(&url) {
                    Some(id) => info!("📤 上传视频 URL，视频 ID: {}", id),
                    None => warn!("⚠️ 无法从 URL 提取视频 ID，交由服务端判断: {}", url),
                }
                Form::new()
                    .text("resourceType", "youtube")
                    .text("youtubeUrl", url)
            }
        }
    }
}

impl JobSender for JobClient {
    async fn submit(&self, payload: JobPayload) -> AppResult<JobResponse> {
        let endpoint = self.endpoint(&payload);
        let form = Self::build_form(payload);

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        debug!("作业响应 ({}): HTTP {} {}", endpoint, status.as_u16(), body);

        // 服务端的失败响应也带 JSON 体（400 校验失败 / 500 兜底），
        // 先解析响应体，解析不出来再按状态码报错
        match serde_json::from_str::<JobResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => {
                Err(AppError::api_bad_status(&endpoint, status.as_u16()))
            }
            Err(e) => Err(AppError::json_parse_failed(&endpoint, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::FileHandle;

    fn client() -> JobClient {
        JobClient::new(reqwest::Client::new(), "http://127.0.0.1:5000/")
    }

    #[test]
    fn test_endpoint_per_payload() {
        let questions = JobPayload::Questions { fields: vec![] };
        let upload = JobPayload::FileUpload {
            file: FileHandle::new("notes.pdf", vec![]),
        };
        let url = JobPayload::ExternalUrl {
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        };

        assert_eq!(client().endpoint(&questions), "http://127.0.0.1:5000/questions");
        assert_eq!(client().endpoint(&upload), "http://127.0.0.1:5000/upload");
        assert_eq!(client().endpoint(&url), "http://127.0.0.1:5000/upload");
    }
}
