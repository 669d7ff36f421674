//! 作业相关模型：状态机状态、负载与服务端响应

use serde::Deserialize;

use crate::models::resource::FileHandle;

/// 作业失败时的兜底提示
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// 作业状态
///
/// 由 JobSubmissionController 独占持有，
/// 状态迁移是修改视图可见性的唯一合法途径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    /// 空闲（初始态，也是重置后的状态）
    #[default]
    Idle,
    /// 已触发提交（请求尚未发出）
    Submitting,
    /// 请求已发出，等待终态
    InProgress,
    /// 成功（已展示成功文案，随后跳转）
    Succeeded,
    /// 失败（表单已恢复，可重新提交）
    Failed,
}

/// 工作流种类
///
/// 两个工作流共用同一套状态机，只有文案和负载不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// 题目生成
    QuestionGeneration,
    /// 资源上传（文件 / 视频 URL）
    ResourceUpload,
}

impl JobKind {
    /// 进入处理阶段时的初始文案
    pub fn initial_message(self) -> &'static str {
        match self {
            JobKind::QuestionGeneration => "Generating questions...",
            JobKind::ResourceUpload => "Processing...",
        }
    }

    /// 成功终态文案（跳转前展示）
    pub fn success_message(self) -> &'static str {
        match self {
            JobKind::QuestionGeneration => "Questions generated successfully!",
            JobKind::ResourceUpload => "Processing completed successfully!",
        }
    }
}

/// 作业负载：一次提交携带的全部内容
#[derive(Debug, Clone)]
pub enum JobPayload {
    /// 题目生成：题型网格的原始表单值
    Questions { fields: Vec<(String, String)> },
    /// 资源上传：本地文件
    FileUpload { file: FileHandle },
    /// 资源上传：外部视频 URL
    ExternalUrl { url: String },
}

impl JobPayload {
    /// 负载所属的工作流
    pub fn kind(&self) -> JobKind {
        match self {
            JobPayload::Questions { .. } => JobKind::QuestionGeneration,
            JobPayload::FileUpload { .. } | JobPayload::ExternalUrl { .. } => {
                JobKind::ResourceUpload
            }
        }
    }
}

/// 进度查询响应
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProgressStatus {
    /// 状态文本，整体覆盖，不做合并
    pub status: String,
}

/// 作业请求响应
///
/// 服务端的校验失败（HTTP 400）会返回 `errors` 列表而没有 `error`，
/// 所有字段都按缺省容错解析。
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JobResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl JobResponse {
    /// 提取展示用的错误文案：error 优先，其次拼接 errors，最后兜底
    pub fn display_error(&self) -> String {
        if let Some(error) = &self.error {
            if !error.is_empty() {
                return error.clone();
            }
        }
        if let Some(errors) = &self.errors {
            if !errors.is_empty() {
                return errors.join(" ");
            }
        }
        FALLBACK_ERROR_MESSAGE.to_string()
    }
}
