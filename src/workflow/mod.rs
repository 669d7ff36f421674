//! 流程层（Workflow Layer）
//!
//! 定义"一次提交"的完整处理流程：
//! 禁用输入 → 隐藏表单 → 启动轮询 → 发出请求 → 终态处理。

pub mod submission_flow;

pub use submission_flow::JobSubmissionController;
