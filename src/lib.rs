//! # Quiz Generate Submit
//!
//! 一个驱动服务端长任务（题目生成 / 资源上传）的客户端控制器
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（视图状态），只暴露能力
//! - `ViewHandle` - 唯一的视图状态 owner，提供展示能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `ValidationPolicy` - 输入校验能力（总和区间 / 目标总数两种策略）
//! - `StatusClient` / `JobClient` - 进度查询与作业提交能力
//! - `ProgressPoller` - 可取消的周期轮询能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `JobSubmissionController` - 状态机编排（提交 → 轮询 → 终态）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/view_manager` - 视图生命周期管理，事件分发与重置
//! - `orchestrator/app` - 应用入口，连接服务端并驱动完整流程
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ViewHandle, ViewState};
pub use models::{
    FieldSet, FileHandle, JobKind, JobPayload, JobResponse, JobState, ProgressStatus,
    QuestionType, ResourceMode, ResourceSelection, ViewEvent,
};
pub use orchestrator::{App, ViewLifecycleManager};
pub use services::{
    JobClient, JobSender, PollHandle, ProgressPoller, StatusClient, StatusSource,
    ValidationPolicy, ValidationVerdict,
};
pub use workflow::JobSubmissionController;
