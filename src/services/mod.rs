//! 业务能力层（Services Layer）
//!
//! 描述"我能做什么"，不关心流程顺序。

pub mod job_client;
pub mod progress_poller;
pub mod status_client;
pub mod validation;

pub use job_client::{JobClient, JobSender};
pub use progress_poller::{PollHandle, ProgressPoller};
pub use status_client::{StatusClient, StatusSource};
pub use validation::{validate_resource, ValidationPolicy, ValidationVerdict};
