//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺资源（视图状态），只暴露能力，不认识业务流程。

pub mod view_handle;

pub use view_handle::{ViewHandle, ViewState};
