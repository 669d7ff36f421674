//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责事件分发与应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `view_manager` - 视图生命周期管理器
//! - 按到达顺序分发视图事件（单消费者循环，协作式单线程）
//! - 每次字段变化 / 模式切换后同步重跑校验
//! - 视图激活时无条件重置：取消轮询、清空输入、回到 Idle
//!
//! ### `app` - 应用入口
//! - 初始化日志文件与 HTTP 客户端
//! - 组装控制器与管理器，驱动完整的提交流程
//! - 输出最终结果
//!
//! ## 层次关系
//!
//! ```text
//! app (组装与驱动)
//!     ↓
//! view_manager (分发 ViewEvent)
//!     ↓
//! workflow::JobSubmissionController (状态机)
//!     ↓
//! services (能力层：validation / poller / clients)
//!     ↓
//! infrastructure (基础设施：ViewHandle)
//! ```

pub mod app;
pub mod view_manager;

pub use app::App;
pub use view_manager::ViewLifecycleManager;
