//! 日志初始化
//!
//! 控制台日志走 tracing，文件日志见 `utils::logging`

use tracing_subscriber::EnvFilter;

/// 初始化控制台日志
///
/// 默认级别 info，可通过 RUST_LOG 覆盖。
/// 重复调用是安全的（测试中各用例都会调用一次）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
