/// 日志工具模块
///
/// 提供日志文件初始化与结果输出的辅助函数
use std::fs;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::view_handle::ViewState;
use crate::models::job::JobState;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n作业提交日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .map_err(|e| AppError::file_write_failed(log_file_path, e))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目生成提交模式");
    info!("🌐 服务端: {}", config.server_base_url);
    info!("⏱️ 轮询间隔: {} ms", config.poll_interval_ms);
    info!("{}", "=".repeat(60));
}

/// 输出最终结果
pub fn log_outcome(state: JobState, view: &ViewState, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 流程结束");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match state {
        JobState::Succeeded => {
            info!("✅ 作业成功");
            if let Some(url) = &view.navigated_to {
                info!("➡️ 跳转目标: {}", url);
            }
        }
        JobState::Failed => {
            error!("❌ 作业失败: {}", truncate_text(&view.error_text, 120));
        }
        other => {
            error!("❌ 流程在非终态结束: {:?}", other);
        }
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
