//! 进度轮询器 - 业务能力层
//!
//! 可取消的周期任务：每个 tick 查询一次进度并把状态文本
//! 原样转发给视图（文本未变化也照常写入，视图对重复写幂等）。
//! 查询失败只记日志，等下一个 tick 重试——瞬时的轮询失败
//! 绝不能中断一个本来会成功的作业。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::infrastructure::view_handle::ViewHandle;
use crate::services::status_client::StatusSource;

/// 轮询句柄
///
/// 每个控制器实例同一时刻至多持有一个活动句柄。
/// `stop` 幂等：对已停止的句柄重复调用是 no-op。
#[derive(Debug)]
pub struct PollHandle {
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// 停止轮询
    ///
    /// 成功与失败两条路径都会无条件调用，重复 stop 必须安全。
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            debug!("轮询已停止，忽略重复 stop");
            return;
        }
        self.task.abort();
    }

    /// 是否已停止
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        // 句柄丢失等价于停止，不允许泄漏定时器
        self.stop();
    }
}

/// 进度轮询器
///
/// 职责：
/// - 按固定间隔查询进度并转发状态文本
/// - 自己管理生命周期（start/stop），不关心作业结局
/// - 不修改状态文本以外的任何视图字段
pub struct ProgressPoller<S: StatusSource> {
    source: Arc<S>,
    view: ViewHandle,
}

impl<S: StatusSource> ProgressPoller<S> {
    /// 创建新的进度轮询器
    pub fn new(source: Arc<S>, view: ViewHandle) -> Self {
        Self { source, view }
    }

    /// 启动轮询，返回可取消的句柄
    ///
    /// 第一次查询发生在启动后一个完整间隔处。
    pub fn start(&self, interval: Duration) -> PollHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();
        let source = self.source.clone();
        let view = self.view.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval 的第一个 tick 立即完成，跳过它
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                match source.fetch_status().await {
                    Ok(progress) => {
                        // 停止标记在视图锁内复查，迟到的写入不会覆盖终态文案
                        view.set_status_text_unless(&progress.status, &flag);
                    }
                    Err(e) => {
                        debug!("进度查询失败（忽略，等待下一次轮询）: {}", e);
                    }
                }
            }
        });

        PollHandle { stopped, task }
    }
}
