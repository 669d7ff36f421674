//! 作业提交流程 - 流程层
//!
//! 核心职责：编排一次作业的完整状态机
//!
//! 状态迁移：
//! 1. Idle → Submitting：仅当最近一次校验通过
//! 2. Submitting → InProgress：请求已发出（派生任务）
//! 3. InProgress → Succeeded：停轮询 → 成功文案 → 延迟后跳转
//! 4. InProgress → Failed：停轮询 → 恢复表单 → 展示错误，可重新提交
//! 5. 任意状态 → Idle：由视图生命周期管理器强制重置

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::infrastructure::view_handle::ViewHandle;
use crate::models::event::ViewEvent;
use crate::models::job::{JobKind, JobPayload, JobResponse, JobState};
use crate::services::job_client::JobSender;
use crate::services::progress_poller::{PollHandle, ProgressPoller};
use crate::services::status_client::StatusSource;
use crate::services::validation::ValidationVerdict;

/// 作业提交控制器
///
/// - 独占持有 JobState 与 PollHandle
/// - 同一时刻至多一个活动轮询句柄、至多一个在途请求
/// - 请求完成以 JobResolved 事件回流，纪元号挡掉重置后的迟到结果
pub struct JobSubmissionController<S: StatusSource, J: JobSender> {
    state: JobState,
    epoch: u64,
    pending_kind: Option<JobKind>,
    poller: ProgressPoller<S>,
    job_client: Arc<J>,
    view: ViewHandle,
    events: UnboundedSender<ViewEvent>,
    poll_interval: Duration,
    redirect_delay: Duration,
    poll_handle: Option<PollHandle>,
}

impl<S: StatusSource, J: JobSender> JobSubmissionController<S, J> {
    /// 创建新的作业提交控制器
    pub fn new(
        status_source: Arc<S>,
        job_client: Arc<J>,
        view: ViewHandle,
        events: UnboundedSender<ViewEvent>,
        poll_interval: Duration,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            state: JobState::Idle,
            epoch: 0,
            pending_kind: None,
            poller: ProgressPoller::new(status_source, view.clone()),
            job_client,
            view,
            events,
            poll_interval,
            redirect_delay,
            poll_handle: None,
        }
    }

    /// 当前状态
    pub fn state(&self) -> JobState {
        self.state
    }

    /// 当前纪元（测试用）
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 触发一次提交
    ///
    /// 校验未通过或已有作业在途时为惰性 no-op（提交入口在
    /// 这两种情况下本就处于禁用状态，这里是兜底）。
    pub fn begin_submit(&mut self, payload: JobPayload, verdict: &ValidationVerdict) {
        if !verdict.valid {
            debug!("校验未通过，忽略提交: {}", verdict.message);
            return;
        }
        if matches!(self.state, JobState::Submitting | JobState::InProgress) {
            warn!("⚠️ 已有作业在途，忽略重复提交");
            return;
        }

        let kind = payload.kind();
        self.epoch += 1;
        self.state = JobState::Submitting;
        self.pending_kind = Some(kind);

        info!("📤 开始提交作业 (纪元 {})", self.epoch);

        // 禁用提交、清掉上一轮的错误、进入处理面板
        self.view.set_submit_enabled(false);
        self.view.clear_error();
        self.view.enter_processing(kind.initial_message());

        // 旧句柄兜底取消后再启动新轮询
        self.stop_polling();
        self.poll_handle = Some(self.poller.start(self.poll_interval));

        // 请求在独立任务中发出，完成后以事件回流；
        // 请求本身不可取消，结局总会被送达（迟到则被纪元号丢弃）
        let client = self.job_client.clone();
        let events = self.events.clone();
        let epoch = self.epoch;
        self.state = JobState::InProgress;
        tokio::spawn(async move {
            let result = client.submit(payload).await;
            let _ = events.send(ViewEvent::JobResolved { epoch, result });
        });
    }

    /// 处理作业完成事件
    pub async fn resolve(&mut self, epoch: u64, result: AppResult<JobResponse>) {
        if epoch != self.epoch || self.state != JobState::InProgress {
            debug!("过期的作业结果 (纪元 {}，当前 {})，忽略", epoch, self.epoch);
            return;
        }

        let kind = self.pending_kind.take().unwrap_or(JobKind::QuestionGeneration);

        match result {
            Ok(response) if response.success => match response.redirect_url {
                Some(url) => self.finish_success(kind, &url).await,
                // success 但缺少跳转目标：按失败处理，不能无目标跳转
                None => self.finish_failure(response.display_error()),
            },
            Ok(response) => self.finish_failure(response.display_error()),
            Err(e) => {
                warn!("⚠️ 作业请求失败: {}", e);
                self.finish_failure(crate::models::job::FALLBACK_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// 强制重置：取消在途轮询，回到 Idle
    ///
    /// 纪元号同时递增，重置前发出的请求即使完成也不再生效。
    pub fn reset(&mut self) {
        self.stop_polling();
        self.epoch += 1;
        self.pending_kind = None;
        self.state = JobState::Idle;
    }

    /// 成功终态：停轮询 → 成功文案 → 固定延迟 → 跳转
    ///
    /// 延迟的唯一目的是让成功文案在页面卸载前可感知。
    async fn finish_success(&mut self, kind: JobKind, redirect_url: &str) {
        self.stop_polling();
        self.state = JobState::Succeeded;
        self.view.set_status_text(kind.success_message());

        tokio::time::sleep(self.redirect_delay).await;
        self.view.navigate(redirect_url);
        info!("✓ 作业成功，跳转: {}", redirect_url);
    }

    /// 失败终态：停轮询 → 清空状态文本 → 恢复表单 → 展示错误
    fn finish_failure(&mut self, message: String) {
        self.stop_polling();
        self.state = JobState::Failed;

        // restore_form 清空状态文本，进度不残留
        self.view.restore_form();
        self.view.set_submit_enabled(true);
        self.view.show_error(&message);
        warn!("⚠️ 作业失败: {}", message);
    }

    fn stop_polling(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            handle.stop();
        }
    }
}
