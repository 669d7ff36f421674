//! 完整流程测试
//!
//! 用可控的假 StatusSource / JobSender 驱动完整状态机，
//! 不依赖真实服务端；带 #[ignore] 的用例需要本地起服务后
//! 手动运行：cargo test -- --ignored

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use quiz_generate_submit::error::{AppError, AppResult};
use quiz_generate_submit::infrastructure::ViewHandle;
use quiz_generate_submit::logger;
use quiz_generate_submit::models::{
    FileHandle, JobPayload, JobResponse, JobState, ProgressStatus, ResourceMode, ViewEvent,
    FALLBACK_ERROR_MESSAGE,
};
use quiz_generate_submit::services::{JobSender, StatusSource, ValidationPolicy};
use quiz_generate_submit::workflow::JobSubmissionController;
use quiz_generate_submit::ViewLifecycleManager;

// ========== 测试替身 ==========

/// 每次返回递增编号状态文本的进度来源
#[derive(Default)]
struct ScriptedStatus {
    calls: AtomicUsize,
}

impl StatusSource for ScriptedStatus {
    async fn fetch_status(&self) -> AppResult<ProgressStatus> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProgressStatus {
            status: format!("step {}", n),
        })
    }
}

/// 作业请求的预设结局
enum JobBehavior {
    /// 成功并给出跳转目标
    Success { redirect_url: String },
    /// success: true 但缺少 redirect_url
    SuccessWithoutRedirect,
    /// success: false，带可选的 error / errors
    Declined {
        error: Option<String>,
        errors: Option<Vec<String>>,
    },
    /// 传输层失败
    Transport,
}

/// 可控的假作业客户端
struct FakeJob {
    behavior: JobBehavior,
    delay: Duration,
    calls: AtomicUsize,
    last_payload: Mutex<Option<JobPayload>>,
}

impl FakeJob {
    fn new(behavior: JobBehavior, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_payload(&self) -> Option<JobPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

impl JobSender for FakeJob {
    async fn submit(&self, payload: JobPayload) -> AppResult<JobResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload);
        tokio::time::sleep(self.delay).await;

        match &self.behavior {
            JobBehavior::Success { redirect_url } => Ok(JobResponse {
                success: true,
                redirect_url: Some(redirect_url.clone()),
                error: None,
                errors: None,
            }),
            JobBehavior::SuccessWithoutRedirect => Ok(JobResponse {
                success: true,
                redirect_url: None,
                error: None,
                errors: None,
            }),
            JobBehavior::Declined { error, errors } => Ok(JobResponse {
                success: false,
                redirect_url: None,
                error: error.clone(),
                errors: errors.clone(),
            }),
            JobBehavior::Transport => {
                Err(AppError::Other("connection refused".to_string()))
            }
        }
    }
}

type Manager = ViewLifecycleManager<ScriptedStatus, FakeJob>;

/// 组装题目生成工作流（轮询 10ms，跳转延迟 40ms）
fn questions_manager(
    policy: ValidationPolicy,
    job: Arc<FakeJob>,
) -> (Manager, ViewHandle, mpsc::UnboundedReceiver<ViewEvent>) {
    let view = ViewHandle::new();
    let (events, inbox) = mpsc::unbounded_channel();
    let controller = JobSubmissionController::new(
        Arc::new(ScriptedStatus::default()),
        job,
        view.clone(),
        events,
        Duration::from_millis(10),
        Duration::from_millis(40),
    );
    let manager = ViewLifecycleManager::for_questions(policy, view.clone(), controller);
    (manager, view, inbox)
}

/// 组装资源上传工作流
fn upload_manager(
    job: Arc<FakeJob>,
) -> (Manager, ViewHandle, mpsc::UnboundedReceiver<ViewEvent>) {
    let view = ViewHandle::new();
    let (events, inbox) = mpsc::unbounded_channel();
    let controller = JobSubmissionController::new(
        Arc::new(ScriptedStatus::default()),
        job,
        view.clone(),
        events,
        Duration::from_millis(10),
        Duration::from_millis(40),
    );
    let manager = ViewLifecycleManager::for_upload(view.clone(), controller);
    (manager, view, inbox)
}

async fn field(manager: &mut Manager, name: &str, raw: &str) {
    manager
        .handle_event(ViewEvent::FieldChanged {
            name: name.to_string(),
            raw: raw.to_string(),
        })
        .await;
}

// ========== 题目生成工作流 ==========

#[tokio::test]
async fn test_validation_drives_submit_enabled() {
    logger::init();
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/result/42".to_string(),
        },
        Duration::from_millis(20),
    );
    let (mut manager, view, _inbox) =
        questions_manager(ValidationPolicy::TargetTotal { target: 10 }, job);

    // 3 + 4 + 3 = 10 → 可提交
    field(&mut manager, "easy_2", "3").await;
    field(&mut manager, "medium_2", "4").await;
    field(&mut manager, "difficult_2", "3").await;
    let snap = view.snapshot();
    assert!(snap.submit_enabled);
    assert!(!snap.warning_visible);

    // difficult 改为 2：总和 9 ≠ 10 → 警告可见、按钮禁用
    field(&mut manager, "difficult_2", "2").await;
    let snap = view.snapshot();
    assert!(!snap.submit_enabled);
    assert!(snap.warning_visible);
    assert_eq!(snap.warning_text, "Total number of questions must equal 10.");
}

#[tokio::test]
async fn test_success_flow_orders_message_before_navigation() {
    logger::init();
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/result/42".to_string(),
        },
        Duration::from_millis(20),
    );
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job.clone());

    field(&mut manager, "easy_1", "2").await;
    field(&mut manager, "medium_1", "3").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;

    // 提交后立即进入处理阶段
    let snap = view.snapshot();
    assert!(!snap.form_visible);
    assert!(snap.processing_visible);
    assert!(!snap.submit_enabled);
    assert_eq!(snap.status_text, "Generating questions...");
    assert_eq!(manager.job_state(), JobState::InProgress);

    // 等待作业完成事件回流，并发采样观察顺序
    let resolved = inbox.recv().await.expect("应收到作业完成事件");

    let samples: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));
    let sampler = {
        let view = view.clone();
        let samples = samples.clone();
        tokio::spawn(async move {
            loop {
                let snap = view.snapshot();
                samples
                    .lock()
                    .unwrap()
                    .push((snap.status_text, snap.navigated_to.is_some()));
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
    };

    manager.handle_event(resolved).await;
    sampler.abort();

    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Succeeded);
    assert_eq!(snap.status_text, "Questions generated successfully!");
    assert_eq!(snap.navigated_to.as_deref(), Some("/result/42"));

    let samples = samples.lock().unwrap();
    // 成功文案先于跳转出现
    assert!(
        samples
            .iter()
            .any(|(text, navigated)| text == "Questions generated successfully!" && !navigated),
        "应存在已有成功文案但尚未跳转的采样: {:?}",
        *samples
    );
    // 任何已跳转的采样都已带着成功文案
    assert!(samples
        .iter()
        .filter(|(_, navigated)| *navigated)
        .all(|(text, _)| text == "Questions generated successfully!"));

    // 轮询已停止：成功文案不再被覆盖
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(view.snapshot().status_text, "Questions generated successfully!");
    assert_eq!(job.calls(), 1);
}

#[tokio::test]
async fn test_failure_restores_resubmittable_state() {
    logger::init();
    let job = FakeJob::new(
        JobBehavior::Declined {
            error: Some("An unexpected server error occurred.".to_string()),
            errors: None,
        },
        Duration::from_millis(10),
    );
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job.clone());

    field(&mut manager, "easy_1", "5").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Failed);
    assert!(snap.form_visible);
    assert!(!snap.processing_visible);
    assert!(snap.submit_enabled);
    assert!(snap.error_visible);
    assert_eq!(snap.error_text, "An unexpected server error occurred.");
    // 进度文本不残留
    assert!(snap.status_text.is_empty());
    assert!(snap.navigated_to.is_none());

    // Failed → Submitting：失败后可以直接重新提交
    manager.handle_event(ViewEvent::SubmitPressed).await;
    assert_eq!(manager.job_state(), JobState::InProgress);
    assert_eq!(job.calls(), 2);
    // 上一轮的错误面板已清除
    assert!(!view.snapshot().error_visible);
}

#[tokio::test]
async fn test_network_error_uses_fallback_message() {
    logger::init();
    let job = FakeJob::new(JobBehavior::Transport, Duration::from_millis(10));
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job);

    field(&mut manager, "easy_1", "1").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Failed);
    assert!(snap.form_visible);
    assert!(snap.submit_enabled);
    assert_eq!(snap.error_text, FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_server_errors_list_is_joined() {
    let job = FakeJob::new(
        JobBehavior::Declined {
            error: None,
            errors: Some(vec![
                "Easy count for 'True/False' must be between 0 and 10.".to_string(),
                "Invalid input for 'Comparison'. Please enter numeric values.".to_string(),
            ]),
        },
        Duration::from_millis(10),
    );
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job);

    field(&mut manager, "easy_1", "1").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    assert_eq!(
        view.snapshot().error_text,
        "Easy count for 'True/False' must be between 0 and 10. Invalid input for 'Comparison'. Please enter numeric values."
    );
}

#[tokio::test]
async fn test_success_without_redirect_is_failure() {
    let job = FakeJob::new(JobBehavior::SuccessWithoutRedirect, Duration::from_millis(10));
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job);

    field(&mut manager, "easy_1", "1").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Failed);
    assert!(snap.navigated_to.is_none());
    assert_eq!(snap.error_text, FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_invalid_input_makes_submit_inert() {
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/result/1".to_string(),
        },
        Duration::from_millis(10),
    );
    let (mut manager, view, _inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job.clone());

    // 全 0：总和 0，校验未通过，提交是 no-op
    manager.handle_event(ViewEvent::SubmitPressed).await;
    assert_eq!(manager.job_state(), JobState::Idle);
    assert_eq!(job.calls(), 0);
    assert!(view.snapshot().form_visible);
}

#[tokio::test]
async fn test_duplicate_submit_while_in_flight_is_ignored() {
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/result/1".to_string(),
        },
        Duration::from_millis(100),
    );
    let (mut manager, _view, _inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job.clone());

    field(&mut manager, "easy_1", "1").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    manager.handle_event(ViewEvent::SubmitPressed).await;
    manager.handle_event(ViewEvent::SubmitPressed).await;

    // 让派生的请求任务得到调度
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(job.calls(), 1);
}

#[tokio::test]
async fn test_view_reactivation_cancels_inflight_job() {
    logger::init();
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/result/42".to_string(),
        },
        Duration::from_millis(120),
    );
    let (mut manager, view, mut inbox) =
        questions_manager(ValidationPolicy::SumInRange { min: 1, max: 10 }, job);

    field(&mut manager, "easy_1", "4").await;
    manager.handle_event(ViewEvent::SubmitPressed).await;

    // 轮询已经在刷新状态文本
    tokio::time::sleep(Duration::from_millis(35)).await;
    assert!(view.snapshot().status_text.starts_with("step"));

    // 视图重新激活：无条件重置
    manager.handle_event(ViewEvent::ViewShown).await;
    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Idle);
    assert!(snap.form_visible);
    assert!(!snap.processing_visible);
    assert!(snap.status_text.is_empty());

    // 轮询已取消：状态文本不再出现
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(view.snapshot().status_text.is_empty());

    // 迟到的作业结果（旧纪元）被丢弃
    let stale = inbox.recv().await.expect("旧作业的完成事件仍会送达");
    manager.handle_event(stale).await;
    let snap = view.snapshot();
    assert_eq!(manager.job_state(), JobState::Idle);
    assert!(snap.navigated_to.is_none());
    assert!(!snap.error_visible);
    assert!(snap.form_visible);
}

// ========== 资源上传工作流 ==========

#[tokio::test]
async fn test_upload_url_validation_scenario() {
    logger::init();
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/questions".to_string(),
        },
        Duration::from_millis(10),
    );
    let (mut manager, view, mut inbox) = upload_manager(job.clone());

    // 默认文件模式且未选文件 → 不可提交
    assert!(!view.snapshot().submit_enabled);

    manager
        .handle_event(ViewEvent::ModeToggled(ResourceMode::ExternalUrl))
        .await;
    manager
        .handle_event(ViewEvent::UrlChanged("  ".to_string()))
        .await;
    assert!(!view.snapshot().submit_enabled);

    manager
        .handle_event(ViewEvent::UrlChanged("http://x".to_string()))
        .await;
    assert!(view.snapshot().submit_enabled);

    manager.handle_event(ViewEvent::SubmitPressed).await;
    assert_eq!(view.snapshot().status_text, "Processing...");

    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    let snap = view.snapshot();
    assert_eq!(snap.status_text, "Processing completed successfully!");
    assert_eq!(snap.navigated_to.as_deref(), Some("/questions"));

    match job.last_payload() {
        Some(JobPayload::ExternalUrl { url }) => assert_eq!(url, "http://x"),
        other => panic!("负载类型不对: {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_file_flow_and_mode_preservation() {
    let job = FakeJob::new(
        JobBehavior::Success {
            redirect_url: "/questions".to_string(),
        },
        Duration::from_millis(10),
    );
    let (mut manager, view, mut inbox) = upload_manager(job.clone());

    manager
        .handle_event(ViewEvent::FileChosen(FileHandle::new(
            "notes.pdf",
            b"%PDF-1.4".to_vec(),
        )))
        .await;
    assert!(view.snapshot().submit_enabled);

    // 切到 URL 再切回来：文件还在，仍可提交
    manager
        .handle_event(ViewEvent::ModeToggled(ResourceMode::ExternalUrl))
        .await;
    assert!(!view.snapshot().submit_enabled);
    manager
        .handle_event(ViewEvent::ModeToggled(ResourceMode::File))
        .await;
    assert!(view.snapshot().submit_enabled);

    manager.handle_event(ViewEvent::SubmitPressed).await;
    let resolved = inbox.recv().await.expect("应收到作业完成事件");
    manager.handle_event(resolved).await;

    assert_eq!(manager.job_state(), JobState::Succeeded);
    match job.last_payload() {
        Some(JobPayload::FileUpload { file }) => {
            assert_eq!(file.file_name, "notes.pdf");
            assert_eq!(file.bytes, b"%PDF-1.4".to_vec());
        }
        other => panic!("负载类型不对: {:?}", other),
    }
}

// ========== 真实服务端用例（需手动运行） ==========

#[tokio::test]
#[ignore] // 默认忽略，需要本地服务端：cargo test -- --ignored
async fn test_generate_questions_live() {
    logger::init();

    let config = quiz_generate_submit::Config::from_env();
    let app = quiz_generate_submit::App::initialize(config)
        .await
        .expect("初始化应用失败");

    app.run().await.expect("流程执行失败");

    let snap = app.view().snapshot();
    println!("最终状态: {:?}", snap);
    assert!(snap.navigated_to.is_some(), "应拿到跳转目标");
}

#[tokio::test]
#[ignore]
async fn test_progress_endpoint_live() {
    logger::init();

    let config = quiz_generate_submit::Config::from_env();
    let client = quiz_generate_submit::StatusClient::new(
        reqwest::Client::new(),
        &config.server_base_url,
    );

    let progress = client.fetch_status().await.expect("进度查询失败");
    println!("当前进度: {}", progress.status);
}
