//! 视图生命周期管理器 - 编排层
//!
//! 事件分发与重置的唯一入口。视图每次激活（首次加载或
//! 缓存导航返回）都必须收到 ViewShown，否则界面可能停留在
//! 早已不存在的"处理中"状态。

use tracing::{debug, info};

use crate::infrastructure::view_handle::ViewHandle;
use crate::models::event::ViewEvent;
use crate::models::field_set::FieldSet;
use crate::models::job::{JobKind, JobPayload, JobState};
use crate::models::resource::ResourceSelection;
use crate::services::job_client::JobSender;
use crate::services::status_client::StatusSource;
use crate::services::validation::{validate_resource, ValidationPolicy, ValidationVerdict};
use crate::workflow::submission_flow::JobSubmissionController;

/// 视图生命周期管理器
///
/// 持有两个工作流的输入模型（题量网格 / 资源选择），
/// 按工作流种类决定校验口径与负载构造。
pub struct ViewLifecycleManager<S: StatusSource, J: JobSender> {
    kind: JobKind,
    policy: ValidationPolicy,
    fields: FieldSet,
    resource: ResourceSelection,
    controller: JobSubmissionController<S, J>,
    view: ViewHandle,
    last_verdict: ValidationVerdict,
}

impl<S: StatusSource, J: JobSender> ViewLifecycleManager<S, J> {
    /// 创建题目生成工作流的管理器
    pub fn for_questions(
        policy: ValidationPolicy,
        view: ViewHandle,
        controller: JobSubmissionController<S, J>,
    ) -> Self {
        let mut manager = Self {
            kind: JobKind::QuestionGeneration,
            policy,
            fields: FieldSet::question_grid(),
            resource: ResourceSelection::new(),
            controller,
            view,
            last_verdict: ValidationVerdict::invalid(""),
        };
        manager.reset();
        manager
    }

    /// 创建资源上传工作流的管理器
    pub fn for_upload(view: ViewHandle, controller: JobSubmissionController<S, J>) -> Self {
        let mut manager = Self {
            kind: JobKind::ResourceUpload,
            // 上传工作流不看题量，这个策略不会被用到
            policy: ValidationPolicy::SumInRange { min: 1, max: 10 },
            fields: FieldSet::new(),
            resource: ResourceSelection::new(),
            controller,
            view,
            last_verdict: ValidationVerdict::invalid(""),
        };
        manager.reset();
        manager
    }

    /// 当前作业状态
    pub fn job_state(&self) -> JobState {
        self.controller.state()
    }

    /// 最近一次校验结论
    pub fn last_verdict(&self) -> &ValidationVerdict {
        &self.last_verdict
    }

    /// 处理一个视图事件
    pub async fn handle_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::FieldChanged { name, raw } => {
                self.fields.set_raw(&name, raw);
                self.revalidate();
            }
            ViewEvent::ModeToggled(mode) => {
                self.resource.set_mode(mode);
                self.revalidate();
            }
            ViewEvent::FileChosen(file) => {
                self.resource.choose_file(file);
                self.revalidate();
            }
            ViewEvent::UrlChanged(url) => {
                self.resource.set_url(url);
                self.revalidate();
            }
            ViewEvent::SubmitPressed => {
                let verdict = self.last_verdict.clone();
                match self.build_payload() {
                    Some(payload) => self.controller.begin_submit(payload, &verdict),
                    None => debug!("当前输入无法构造作业负载，忽略提交"),
                }
            }
            ViewEvent::ViewShown => {
                info!("🔄 视图激活，重置到初始状态");
                self.reset();
            }
            ViewEvent::JobResolved { epoch, result } => {
                self.controller.resolve(epoch, result).await;
            }
        }
    }

    /// 无条件重置
    ///
    /// 先取消在途轮询，再清空输入、恢复默认模式、重跑校验，
    /// 最后让表单可见、处理面板隐藏。这是唯一允许无条件丢弃
    /// 在途作业簿记的路径。
    pub fn reset(&mut self) {
        self.controller.reset();
        self.fields.reset();
        self.resource.reset();
        self.view.reset();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.last_verdict = match self.kind {
            JobKind::QuestionGeneration => self.policy.validate(&self.fields),
            JobKind::ResourceUpload => validate_resource(&self.resource),
        };
        self.view.apply_verdict(&self.last_verdict);
    }

    fn build_payload(&self) -> Option<JobPayload> {
        match self.kind {
            JobKind::QuestionGeneration => Some(JobPayload::Questions {
                fields: self.fields.to_form_fields(),
            }),
            JobKind::ResourceUpload => match self.resource.mode() {
                crate::models::resource::ResourceMode::File => self
                    .resource
                    .file()
                    .cloned()
                    .map(|file| JobPayload::FileUpload { file }),
                crate::models::resource::ResourceMode::ExternalUrl => {
                    Some(JobPayload::ExternalUrl {
                        url: self.resource.url().trim().to_string(),
                    })
                }
            },
        }
    }
}
