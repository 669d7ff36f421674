//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：启动日志文件、构建 HTTP 客户端
//! 2. **组装**：连接 StatusClient / JobClient / 控制器 / 管理器
//! 3. **驱动**：按配置把一次题目生成流程从头跑到终态
//! 4. **结果输出**：记录最终状态与跳转目标

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::config::Config;
use crate::infrastructure::view_handle::ViewHandle;
use crate::models::event::ViewEvent;
use crate::models::job::JobState;
use crate::models::question_type::QuestionType;
use crate::orchestrator::view_manager::ViewLifecycleManager;
use crate::services::job_client::JobClient;
use crate::services::status_client::StatusClient;
use crate::services::validation::ValidationPolicy;
use crate::utils::logging;
use crate::workflow::submission_flow::JobSubmissionController;

/// 应用主结构
pub struct App {
    config: Config,
    view: ViewHandle,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        Ok(Self {
            config,
            view: ViewHandle::new(),
        })
    }

    /// 视图句柄（结果检查用）
    pub fn view(&self) -> &ViewHandle {
        &self.view
    }

    /// 运行应用主逻辑：驱动一次题目生成提交
    pub async fn run(&self) -> Result<()> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build()?;

        let status_client = Arc::new(StatusClient::new(http.clone(), &self.config.server_base_url));
        let job_client = Arc::new(JobClient::new(http, &self.config.server_base_url));

        let (events, mut inbox) = mpsc::unbounded_channel();
        let controller = JobSubmissionController::new(
            status_client,
            job_client,
            self.view.clone(),
            events.clone(),
            self.config.poll_interval(),
            self.config.redirect_delay(),
        );

        let policy = self.policy()?;
        let mut manager =
            ViewLifecycleManager::for_questions(policy, self.view.clone(), controller);

        // 视图激活 → 重置，然后按配置录入三个难度的数量并提交
        for event in self.scripted_events()? {
            events
                .send(event)
                .map_err(|e| anyhow::anyhow!("事件通道已关闭: {}", e))?;
        }

        // 单消费者事件循环：作业完成事件也从这里回流
        while let Some(event) = inbox.recv().await {
            let was_submit = matches!(event, ViewEvent::SubmitPressed);
            manager.handle_event(event).await;

            match manager.job_state() {
                JobState::Succeeded | JobState::Failed => break,
                // 提交被拒（校验未通过）：不会再有后续事件，直接收尾
                JobState::Idle if was_submit => {
                    error!("❌ 提交被拒绝: {}", manager.last_verdict().message);
                    break;
                }
                _ => {}
            }
        }

        logging::log_outcome(manager.job_state(), &self.view.snapshot(), &self.config);
        Ok(())
    }

    /// 根据配置选择校验策略
    fn policy(&self) -> Result<ValidationPolicy> {
        match self.config.validation_policy.as_str() {
            "sum" => Ok(ValidationPolicy::SumInRange {
                min: self.config.total_min,
                max: self.config.total_max,
            }),
            "target" => Ok(ValidationPolicy::TargetTotal {
                target: self.config.target_total,
            }),
            other => anyhow::bail!("未知的校验策略: {}（支持 sum / target）", other),
        }
    }

    /// 构造驱动事件序列
    fn scripted_events(&self) -> Result<Vec<ViewEvent>> {
        let question_type = QuestionType::from_name(&self.config.question_type)
            .ok_or_else(|| anyhow::anyhow!("未知的题型: {}", self.config.question_type))?;
        let index = question_type.form_index();

        info!(
            "📋 题型 '{}': easy={} medium={} difficult={}",
            question_type.name(),
            self.config.easy_count,
            self.config.medium_count,
            self.config.difficult_count
        );

        Ok(vec![
            ViewEvent::ViewShown,
            ViewEvent::FieldChanged {
                name: format!("easy_{}", index),
                raw: self.config.easy_count.to_string(),
            },
            ViewEvent::FieldChanged {
                name: format!("medium_{}", index),
                raw: self.config.medium_count.to_string(),
            },
            ViewEvent::FieldChanged {
                name: format!("difficult_{}", index),
                raw: self.config.difficult_count.to_string(),
            },
            ViewEvent::SubmitPressed,
        ])
    }
}
