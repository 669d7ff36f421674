//! 视图句柄 - 基础设施层
//!
//! 持有唯一的视图状态，只暴露"展示"能力

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::services::validation::ValidationVerdict;

/// 视图状态
///
/// 表单可见性、处理面板、警告/错误文案、跳转目标都集中在这里，
/// 组件只能通过 [`ViewHandle`] 的方法修改各自声明的字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// 输入表单是否可见
    pub form_visible: bool,
    /// 处理面板是否可见
    pub processing_visible: bool,
    /// 提交按钮是否可用
    pub submit_enabled: bool,
    /// 处理面板的状态文本（最后一次写入生效）
    pub status_text: String,
    /// 校验警告是否可见
    pub warning_visible: bool,
    /// 校验警告文案
    pub warning_text: String,
    /// 错误面板是否可见
    pub error_visible: bool,
    /// 错误文案
    pub error_text: String,
    /// 成功后的跳转目标（仅成功路径写入）
    pub navigated_to: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            form_visible: true,
            processing_visible: false,
            submit_enabled: false,
            status_text: String::new(),
            warning_visible: false,
            warning_text: String::new(),
            error_visible: false,
            error_text: String::new(),
            navigated_to: None,
        }
    }
}

/// 视图句柄
///
/// 职责：
/// - 持有唯一的 ViewState 资源
/// - 暴露展示能力（显示/隐藏、文案、跳转）
/// - 不认识 FieldSet / JobState
/// - 不处理业务流程
#[derive(Clone)]
pub struct ViewHandle {
    inner: Arc<Mutex<ViewState>>,
}

impl ViewHandle {
    /// 创建新的视图句柄（初始为默认状态）
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// 获取当前状态的快照
    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    /// 进入处理阶段：隐藏表单、展示处理面板并写入初始状态文本
    pub fn enter_processing(&self, initial_message: &str) {
        let mut state = self.lock();
        state.form_visible = false;
        state.processing_visible = true;
        state.status_text = initial_message.to_string();
    }

    /// 恢复表单：表单可见、处理面板隐藏、状态文本清空
    pub fn restore_form(&self) {
        let mut state = self.lock();
        state.form_visible = true;
        state.processing_visible = false;
        state.status_text.clear();
    }

    /// 设置提交按钮可用性
    pub fn set_submit_enabled(&self, enabled: bool) {
        self.lock().submit_enabled = enabled;
    }

    /// 应用校验结论：警告可见性与提交按钮随之联动
    pub fn apply_verdict(&self, verdict: &ValidationVerdict) {
        let mut state = self.lock();
        state.warning_visible = !verdict.valid;
        state.warning_text = verdict.message.clone();
        state.submit_enabled = verdict.valid;
    }

    /// 写入状态文本
    pub fn set_status_text(&self, text: &str) {
        self.lock().status_text = text.to_string();
    }

    /// 轮询专用：仅当停止标记未置位时写入状态文本
    ///
    /// 标记检查在视图锁内完成，保证 stop 之后写入的终态文案
    /// 不会被迟到的轮询结果覆盖。
    pub fn set_status_text_unless(&self, text: &str, stopped: &AtomicBool) {
        let mut state = self.lock();
        if !stopped.load(Ordering::SeqCst) {
            state.status_text = text.to_string();
        }
    }

    /// 展示错误面板
    pub fn show_error(&self, message: &str) {
        let mut state = self.lock();
        state.error_visible = true;
        state.error_text = message.to_string();
    }

    /// 清除错误面板
    pub fn clear_error(&self) {
        let mut state = self.lock();
        state.error_visible = false;
        state.error_text.clear();
    }

    /// 执行跳转（记录跳转目标，宿主环境据此离开当前视图）
    pub fn navigate(&self, url: &str) {
        self.lock().navigated_to = Some(url.to_string());
    }

    /// 重置为初始状态
    pub fn reset(&self) {
        *self.lock() = ViewState::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState> {
        // 锁内只有字段读写，不可能 panic，poisoning 在此退化为直接取回
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ViewHandle {
    fn default() -> Self {
        Self::new()
    }
}
