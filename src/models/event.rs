//! 视图事件
//!
//! 所有交互都以离散事件的形式进入单一消费循环，
//! 同一事件循环内没有抢占，天然满足协作式单线程语义。

use crate::error::AppResult;
use crate::models::job::JobResponse;
use crate::models::resource::{FileHandle, ResourceMode};

/// 视图事件
#[derive(Debug)]
pub enum ViewEvent {
    /// 数值输入变化
    FieldChanged { name: String, raw: String },
    /// 资源输入模式切换
    ModeToggled(ResourceMode),
    /// 选择了文件
    FileChosen(FileHandle),
    /// URL 输入变化
    UrlChanged(String),
    /// 用户触发提交
    SubmitPressed,
    /// 视图（重新）激活：首次加载或缓存导航返回
    ViewShown,
    /// 作业请求完成（内部事件）
    ///
    /// epoch 与发起提交时的纪元比对，重置后迟到的完成事件被丢弃。
    JobResolved {
        epoch: u64,
        result: AppResult<JobResponse>,
    },
}
