//! 输入校验 - 业务能力层
//!
//! 纯函数：只产出结论，不碰视图。调用方在每次字段变化和
//! 模式切换后同步调用，不做防抖（开销可以忽略，立即性避免
//! 按钮状态滞后）。

use regex::Regex;

use crate::models::field_set::{FieldFlag, FieldSet};
use crate::models::resource::{ResourceMode, ResourceSelection};

/// 校验结论
///
/// 派生数据，从不持久化；每次相关输入变化时重新计算。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    /// 是否通过
    pub valid: bool,
    /// 警告文案（通过时为空）
    pub message: String,
}

impl ValidationVerdict {
    /// 通过
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// 未通过，附带警告文案
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// 数量校验策略
///
/// 同一套输入存在两种历史口径，这里把两种都暴露为策略选项，
/// 由配置决定用哪一种。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// 总和落在闭区间 [min, max] 内即通过
    SumInRange { min: i64, max: i64 },
    /// 每个字段都在自身声明范围内，且总和恰好等于 target
    TargetTotal { target: i64 },
}

impl ValidationPolicy {
    /// 校验题量输入
    pub fn validate(&self, fields: &FieldSet) -> ValidationVerdict {
        match *self {
            ValidationPolicy::SumInRange { min, max } => {
                let total = fields.total();
                if total < min || total > max {
                    ValidationVerdict::invalid(format!(
                        "Total must be between {} and {}.",
                        min, max
                    ))
                } else {
                    ValidationVerdict::valid()
                }
            }
            ValidationPolicy::TargetTotal { target } => {
                for field in fields.iter() {
                    match field.flag() {
                        FieldFlag::Ok => {}
                        FieldFlag::NonNumeric => {
                            return ValidationVerdict::invalid(format!(
                                "{} must be a number.",
                                field.label
                            ));
                        }
                        FieldFlag::OutOfRange => {
                            return ValidationVerdict::invalid(format!(
                                "{} must be between {} and {}.",
                                field.label, field.min, field.max
                            ));
                        }
                    }
                }
                let total = fields.total();
                if total != target {
                    ValidationVerdict::invalid(format!(
                        "Total number of questions must equal {}.",
                        target
                    ))
                } else {
                    ValidationVerdict::valid()
                }
            }
        }
    }
}

/// 校验资源选择：当前激活的分支必须有值
///
/// URL 分支只要求去除首尾空白后非空，URL 是否真能解析出
/// 视频 ID 由服务端兜底（见 [`extract_video_id`]，提交时仅做诊断）。
pub fn validate_resource(selection: &ResourceSelection) -> ValidationVerdict {
    match selection.mode() {
        ResourceMode::File => {
            if selection.file().is_some() {
                ValidationVerdict::valid()
            } else {
                ValidationVerdict::invalid("Please choose a file to upload.")
            }
        }
        ResourceMode::ExternalUrl => {
            if selection.url().trim().is_empty() {
                ValidationVerdict::invalid("Please enter a video URL.")
            } else {
                ValidationVerdict::valid()
            }
        }
    }
}

/// 从视频 URL 中提取视频 ID
///
/// 支持 `watch?v=` 和 `youtu.be/` 两种形式；其余形式返回 None。
pub fn extract_video_id(url: &str) -> Option<String> {
    let patterns = [r"[?&]v=([0-9A-Za-z_-]+)", r"youtu\.be/([0-9A-Za-z_-]+)"];
    for pattern in patterns {
        let re = Regex::new(pattern).ok()?;
        if let Some(caps) = re.captures(url) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }
    None
}
