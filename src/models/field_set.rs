//! 数值输入字段集合
//!
//! 保存用户的原始输入文本；聚合时非数字或越界的输入按 0 计，
//! 但保留标记，供 target 策略逐字段报错。

use tracing::warn;

use crate::models::question_type::QuestionType;

/// 单个字段的标记状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFlag {
    /// 输入合法
    Ok,
    /// 非数字输入
    NonNumeric,
    /// 超出声明范围
    OutOfRange,
}

/// 单个数值输入字段
#[derive(Debug, Clone)]
pub struct Field {
    /// 表单字段名（如 easy_2）
    pub name: String,
    /// 展示用标签（如 Easy count for 'Multiple Choice'）
    pub label: String,
    /// 声明范围下限
    pub min: i64,
    /// 声明范围上限
    pub max: i64,
    /// 原始输入文本
    pub raw: String,
}

impl Field {
    /// 聚合值：非数字或越界按 0 计
    pub fn value(&self) -> i64 {
        match self.flag() {
            FieldFlag::Ok => self.raw.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// 标记状态
    pub fn flag(&self) -> FieldFlag {
        match self.raw.trim().parse::<i64>() {
            Ok(v) if v >= self.min && v <= self.max => FieldFlag::Ok,
            Ok(_) => FieldFlag::OutOfRange,
            Err(_) => FieldFlag::NonNumeric,
        }
    }
}

/// 有序的数值输入字段集合
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建题型网格：9 种题型 × 3 个难度，每格 0..=10，默认值 "0"
    pub fn question_grid() -> Self {
        let mut fields = Vec::with_capacity(QuestionType::ALL.len() * 3);
        for (i, question_type) in QuestionType::ALL.iter().enumerate() {
            for (difficulty, cap) in [("easy", "Easy"), ("medium", "Medium"), ("difficult", "Difficult")] {
                fields.push(Field {
                    name: format!("{}_{}", difficulty, i + 1),
                    label: format!("{} count for '{}'", cap, question_type.name()),
                    min: 0,
                    max: 10,
                    raw: "0".to_string(),
                });
            }
        }
        Self { fields }
    }

    /// 写入用户输入；未知字段名只记日志不报错
    pub fn set_raw(&mut self, name: &str, raw: impl Into<String>) {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.raw = raw.into(),
            None => warn!("⚠️ 未知的输入字段: {}", name),
        }
    }

    /// 全部字段的聚合总和
    pub fn total(&self) -> i64 {
        self.fields.iter().map(Field::value).sum()
    }

    /// 按声明顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 导出表单键值对（原始文本，服务端自行校验）
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.raw.clone()))
            .collect()
    }

    /// 重置为默认值
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.raw = "0".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_grid_shape() {
        let fields = FieldSet::question_grid();
        assert_eq!(fields.len(), 27);
        let names: Vec<_> = fields.iter().map(|f| f.name.clone()).collect();
        assert_eq!(names[0], "easy_1");
        assert_eq!(names[1], "medium_1");
        assert_eq!(names[2], "difficult_1");
        assert_eq!(names[26], "difficult_9");
        assert_eq!(fields.total(), 0);
    }

    #[test]
    fn test_non_numeric_coerces_to_zero_but_flagged() {
        let mut fields = FieldSet::question_grid();
        fields.set_raw("easy_1", "abc");
        fields.set_raw("medium_1", "3");

        let easy = fields.iter().find(|f| f.name == "easy_1").unwrap();
        assert_eq!(easy.value(), 0);
        assert_eq!(easy.flag(), FieldFlag::NonNumeric);
        assert_eq!(fields.total(), 3);
    }

    #[test]
    fn test_out_of_range_coerces_to_zero_but_flagged() {
        let mut fields = FieldSet::question_grid();
        fields.set_raw("easy_1", "11");

        let easy = fields.iter().find(|f| f.name == "easy_1").unwrap();
        assert_eq!(easy.value(), 0);
        assert_eq!(easy.flag(), FieldFlag::OutOfRange);
        assert_eq!(fields.total(), 0);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut fields = FieldSet::question_grid();
        fields.set_raw("bogus_1", "5");
        assert_eq!(fields.total(), 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut fields = FieldSet::question_grid();
        fields.set_raw("easy_2", "4");
        fields.set_raw("difficult_9", "2");
        assert_eq!(fields.total(), 6);

        fields.reset();
        assert_eq!(fields.total(), 0);
        assert!(fields.iter().all(|f| f.raw == "0"));
    }
}
