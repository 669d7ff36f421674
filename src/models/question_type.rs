use phf::phf_map;

/// 题型枚举
///
/// 与服务端题型目录一一对应，顺序即表单字段顺序（easy_1 … difficult_9）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    /// 判断题
    TrueFalse,
    /// 选择题
    MultipleChoice,
    /// 填空题
    FillInTheBlank,
    /// 情景题
    ScenarioBased,
    /// 对比题
    Comparison,
    /// 因果题
    CauseAndEffect,
    /// 论证题
    ArgumentBased,
    /// 开放建议题
    CreativeSuggestion,
    /// 开放解决题
    OpenEndedProblemSolving,
}

/// 标准名称 → 题型
static BY_NAME: phf::Map<&'static str, QuestionType> = phf_map! {
    "True/False" => QuestionType::TrueFalse,
    "Multiple Choice" => QuestionType::MultipleChoice,
    "Fill-in-the-Blank" => QuestionType::FillInTheBlank,
    "Scenario-Based" => QuestionType::ScenarioBased,
    "Comparison" => QuestionType::Comparison,
    "Cause and Effect" => QuestionType::CauseAndEffect,
    "Argument-Based" => QuestionType::ArgumentBased,
    "Creative Suggestion" => QuestionType::CreativeSuggestion,
    "Open-Ended Problem Solving" => QuestionType::OpenEndedProblemSolving,
};

impl QuestionType {
    /// 全部题型（表单顺序）
    pub const ALL: [QuestionType; 9] = [
        QuestionType::TrueFalse,
        QuestionType::MultipleChoice,
        QuestionType::FillInTheBlank,
        QuestionType::ScenarioBased,
        QuestionType::Comparison,
        QuestionType::CauseAndEffect,
        QuestionType::ArgumentBased,
        QuestionType::CreativeSuggestion,
        QuestionType::OpenEndedProblemSolving,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "True/False",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::FillInTheBlank => "Fill-in-the-Blank",
            QuestionType::ScenarioBased => "Scenario-Based",
            QuestionType::Comparison => "Comparison",
            QuestionType::CauseAndEffect => "Cause and Effect",
            QuestionType::ArgumentBased => "Argument-Based",
            QuestionType::CreativeSuggestion => "Creative Suggestion",
            QuestionType::OpenEndedProblemSolving => "Open-Ended Problem Solving",
        }
    }

    /// 从标准名称解析题型
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// 表单序号（1-based，对应 easy_{n} 等字段名）
    pub fn form_index(self) -> usize {
        Self::ALL
            .iter()
            .position(|t| *t == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}
