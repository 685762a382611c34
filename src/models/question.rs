use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// 选择题（系统默认类型）
    #[default]
    MultipleChoice,
    /// 判断题
    TrueFalse,
    /// 简答题
    ShortAnswer,
    /// 论述题
    Essay,
}

impl QuestionType {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::Essay => "essay",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 标准化后的题目记录
///
/// 字段顺序即输出顺序：`question, type, options, correctAnswer, explanation,
/// points, difficulty, category`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub explanation: String,
    pub points: u32,
    pub difficulty: Difficulty,
    pub category: String,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            question_text: String::new(),
            question_type: QuestionType::default(),
            options: Vec::new(),
            correct_answer: String::new(),
            explanation: String::new(),
            points: 1,
            difficulty: Difficulty::default(),
            category: String::new(),
        }
    }
}

impl Question {
    /// 题干非空（去除首尾空白后）即为有效记录
    pub fn is_valid(&self) -> bool {
        !self.question_text.trim().is_empty()
    }
}

/// 导入统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ImportStats {
    /// 统计有效 / 无效记录数
    pub fn from_questions(questions: &[Question]) -> Self {
        let valid = questions.iter().filter(|q| q.is_valid()).count();
        Self {
            total: questions.len(),
            valid,
            invalid: questions.len() - valid,
        }
    }

    /// 累加另一份统计
    pub fn merge(&mut self, other: &ImportStats) {
        self.total += other.total;
        self.valid += other.valid;
        self.invalid += other.invalid;
    }
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} rows parsed successfully",
            self.valid, self.total
        )
    }
}

/// 单个文件的导入结果（写入 JSON 报告）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub file_name: String,
    pub stats: ImportStats,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportReport {
    pub fn parsed(file_name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            file_name: file_name.into(),
            stats: ImportStats::from_questions(&questions),
            questions,
            error: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            stats: ImportStats::default(),
            questions: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// 预览行：每条记录一行，标记有效 / 无效
    pub fn preview_lines(&self, max_len: usize) -> Vec<String> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let mark = if q.is_valid() { "✓" } else { "✗" };
                let text = if q.is_valid() {
                    crate::utils::logging::truncate_text(q.question_text.trim(), max_len)
                } else {
                    "(题干为空)".to_string()
                };
                format!("{} #{} [{}] {}", mark, i + 1, q.question_type, text)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            question_text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_question() {
        let q = Question::default();
        assert_eq!(q.points, 1);
        assert_eq!(q.question_type, QuestionType::MultipleChoice);
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert!(!q.is_valid());
    }

    #[test]
    fn test_whitespace_question_is_invalid() {
        assert!(!question("   \n\t").is_valid());
        assert!(question(" 2 + 2 = ? ").is_valid());
    }

    #[test]
    fn test_stats_counts_valid_and_invalid() {
        let questions = vec![question("a"), question(""), question("b"), question("  ")];
        let stats = ImportStats::from_questions(&questions);
        assert_eq!(
            stats,
            ImportStats {
                total: 4,
                valid: 2,
                invalid: 2
            }
        );
        assert_eq!(stats.to_string(), "2 of 4 rows parsed successfully");
    }

    #[test]
    fn test_json_field_names_and_order() {
        let q = Question {
            question_text: "What is 2+2?".to_string(),
            question_type: QuestionType::TrueFalse,
            options: vec!["3".to_string(), "4".to_string()],
            correct_answer: "B".to_string(),
            explanation: "basic".to_string(),
            points: 2,
            difficulty: Difficulty::Hard,
            category: "math".to_string(),
        };
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(
            json,
            r#"{"question":"What is 2+2?","type":"true-false","options":["3","4"],"correctAnswer":"B","explanation":"basic","points":2,"difficulty":"hard","category":"math"}"#
        );
    }

    #[test]
    fn test_preview_lines_mark_invalid_rows() {
        let report = ImportReport::parsed("bank.xlsx", vec![question("Capital of France?"), question("")]);
        let lines = report.preview_lines(80);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("✓ #1"));
        assert!(lines[1].starts_with("✗ #2"));
    }
}
