//! 字段标准化 - 业务能力层
//!
//! 纯函数：把原始文本映射为标准的题型、难度和分值，无副作用、无 I/O。

use std::sync::Arc;

use crate::models::question::{Difficulty, QuestionType};
use crate::models::synonyms::{normalize_key, SynonymTables};

/// 字段标准化器
///
/// 持有不可变的同义词表，表格和文档两条提取流程共用同一份。
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    tables: Arc<SynonymTables>,
}

impl FieldNormalizer {
    pub fn new(tables: Arc<SynonymTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &SynonymTables {
        &self.tables
    }

    /// 标准化题型，未识别或为空时返回选择题
    pub fn normalize_type(&self, raw: &str) -> QuestionType {
        self.tables
            .question_types
            .get(&normalize_key(raw))
            .copied()
            .unwrap_or_default()
    }

    /// 标准化难度，未识别或为空时返回 medium
    pub fn normalize_difficulty(&self, raw: &str) -> Difficulty {
        self.tables
            .difficulties
            .get(&normalize_key(raw))
            .copied()
            .unwrap_or_default()
    }

    /// 标准化分值，结果至少为 1，没有上限
    pub fn normalize_points(&self, raw: &str) -> u32 {
        normalize_points(raw)
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(SynonymTables::default()))
    }
}

/// 读取可选符号加开头的数字串（`"7 pts"` → 7，`"2.5"` → 2），再做 `max(1, n)`
pub fn normalize_points(raw: &str) -> u32 {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 1;
    }

    // 超出 u32 的数字串按上限处理
    digits[..end].parse::<u32>().unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_synonyms() {
        let n = FieldNormalizer::default();
        assert_eq!(n.normalize_type("mcq"), QuestionType::MultipleChoice);
        assert_eq!(n.normalize_type("Multiple Choice"), QuestionType::MultipleChoice);
        assert_eq!(n.normalize_type("choice"), QuestionType::MultipleChoice);
        assert_eq!(n.normalize_type("T/F"), QuestionType::TrueFalse);
        assert_eq!(n.normalize_type("tf"), QuestionType::TrueFalse);
        assert_eq!(n.normalize_type("SA"), QuestionType::ShortAnswer);
        assert_eq!(n.normalize_type("long answer"), QuestionType::Essay);
        assert_eq!(n.normalize_type("Written"), QuestionType::Essay);
    }

    #[test]
    fn test_type_is_case_and_whitespace_insensitive() {
        let n = FieldNormalizer::default();
        for alias in n.tables().question_types.keys() {
            let expected = n.normalize_type(alias);
            assert_eq!(n.normalize_type(&alias.to_uppercase()), expected, "{}", alias);
            assert_eq!(n.normalize_type(&format!(" {} ", alias)), expected, "{}", alias);
        }
    }

    #[test]
    fn test_type_default_fallback() {
        let n = FieldNormalizer::default();
        assert_eq!(n.normalize_type(""), QuestionType::MultipleChoice);
        assert_eq!(n.normalize_type("unrecognized-xyz"), QuestionType::MultipleChoice);
    }

    #[test]
    fn test_difficulty_synonyms_and_default() {
        let n = FieldNormalizer::default();
        assert_eq!(n.normalize_difficulty("1"), Difficulty::Easy);
        assert_eq!(n.normalize_difficulty("2"), Difficulty::Medium);
        assert_eq!(n.normalize_difficulty("3"), Difficulty::Hard);
        assert_eq!(n.normalize_difficulty(" Simple "), Difficulty::Easy);
        assert_eq!(n.normalize_difficulty("MODERATE"), Difficulty::Medium);
        assert_eq!(n.normalize_difficulty("complex"), Difficulty::Hard);
        assert_eq!(n.normalize_difficulty(""), Difficulty::Medium);
        assert_eq!(n.normalize_difficulty("impossible"), Difficulty::Medium);
    }

    #[test]
    fn test_points_clamp() {
        assert_eq!(normalize_points("-5"), 1);
        assert_eq!(normalize_points("abc"), 1);
        assert_eq!(normalize_points(""), 1);
        assert_eq!(normalize_points("0"), 1);
        assert_eq!(normalize_points("7"), 7);
        assert_eq!(normalize_points(" 12 "), 12);
        assert_eq!(normalize_points("2.5"), 2);
        assert_eq!(normalize_points("5 pts"), 5);
        assert_eq!(normalize_points("+3"), 3);
        assert_eq!(normalize_points("1000"), 1000);
    }

    #[test]
    fn test_substituted_tables() {
        let mut tables = SynonymTables::default();
        tables
            .question_types
            .insert("dissertation".to_string(), QuestionType::Essay);
        let n = FieldNormalizer::new(Arc::new(tables));
        assert_eq!(n.normalize_type("Dissertation"), QuestionType::Essay);
    }
}
