//! 同义词表
//!
//! 把作者各式各样的写法映射到标准值：题型别名、难度别名、表头同义词、
//! 选项列前缀以及 Word 文档中的字段标签。
//!
//! 内置默认表是编译期的 phf 映射；外部 TOML 文件只能在默认表的基础上**追加**，
//! 不会删除已有别名。构造完成后整张表不可变，可以通过 `Arc` 在并发任务间共享。

use std::collections::HashMap;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::models::question::{Difficulty, QuestionType};

static DEFAULT_TYPE_ALIASES: phf::Map<&'static str, QuestionType> = phf_map! {
    "multiple-choice" => QuestionType::MultipleChoice,
    "multiple choice" => QuestionType::MultipleChoice,
    "multiple_choice" => QuestionType::MultipleChoice,
    "multiplechoice" => QuestionType::MultipleChoice,
    "mcq" => QuestionType::MultipleChoice,
    "mc" => QuestionType::MultipleChoice,
    "choice" => QuestionType::MultipleChoice,
    "single choice" => QuestionType::MultipleChoice,
    "true-false" => QuestionType::TrueFalse,
    "true/false" => QuestionType::TrueFalse,
    "true false" => QuestionType::TrueFalse,
    "true_false" => QuestionType::TrueFalse,
    "truefalse" => QuestionType::TrueFalse,
    "t/f" => QuestionType::TrueFalse,
    "tf" => QuestionType::TrueFalse,
    "boolean" => QuestionType::TrueFalse,
    "short-answer" => QuestionType::ShortAnswer,
    "short answer" => QuestionType::ShortAnswer,
    "short_answer" => QuestionType::ShortAnswer,
    "shortanswer" => QuestionType::ShortAnswer,
    "sa" => QuestionType::ShortAnswer,
    "short" => QuestionType::ShortAnswer,
    "fill in the blank" => QuestionType::ShortAnswer,
    "fill-in" => QuestionType::ShortAnswer,
    "essay" => QuestionType::Essay,
    "long answer" => QuestionType::Essay,
    "long-answer" => QuestionType::Essay,
    "long_answer" => QuestionType::Essay,
    "written" => QuestionType::Essay,
    "open-ended" => QuestionType::Essay,
};

static DEFAULT_DIFFICULTY_ALIASES: phf::Map<&'static str, Difficulty> = phf_map! {
    "easy" => Difficulty::Easy,
    "e" => Difficulty::Easy,
    "1" => Difficulty::Easy,
    "simple" => Difficulty::Easy,
    "beginner" => Difficulty::Easy,
    "low" => Difficulty::Easy,
    "medium" => Difficulty::Medium,
    "m" => Difficulty::Medium,
    "2" => Difficulty::Medium,
    "moderate" => Difficulty::Medium,
    "intermediate" => Difficulty::Medium,
    "normal" => Difficulty::Medium,
    "average" => Difficulty::Medium,
    "hard" => Difficulty::Hard,
    "h" => Difficulty::Hard,
    "3" => Difficulty::Hard,
    "complex" => Difficulty::Hard,
    "difficult" => Difficulty::Hard,
    "advanced" => Difficulty::Hard,
    "high" => Difficulty::Hard,
};

/// 各标准字段的表头同义词（子串匹配，小写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSynonyms {
    pub question: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: Vec<String>,
    pub options: Vec<String>,
    pub correct_answer: Vec<String>,
    pub explanation: Vec<String>,
    pub points: Vec<String>,
    pub difficulty: Vec<String>,
    pub category: Vec<String>,
}

impl Default for ColumnSynonyms {
    fn default() -> Self {
        Self {
            question: owned(&["question", "stem", "prompt", "q"]),
            question_type: owned(&["type", "format", "kind"]),
            options: owned(&["option", "choice"]),
            correct_answer: owned(&["answer", "correct", "solution", "key"]),
            explanation: owned(&["explanation", "explain", "rationale", "reason", "feedback"]),
            points: owned(&["point", "score", "mark", "weight"]),
            difficulty: owned(&["difficulty", "level", "complexity"]),
            category: owned(&["category", "topic", "subject", "tag"]),
        }
    }
}

/// Word 文档中的字段标签（小写，整词匹配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSynonyms {
    pub correct_answer: Vec<String>,
    pub explanation: Vec<String>,
    pub points: Vec<String>,
    pub difficulty: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: Vec<String>,
    pub category: Vec<String>,
}

impl Default for LabelSynonyms {
    fn default() -> Self {
        Self {
            correct_answer: owned(&["correct answer", "answer", "correct", "solution"]),
            explanation: owned(&["explanation", "explain", "reason", "rationale"]),
            points: owned(&["points", "point", "score", "marks", "mark"]),
            difficulty: owned(&["difficulty", "level"]),
            question_type: owned(&["question type", "type", "format"]),
            category: owned(&["category", "topic", "subject"]),
        }
    }
}

impl LabelSynonyms {
    /// 所有标签（用于确定题干的结束位置）
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.correct_answer
            .iter()
            .chain(&self.explanation)
            .chain(&self.points)
            .chain(&self.difficulty)
            .chain(&self.question_type)
            .chain(&self.category)
    }
}

/// 完整的同义词配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTables {
    pub question_types: HashMap<String, QuestionType>,
    pub difficulties: HashMap<String, Difficulty>,
    pub columns: ColumnSynonyms,
    /// 独立选项列的表头前缀，例如 `Option A` / `option_b` / `Choice C`
    pub option_column_prefixes: Vec<String>,
    pub labels: LabelSynonyms,
}

impl Default for SynonymTables {
    fn default() -> Self {
        Self {
            question_types: DEFAULT_TYPE_ALIASES
                .entries()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            difficulties: DEFAULT_DIFFICULTY_ALIASES
                .entries()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            columns: ColumnSynonyms::default(),
            option_column_prefixes: owned(&["option", "opt", "choice"]),
            labels: LabelSynonyms::default(),
        }
    }
}

/// TOML 文件中的追加配置，所有字段都是可选的
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SynonymOverrides {
    pub question_types: HashMap<String, QuestionType>,
    pub difficulties: HashMap<String, Difficulty>,
    pub columns: ColumnOverrides,
    pub option_column_prefixes: Vec<String>,
    pub labels: LabelOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    pub question: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: Vec<String>,
    pub options: Vec<String>,
    pub correct_answer: Vec<String>,
    pub explanation: Vec<String>,
    pub points: Vec<String>,
    pub difficulty: Vec<String>,
    pub category: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelOverrides {
    pub correct_answer: Vec<String>,
    pub explanation: Vec<String>,
    pub points: Vec<String>,
    pub difficulty: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: Vec<String>,
    pub category: Vec<String>,
}

impl SynonymTables {
    /// 在当前表的基础上追加别名（键统一转为小写并去除首尾空白）
    pub fn extended(mut self, overrides: SynonymOverrides) -> Self {
        for (alias, value) in overrides.question_types {
            self.question_types.insert(normalize_key(&alias), value);
        }
        for (alias, value) in overrides.difficulties {
            self.difficulties.insert(normalize_key(&alias), value);
        }

        let c = overrides.columns;
        append(&mut self.columns.question, c.question);
        append(&mut self.columns.question_type, c.question_type);
        append(&mut self.columns.options, c.options);
        append(&mut self.columns.correct_answer, c.correct_answer);
        append(&mut self.columns.explanation, c.explanation);
        append(&mut self.columns.points, c.points);
        append(&mut self.columns.difficulty, c.difficulty);
        append(&mut self.columns.category, c.category);

        append(&mut self.option_column_prefixes, overrides.option_column_prefixes);

        let l = overrides.labels;
        append(&mut self.labels.correct_answer, l.correct_answer);
        append(&mut self.labels.explanation, l.explanation);
        append(&mut self.labels.points, l.points);
        append(&mut self.labels.difficulty, l.difficulty);
        append(&mut self.labels.question_type, l.question_type);
        append(&mut self.labels.category, l.category);

        self
    }
}

pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn append(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        let item = normalize_key(&item);
        if !item.is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}
