//! 表格提取 - 业务能力层
//!
//! 把解码后的工作簿转换为题目记录：
//! 1. 每个工作表的第一行作为表头，按同义词子串匹配出各字段所在的列
//! 2. 跳过整行为空的行，其余每行生成一条记录
//! 3. 选项优先读取 `Option A` ~ `Option J` 这样的独立列，
//!    没有时再解析通用的 options 列
//!
//! 列映射只在单个工作表内有效，不跨表、不跨文件缓存。

use tracing::{debug, warn};

use crate::error::ImportResult;
use crate::models::question::Question;
use crate::models::synonyms::ColumnSynonyms;
use crate::services::document_decoder::{decode_workbook, Sheet};
use crate::services::normalizer::FieldNormalizer;
use crate::services::option_parser::parse_options_text;
use crate::workflow::QuestionExtractor;

const OPTION_LETTERS: [char; 10] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

/// 单个工作表的列映射（字段 → 列下标）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub question: Option<usize>,
    pub question_type: Option<usize>,
    pub options: Option<usize>,
    pub correct_answer: Option<usize>,
    pub explanation: Option<usize>,
    pub points: Option<usize>,
    pub difficulty: Option<usize>,
    pub category: Option<usize>,
    /// 独立选项列，按字母顺序
    pub option_columns: Vec<usize>,
}

impl ColumnMapping {
    /// 根据表头行建立列映射
    pub fn from_headers(
        headers: &[String],
        synonyms: &ColumnSynonyms,
        option_prefixes: &[String],
    ) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let option_columns = find_option_columns(&headers, option_prefixes);

        // 通用 options 列不能是某个独立选项列（"Option A" 也包含 "option"）
        let options = headers.iter().enumerate().position(|(i, header)| {
            !option_columns.contains(&i) && header_matches(header, &synonyms.options)
        });

        Self {
            question: find_column(&headers, &synonyms.question),
            question_type: find_column(&headers, &synonyms.question_type),
            options,
            correct_answer: find_column(&headers, &synonyms.correct_answer),
            explanation: find_column(&headers, &synonyms.explanation),
            points: find_column(&headers, &synonyms.points),
            difficulty: find_column(&headers, &synonyms.difficulty),
            category: find_column(&headers, &synonyms.category),
            option_columns,
        }
    }
}

/// 第一个表头包含任一同义词的列，先到先得
fn find_column(headers: &[String], synonyms: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|header| header_matches(header, synonyms))
}

fn header_matches(header: &str, synonyms: &[String]) -> bool {
    !header.is_empty() && synonyms.iter().any(|s| header.contains(s.as_str()))
}

/// 查找 `option a` / `option_b` / `Choice C` 形式的列，最多 10 列（a–j）
fn find_option_columns(headers: &[String], prefixes: &[String]) -> Vec<usize> {
    let compact = |s: &str| -> String { s.chars().filter(|c| c.is_alphanumeric()).collect() };
    let headers: Vec<String> = headers.iter().map(|h| compact(h.as_str())).collect();
    let prefixes: Vec<String> = prefixes.iter().map(|p| compact(p.as_str())).collect();

    OPTION_LETTERS
        .iter()
        .filter_map(|&letter| {
            headers.iter().position(|header| {
                prefixes.iter().any(|prefix| {
                    header.strip_prefix(prefix.as_str()).map_or(false, |rest| {
                        rest.len() == 1 && rest.starts_with(letter)
                    })
                })
            })
        })
        .collect()
}

/// 表格提取器
#[derive(Debug, Clone)]
pub struct TabularExtractor {
    normalizer: FieldNormalizer,
}

impl TabularExtractor {
    pub fn new(normalizer: FieldNormalizer) -> Self {
        Self { normalizer }
    }

    /// 按工作簿顺序提取所有工作表的记录
    pub fn extract_sheets(&self, sheets: &[Sheet]) -> Vec<Question> {
        sheets
            .iter()
            .flat_map(|sheet| self.extract_sheet(sheet))
            .collect()
    }

    /// 提取单个工作表
    pub fn extract_sheet(&self, sheet: &Sheet) -> Vec<Question> {
        let Some((headers, rows)) = sheet.rows.split_first() else {
            debug!("工作表 '{}' 为空，跳过", sheet.name);
            return Vec::new();
        };

        let tables = self.normalizer.tables();
        let mapping =
            ColumnMapping::from_headers(headers, &tables.columns, &tables.option_column_prefixes);
        debug!("工作表 '{}' 列映射: {:?}", sheet.name, mapping);

        if mapping.question.is_none() {
            warn!(
                "⚠️ 工作表 '{}' 没有找到题干列，所有记录都将是无效记录",
                sheet.name
            );
        }

        let questions: Vec<Question> = rows
            .iter()
            .filter(|row| !is_empty_row(row))
            .map(|row| self.build_question(row, &mapping))
            .collect();

        debug!("工作表 '{}': 提取 {} 条记录", sheet.name, questions.len());
        questions
    }

    fn build_question(&self, row: &[String], mapping: &ColumnMapping) -> Question {
        let get = |column: Option<usize>| cell(row, column);

        Question {
            question_text: get(mapping.question),
            question_type: self.normalizer.normalize_type(&get(mapping.question_type)),
            options: self.collect_options(row, mapping),
            correct_answer: get(mapping.correct_answer),
            explanation: get(mapping.explanation),
            points: self.normalizer.normalize_points(&get(mapping.points)),
            difficulty: self
                .normalizer
                .normalize_difficulty(&get(mapping.difficulty)),
            category: get(mapping.category),
        }
    }

    /// 先读独立选项列，没有内容时再解析通用 options 列
    fn collect_options(&self, row: &[String], mapping: &ColumnMapping) -> Vec<String> {
        let separate: Vec<String> = mapping
            .option_columns
            .iter()
            .map(|&column| cell(row, Some(column)))
            .filter(|value| !value.is_empty())
            .collect();
        if !separate.is_empty() {
            return separate;
        }

        match mapping.options {
            Some(column) => parse_options_text(&cell(row, Some(column))),
            None => Vec::new(),
        }
    }
}

impl QuestionExtractor for TabularExtractor {
    fn extract(&self, bytes: &[u8]) -> ImportResult<Vec<Question>> {
        let sheets = decode_workbook(bytes)?;
        Ok(self.extract_sheets(&sheets))
    }
}

/// 单元格的值（去除首尾空白）；列未映射或越界时为空字符串
fn cell(row: &[String], column: Option<usize>) -> String {
    column
        .and_then(|c| row.get(c))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn is_empty_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Difficulty, QuestionType};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn extractor() -> TabularExtractor {
        TabularExtractor::new(FieldNormalizer::default())
    }

    #[test]
    fn test_header_substring_mapping() {
        let headers = row(&[
            "Question Text (EN)",
            "Question Format",
            "Choices",
            "Correct Answer",
            "Explanation",
            "Points",
            "Difficulty Level",
            "Topic",
        ]);
        let defaults = crate::models::synonyms::SynonymTables::default();
        let mapping = ColumnMapping::from_headers(
            &headers,
            &defaults.columns,
            &defaults.option_column_prefixes,
        );
        assert_eq!(mapping.question, Some(0));
        assert_eq!(mapping.question_type, Some(1));
        assert_eq!(mapping.options, Some(2));
        assert_eq!(mapping.correct_answer, Some(3));
        assert_eq!(mapping.explanation, Some(4));
        assert_eq!(mapping.points, Some(5));
        assert_eq!(mapping.difficulty, Some(6));
        assert_eq!(mapping.category, Some(7));
        assert!(mapping.option_columns.is_empty());
    }

    #[test]
    fn test_option_columns_in_letter_order() {
        let headers = row(&["Question", "Option B", "option_a", "Choice-C", "Options"]);
        let defaults = crate::models::synonyms::SynonymTables::default();
        let mapping = ColumnMapping::from_headers(
            &headers,
            &defaults.columns,
            &defaults.option_column_prefixes,
        );
        assert_eq!(mapping.option_columns, vec![2, 1, 3]);
    }

    #[test]
    fn test_question_and_q_headers_parse_identically() {
        let data = row(&["What is 2+2?", "mcq", "A. 3 B. 4", "B", "2"]);
        let long = Sheet::new(
            "Long",
            vec![
                row(&["Question Text", "Type", "Options", "Answer", "Points"]),
                data.clone(),
            ],
        );
        let short = Sheet::new(
            "Short",
            vec![row(&["Q", "Type", "Options", "Answer", "Points"]), data],
        );

        let ex = extractor();
        let a = ex.extract_sheet(&long);
        let b = ex.extract_sheet(&short);
        assert_eq!(a, b);
        assert_eq!(a[0].question_text, "What is 2+2?");
        assert_eq!(a[0].options, vec!["3", "4"]);
        assert_eq!(a[0].points, 2);
    }

    #[test]
    fn test_generic_options_column_next_to_empty_option_columns() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                row(&["Question", "Option A", "Option B", "Options"]),
                row(&["Q?", "", "", "A. x B. y"]),
            ],
        );
        let questions = extractor().extract_sheet(&sheet);
        assert_eq!(questions[0].options, vec!["x", "y"]);

        let defaults = crate::models::synonyms::SynonymTables::default();
        let mapping = ColumnMapping::from_headers(
            &sheet.rows[0],
            &defaults.columns,
            &defaults.option_column_prefixes,
        );
        assert_eq!(mapping.options, Some(3));
        assert_eq!(mapping.option_columns, vec![1, 2]);
    }

    #[test]
    fn test_only_option_columns_leave_generic_unmapped() {
        let headers = row(&["Question", "Option A", "Option B"]);
        let defaults = crate::models::synonyms::SynonymTables::default();
        let mapping = ColumnMapping::from_headers(
            &headers,
            &defaults.columns,
            &defaults.option_column_prefixes,
        );
        assert_eq!(mapping.options, None);
    }

    #[test]
    fn test_separate_option_columns_take_precedence() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                row(&["Question", "Option A", "Option B", "Option C", "Option D", "Answer"]),
                row(&["Capital of France?", "Paris", "London", "", "Rome", "A"]),
            ],
        );
        let questions = extractor().extract_sheet(&sheet);
        assert_eq!(questions[0].options, vec!["Paris", "London", "Rome"]);
        assert_eq!(questions[0].correct_answer, "A");
    }

    #[test]
    fn test_empty_rows_skipped_and_invalid_rows_kept() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                row(&["Question", "Type", "Answer", "Difficulty"]),
                row(&["  ", "", "\t", ""]),
                row(&["", "essay", "anything", "hard"]),
                row(&["Describe osmosis.", "long answer", "", "3"]),
            ],
        );
        let questions = extractor().extract_sheet(&sheet);
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0].question_text, "");
        assert!(!questions[0].is_valid());
        assert_eq!(questions[0].question_type, QuestionType::Essay);

        assert!(questions[1].is_valid());
        assert_eq!(questions[1].difficulty, Difficulty::Hard);
        assert!(questions[1].options.is_empty());
    }

    #[test]
    fn test_short_rows_and_unmapped_fields_use_defaults() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                row(&["Question", "Points", "Difficulty"]),
                row(&["Only a stem"]),
            ],
        );
        let questions = extractor().extract_sheet(&sheet);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].points, 1);
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[0].category, "");
    }

    #[test]
    fn test_header_only_and_empty_sheets_contribute_nothing() {
        let ex = extractor();
        let sheets = vec![
            Sheet::new("Empty", vec![]),
            Sheet::new("HeaderOnly", vec![row(&["Question", "Answer"])]),
            Sheet::new(
                "Data",
                vec![row(&["Question", "Answer"]), row(&["Q one", "A"])],
            ),
        ];
        let questions = ex.extract_sheets(&sheets);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "Q one");
    }

    #[test]
    fn test_sheets_concatenate_in_workbook_order() {
        let ex = extractor();
        let sheets = vec![
            Sheet::new(
                "First",
                vec![row(&["Question"]), row(&["one"]), row(&["two"])],
            ),
            Sheet::new("Second", vec![row(&["Stem"]), row(&["three"])]),
        ];
        let texts: Vec<String> = ex
            .extract_sheets(&sheets)
            .into_iter()
            .map(|q| q.question_text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
