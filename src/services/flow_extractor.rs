//! Word 文档提取 - 业务能力层
//!
//! 从文档纯文本中切出每道题的片段，再在片段内按标签查找各字段。
//!
//! ## 切分
//! 按优先级依次应用三种题号识别策略，每一种都只在前一轮的结果上继续切分：
//! 1. `Q1` / `Q1.` / `Q1)` / `Q1-`
//! 2. `Question 1`
//! 3. 行首的 `1.` / `1)`
//!
//! 最后丢弃空白片段。完全没有题号的文本会整体成为一个片段。
//!
//! ## 字段
//! 每个字段独立在片段内搜索，先匹配到的为准。标签出现在题干正文里时
//! （例如题干里写了 "Answer:"）会被误认，这是已知行为。

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, ImportError, ImportResult};
use crate::models::question::Question;
use crate::models::synonyms::LabelSynonyms;
use crate::services::document_decoder::decode_document_text;
use crate::services::normalizer::FieldNormalizer;
use crate::workflow::QuestionExtractor;

/// 题号识别策略：在每个匹配位置之前切开文本
#[derive(Debug, Clone)]
pub struct SegmentationStrategy {
    pub name: &'static str,
    pattern: Regex,
}

impl SegmentationStrategy {
    pub fn new(name: &'static str, pattern: &str) -> ImportResult<Self> {
        Ok(Self {
            name,
            pattern: compile(pattern)?,
        })
    }

    /// 在每个匹配起点处切分（文本开头的匹配不产生空片段）
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        let mut last = 0;
        for m in self.pattern.find_iter(text) {
            if m.start() > last {
                fragments.push(text[last..m.start()].to_string());
                last = m.start();
            }
        }
        fragments.push(text[last..].to_string());
        fragments
    }
}

/// 默认的三种题号识别策略，按优先级排列
pub fn default_strategies() -> ImportResult<Vec<SegmentationStrategy>> {
    Ok(vec![
        SegmentationStrategy::new("q-number", r"(?i)\bQ\d+\b")?,
        SegmentationStrategy::new("question-number", r"(?i)\bQuestion[ \t]*\d+\b")?,
        SegmentationStrategy::new("line-number", r"(?m)^[ \t]*\d+[.)](?:\s|$)")?,
    ])
}

/// 依次应用所有策略，丢弃空白片段
pub fn segment_sections(text: &str, strategies: &[SegmentationStrategy]) -> Vec<String> {
    let mut fragments = vec![text.to_string()];
    for strategy in strategies {
        fragments = fragments
            .iter()
            .flat_map(|fragment| strategy.split(fragment))
            .collect();
        debug!("题号策略 {}: {} 个片段", strategy.name, fragments.len());
    }
    fragments
        .into_iter()
        .filter(|f| !f.trim().is_empty())
        .collect()
}

/// 片段内的字段模式
#[derive(Debug, Clone)]
struct FieldPatterns {
    /// 片段开头的题号前缀（必须存在，否则题干为空）
    number_prefix: Regex,
    /// 题干结束位置：选项标记、下一个题号或带冒号的标签行
    stem_end: Regex,
    /// 带冒号的标签行
    label_line: Regex,
    option_marker: Regex,
    correct_answer: Regex,
    explanation: Regex,
    points: Regex,
    difficulty: Regex,
    question_type: Regex,
    category: Regex,
}

impl FieldPatterns {
    fn new(labels: &LabelSynonyms) -> ImportResult<Self> {
        let all: Vec<&String> = labels.all().collect();
        let all_labels = alternation(all.iter().copied());

        Ok(Self {
            number_prefix: compile(
                r"(?i)^\s*(?:Q[ \t]*\d+|Question[ \t]*\d+|\d+)[ \t]*[.):\-]?",
            )?,
            stem_end: compile(&format!(
                r"(?m)(?:^|[ \t])\(?[A-D][.)](?:\s|$)|^[ \t]*\d+[.)](?:\s|$)|^[ \t]*(?i:{})\b[ \t]*[:：]",
                all_labels
            ))?,
            label_line: compile(&format!(r"(?i)^[ \t]*(?:{})\b[ \t]*[:：]", all_labels))?,
            option_marker: compile(r"(?:^|[ \t])\(?([A-D])[.)]")?,
            correct_answer: line_value(&labels.correct_answer, r"([A-Za-z0-9]+)")?,
            explanation: line_value(&labels.explanation, r"([^\n]*)")?,
            points: compile(&format!(
                r"(?i)\b(?:{})\b[ \t]*[:：]?[ \t]*(\d+)",
                alternation(labels.points.iter())
            ))?,
            difficulty: line_value(&labels.difficulty, r"([^\n]*)")?,
            question_type: line_value(&labels.question_type, r"([^\n]*)")?,
            category: line_value(&labels.category, r"([^\n]*)")?,
        })
    }
}

/// `标签:` 出现在任意位置，或 `标签 ` 位于行首，后面跟着取值
fn line_value(labels: &[String], value: &str) -> ImportResult<Regex> {
    let alt = alternation(labels.iter());
    compile(&format!(
        r"(?im)(?:\b(?:{alt})\b[ \t]*[:：]|^[ \t]*(?:{alt})\b[ \t]+)[ \t]*{value}"
    ))
}

/// 标签按长度降序拼成正则分支，长标签优先（"correct answer" 先于 "correct"）
fn alternation<'a>(labels: impl Iterator<Item = &'a String>) -> String {
    let mut labels: Vec<&String> = labels.filter(|l| !l.trim().is_empty()).collect();
    labels.sort_by_key(|l| std::cmp::Reverse(l.len()));
    labels.dedup();
    if labels.is_empty() {
        // 不可能匹配的分支
        return r"\b\B".to_string();
    }
    labels
        .iter()
        .map(|l| {
            l.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(pattern: &str) -> ImportResult<Regex> {
    Regex::new(pattern).map_err(|source| {
        ImportError::Config(ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
    })
}

/// Word 文档提取器
#[derive(Debug, Clone)]
pub struct FlowDocumentExtractor {
    normalizer: FieldNormalizer,
    strategies: Vec<SegmentationStrategy>,
    patterns: FieldPatterns,
}

impl FlowDocumentExtractor {
    pub fn new(normalizer: FieldNormalizer) -> ImportResult<Self> {
        let patterns = FieldPatterns::new(&normalizer.tables().labels)?;
        Ok(Self {
            normalizer,
            strategies: default_strategies()?,
            patterns,
        })
    }

    /// 从纯文本提取所有题目，每个片段一条记录
    pub fn extract_text(&self, text: &str) -> Vec<Question> {
        let text = text.replace("\r\n", "\n");
        let sections = segment_sections(&text, &self.strategies);
        debug!("文档切分为 {} 个片段", sections.len());

        sections
            .iter()
            .map(|section| self.extract_section(section))
            .collect()
    }

    /// 从单个片段提取字段，未匹配的字段取默认值
    pub fn extract_section(&self, section: &str) -> Question {
        let p = &self.patterns;
        let (question_text, body_start) = self.question_text(section);

        Question {
            question_text,
            question_type: self
                .normalizer
                .normalize_type(&capture(&p.question_type, section)),
            options: self.options(&section[body_start..]),
            correct_answer: capture(&p.correct_answer, section),
            explanation: capture(&p.explanation, section),
            points: self.normalizer.normalize_points(&capture(&p.points, section)),
            difficulty: self
                .normalizer
                .normalize_difficulty(&capture(&p.difficulty, section)),
            category: capture(&p.category, section),
        }
    }

    /// 题干：题号前缀之后，到第一个结束标记为止；返回题干和题干之后的位置
    fn question_text(&self, section: &str) -> (String, usize) {
        let Some(prefix) = self.patterns.number_prefix.find(section) else {
            return (String::new(), 0);
        };

        let rest = &section[prefix.end()..];
        let end = self
            .patterns
            .stem_end
            .find(rest)
            .map(|m| m.start())
            .unwrap_or(rest.len());

        (rest[..end].trim().to_string(), prefix.end() + end)
    }

    /// 选项：A–D 标记按出现顺序（字母须依次递增），内容到下一个标记或行尾为止；
    /// 标签行不参与
    fn options(&self, body: &str) -> Vec<String> {
        let mut options = Vec::new();
        let mut expected = 'A';

        for line in body.lines() {
            if expected > 'D' {
                break;
            }
            if self.patterns.label_line.is_match(line) {
                continue;
            }

            let mut markers: Vec<(usize, usize)> = Vec::new();
            for caps in self.patterns.option_marker.captures_iter(line) {
                let (Some(whole), Some(letter)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if letter.as_str().starts_with(expected) {
                    markers.push((whole.start(), whole.end()));
                    expected = (expected as u8 + 1) as char;
                }
            }

            for (i, (_, content_start)) in markers.iter().enumerate() {
                let content_end = markers
                    .get(i + 1)
                    .map(|(next_start, _)| *next_start)
                    .unwrap_or(line.len());
                let content = line[*content_start..content_end].trim();
                if !content.is_empty() {
                    options.push(content.to_string());
                }
            }
        }

        options
    }
}

impl QuestionExtractor for FlowDocumentExtractor {
    fn extract(&self, bytes: &[u8]) -> ImportResult<Vec<Question>> {
        let text = decode_document_text(bytes)?;
        Ok(self.extract_text(&text))
    }
}

/// 第一个捕获组（去除首尾空白），未匹配时为空字符串
fn capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
