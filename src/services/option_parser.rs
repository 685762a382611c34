//! 选项文本解析
//!
//! 把单个单元格里的选项文本拆成有序列表，例如
//! `"A. Paris B. London C. Rome"`、`"A) x\nB) y"`、`"A Paris B London"`。
//! 按字母标记的三种写法依次尝试，都不匹配时按 `;` 或换行切分。

use std::sync::LazyLock;

use regex::Regex;

/// 字母标记的写法
struct MarkerStyle {
    name: &'static str,
    pattern: Regex,
}

// 标记必须位于开头或空白/分隔符之后，字母 A–J；不吞掉标记后的空白，
// 否则紧挨着的下一个标记会丢失前导空白
static MARKER_STYLES: LazyLock<Vec<MarkerStyle>> = LazyLock::new(|| {
    [
        // A. / A) / A- / A: / (A) / A - / A :
        ("punctuated", r"(?:^|[\s;,|])\(?([A-Ja-j])[ \t]*[.)\-:]"),
        // A Paris B London（只接受大写，避免误伤普通单词）
        ("spaced", r"(?:^|[\s;,|])([A-J])\s"),
        // A. Paris B London
        ("mixed", r"(?:^|[\s;,|])\(?([A-Ja-j])(?:[.)\-:]|\s)"),
    ]
    .into_iter()
    .filter_map(|(name, pattern)| {
        Regex::new(pattern)
            .ok()
            .map(|pattern| MarkerStyle { name, pattern })
    })
    .collect()
});

/// 一个字母标记：字母、标记起点、内容起点
type Marker = (char, usize, usize);

/// 解析选项文本
///
/// 三种写法都试一遍，取识别出标记最多的一种（并列时按优先级）。
pub fn parse_options_text(raw: &str) -> Vec<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut best: Option<(&str, Vec<Marker>)> = None;
    for style in MARKER_STYLES.iter() {
        let markers = find_markers(text, &style.pattern);
        if markers.is_empty() {
            continue;
        }
        if best.as_ref().map_or(true, |(_, b)| markers.len() > b.len()) {
            best = Some((style.name, markers));
        }
    }

    if let Some((name, markers)) = best {
        let options = split_at_markers(text, &markers);
        if !options.is_empty() {
            tracing::trace!("选项按 {} 标记解析: {} 个", name, options.len());
            return options;
        }
    }

    split_by_separators(text)
}

/// 查找字母标记：第一个必须是位于文本开头的 A，之后字母依次递增，
/// 不符合顺序的候选（例如选项内容里的 "Vitamin C."）被忽略
fn find_markers(text: &str, pattern: &Regex) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(letter)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(letter) = letter.as_str().chars().next() else {
            continue;
        };
        let letter = letter.to_ascii_uppercase();
        let expected = match markers.last() {
            Some((prev, _, _)) => (*prev as u8 + 1) as char,
            None => 'A',
        };
        if letter != expected || (markers.is_empty() && whole.start() != 0) {
            continue;
        }
        markers.push((letter, whole.start(), whole.end()));
    }
    markers
}

fn split_at_markers(text: &str, markers: &[Marker]) -> Vec<String> {
    markers
        .iter()
        .enumerate()
        .map(|(i, (_, _, content_start))| {
            let content_end = markers
                .get(i + 1)
                .map(|(_, next_start, _)| *next_start)
                .unwrap_or(text.len());
            clean_option(&text[*content_start..content_end])
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_by_separators(text: &str) -> Vec<String> {
    text.split([';', '\n'])
        .map(clean_option)
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_option(s: &str) -> String {
    s.trim()
        .trim_end_matches([';', ',', '|'])
        .trim()
        .to_string()
}
