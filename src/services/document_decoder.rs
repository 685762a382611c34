//! 文档解码 - 业务能力层
//!
//! 把二进制文件解码成提取器能处理的结构：
//! - 电子表格（xlsx / xls）→ 按工作簿顺序排列的 `Sheet`，单元格已转为字符串
//! - Word 文档（docx）→ 按段落换行的纯文本
//!
//! 解码失败直接返回 `ImportError::Decode`，不做部分恢复：
//! 任何一个工作表读不出来，整个工作簿都算失败。

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::{ImportError, ImportResult};
use crate::workflow::SourceFormat;

/// 解码后的工作表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    /// 第一行为表头
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// 从字节流解码工作簿（格式由 calamine 根据内容自动识别）
pub fn decode_workbook(bytes: &[u8]) -> ImportResult<Vec<Sheet>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| ImportError::decode(SourceFormat::Tabular, e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names().to_vec() {
        let range = workbook.worksheet_range(&name).map_err(|e| {
            ImportError::decode(
                SourceFormat::Tabular,
                format!("工作表 '{}' 无法读取: {}", name, e),
            )
        })?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        debug!("工作表 '{}': {} 行", name, rows.len());
        sheets.push(Sheet::new(name, rows));
    }

    Ok(sheets)
}

/// 将单元格数据转换为字符串
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // 整数值不显示小数点，避免 "2" 变成 "2.0"
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// 从字节流解码 Word 文档的纯文本
pub fn decode_document_text(bytes: &[u8]) -> ImportResult<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ImportError::decode(SourceFormat::FlowDocument, e.to_string()))?;

    let mut text = String::with_capacity(8192);
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                push_line(&mut text, &paragraph_text(para));
            }
            // 表格只取纯文本，每个单元格段落一行
            docx_rs::DocumentChild::Table(table) => {
                for tc in &table.rows {
                    if let docx_rs::TableChild::TableRow(row) = tc {
                        for rc in &row.cells {
                            if let docx_rs::TableRowChild::TableCell(cell) = rc {
                                for cc in &cell.children {
                                    if let docx_rs::TableCellContent::Paragraph(para) = cc {
                                        push_line(&mut text, &paragraph_text(para));
                                    }
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    debug!("文档文本长度: {} 字符", text.chars().count());
    Ok(text)
}

fn push_line(out: &mut String, line: &str) {
    if !line.trim().is_empty() {
        out.push_str(line);
        out.push('\n');
    }
}

/// 从段落中提取纯文本（Run / Hyperlink / Insert）
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut line = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => run_text(run, &mut line),
            docx_rs::ParagraphChild::Hyperlink(hyperlink) => {
                for hc in &hyperlink.children {
                    if let docx_rs::ParagraphChild::Run(run) = hc {
                        run_text(run, &mut line);
                    }
                }
            }
            docx_rs::ParagraphChild::Insert(ins) => {
                for ic in &ins.children {
                    if let docx_rs::InsertChild::Run(run) = ic {
                        run_text(run, &mut line);
                    }
                }
            }
            _ => {}
        }
    }
    line
}

fn run_text(run: &docx_rs::Run, out: &mut String) {
    for rc in &run.children {
        match rc {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
