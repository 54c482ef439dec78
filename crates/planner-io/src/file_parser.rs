//! 檔案解析器（CSV / Excel → 原始記錄）

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};
use csv::{ByteRecord, ReaderBuilder};

use crate::error::{IngestError, Result};

/// 原始記錄：欄位名稱（去空白、轉大寫）→ 儲存格文字（去空白）
pub type RawRecord = HashMap<String, String>;

/// 解析後的表格
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    fn from_rows<I, R>(header_row: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = String>,
    {
        let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();

        let mut records = Vec::new();
        for row in rows {
            let mut record = RawRecord::new();
            for (header, value) in headers.iter().zip(row) {
                if header.is_empty() {
                    continue;
                }
                record.insert(header.clone(), value.trim().to_string());
            }

            // 跳過完全空白的列
            if record.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(record);
        }

        Self { headers, records }
    }

    /// 檢查表頭是否包含任一別名，缺少時回傳錯誤
    pub fn require_column(&self, aliases: &[&str], file: &Path) -> Result<()> {
        if self.has_column(aliases) {
            Ok(())
        } else {
            Err(IngestError::MissingColumn {
                file: file.display().to_string(),
                column: aliases.join(" / "),
            })
        }
    }

    /// 表頭是否包含任一別名
    pub fn has_column(&self, aliases: &[&str]) -> bool {
        aliases
            .iter()
            .any(|alias| self.headers.iter().any(|h| *h == normalize_header(alias)))
    }
}

/// 依別名取得非空白欄位值
pub fn field<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| {
            record
                .get(&normalize_header(alias))
                .filter(|value| !value.is_empty())
        })
        .map(String::as_str)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_uppercase()
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound(path.display().to_string()))
    }
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 檔（第一列為表頭）
    pub fn parse(path: &Path) -> Result<RawTable> {
        ensure_exists(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允許列長度不一致
            .from_reader(file);

        let header_row = lossy_fields(reader.byte_headers()?);

        // 逐列以位元組讀取；非 UTF-8 的儲存格以替代字元保留，不影響其他列
        let mut rows = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            let record = result?;
            if std::str::from_utf8(record.as_slice()).is_err() {
                tracing::warn!(
                    "{} 第 {} 列含非 UTF-8 字元，已替換",
                    path.display(),
                    index + 2
                );
            }
            rows.push(lossy_fields(&record));
        }

        Ok(RawTable::from_rows(header_row, rows))
    }
}

fn lossy_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser {
    workbook: Xlsx<BufReader<File>>,
}

impl ExcelParser {
    /// 開啟活頁簿
    pub fn open(path: &Path) -> Result<Self> {
        ensure_exists(path)?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" {
            return Err(IngestError::UnsupportedFormat(ext));
        }

        let workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| IngestError::ExcelParseError(e.to_string()))?;
        Ok(Self { workbook })
    }

    /// 工作表名稱
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// 解析指定工作表，表頭前略過 `skip_rows` 列
    ///
    /// 工作表不存在時回傳 `None`。
    pub fn parse_sheet(&mut self, sheet: &str, skip_rows: usize) -> Result<Option<RawTable>> {
        if !self.sheet_names().iter().any(|name| name == sheet) {
            return Ok(None);
        }

        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| IngestError::ExcelParseError(e.to_string()))?;

        // 範圍可能不是從第一列開始（前面是空白列）
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows = range
            .rows()
            .skip(skip_rows.saturating_sub(first_row))
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());

        let Some(header_row) = rows.next() else {
            return Ok(Some(RawTable::default()));
        };

        Ok(Some(RawTable::from_rows(header_row, rows)))
    }
}
