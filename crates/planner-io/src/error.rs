//! 匯入與匯出錯誤類型

use thiserror::Error;

/// 匯入模組錯誤類型
#[derive(Error, Debug)]
pub enum IngestError {
    // ===== 檔案相關錯誤 =====
    #[error("檔案不存在: {0}")]
    FileNotFound(String),

    #[error("檔案格式不支援: {0}（僅支援 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("檔案讀寫失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel 解析失敗: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失敗: {0}")]
    Csv(#[from] csv::Error),

    // ===== 資料映射錯誤 =====
    #[error("缺少欄位 {column}（檔案 {file}）")]
    MissingColumn { file: String, column: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
