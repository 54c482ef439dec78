//! 每日早餐份數載入

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use planner_core::DailyHeadcount;
use rust_decimal::prelude::ToPrimitive;

use crate::error::Result;
use crate::file_parser::{field, CsvParser};
use crate::numeric::parse_decimal;

const DATE: &[&str] = &["data", "date"];
const BREAKFASTS: &[&str] = &["CONSUMO REALE COLAZIONI", "Breakfasts"];

/// 每日份數載入器
pub struct HeadcountLoader;

impl HeadcountLoader {
    /// 從 CSV 載入每日實際份數（依日期排序）
    ///
    /// 日期或份數無法解析的列記錄警告後略過。
    pub fn from_csv(path: &Path) -> Result<Vec<DailyHeadcount>> {
        let table = CsvParser::parse(path)?;
        table.require_column(DATE, path)?;
        table.require_column(BREAKFASTS, path)?;

        let mut records = Vec::new();
        for (row, record) in table.records.iter().enumerate() {
            let raw_date = field(record, DATE).unwrap_or_default();
            let Some(date) = parse_date(raw_date) else {
                tracing::warn!("第 {} 列日期無法解析: {:?}", row + 1, raw_date);
                continue;
            };

            let raw_count = field(record, BREAKFASTS).unwrap_or_default();
            let Some(breakfasts) = parse_decimal(raw_count).and_then(|d| d.round().to_u32())
            else {
                tracing::warn!("第 {} 列份數無法解析: {:?}", row + 1, raw_count);
                continue;
            };

            records.push(DailyHeadcount::new(date, breakfasts));
        }

        records.sort_by_key(|record| record.date);
        tracing::info!("每日份數載入完成: {} 天", records.len());
        Ok(records)
    }
}

/// 解析 `日/月/年 時.分.秒` 或 `日/月/年`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H.%M.%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
