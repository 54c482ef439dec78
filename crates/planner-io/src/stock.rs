//! 庫存表載入

use std::path::Path;

use planner_core::{StockEntry, StockTable};

use crate::error::Result;
use crate::file_parser::{field, CsvParser};
use crate::numeric::parse_quantity;

const ARTICLE: &[&str] = &["Articolo", "Article"];
const QUANTITY: &[&str] = &["Giacenza", "Quantity", "Quantità"];

/// 庫存表載入器
pub struct StockLoader;

impl StockLoader {
    /// 從 CSV 載入庫存
    ///
    /// 數量接受逗號小數；無法解析或為負時視為 0。重複品名以後者為準。
    pub fn from_csv(path: &Path) -> Result<StockTable> {
        let table = CsvParser::parse(path)?;
        table.require_column(ARTICLE, path)?;
        table.require_column(QUANTITY, path)?;

        let stock = StockTable::from_entries(table.records.iter().filter_map(|record| {
            let article = field(record, ARTICLE)?;
            let quantity = field(record, QUANTITY).map(parse_quantity).unwrap_or_default();
            Some(StockEntry::new(article.to_string(), quantity))
        }));

        tracing::info!("庫存表載入完成: {} 筆", stock.len());
        Ok(stock)
    }
}
