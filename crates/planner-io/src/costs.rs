//! 成本目錄載入

use std::path::Path;

use planner_core::{CostCatalog, CostCatalogEntry};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::file_parser::{field, CsvParser, RawRecord};
use crate::numeric::{parse_cost, parse_decimal};

const DESCRIPTION: &[&str] = &["Descrizione", "Description", "Articolo"];
const UNIT_COST: &[&str] = &["Euro Medio", "Unit Cost"];
const SOURCE_UNIT: &[&str] = &["U.M.A.", "Source Unit"];
const TARGET_UNIT: &[&str] = &["U.M.C.", "Target Unit"];
const CONVERSION_FACTOR: &[&str] = &["Coeff Conv", "Conversion Factor"];
const CLASS: &[&str] = &["Classe", "Class"];

/// 成本目錄載入器
pub struct CostCatalogLoader;

impl CostCatalogLoader {
    /// 從 CSV 載入成本目錄（保留檔案順序）
    pub fn from_csv(path: &Path) -> Result<CostCatalog> {
        let table = CsvParser::parse(path)?;
        table.require_column(DESCRIPTION, path)?;

        let catalog: CostCatalog = table.records.iter().filter_map(Self::entry).collect();
        tracing::info!("成本目錄載入完成: {} 筆", catalog.len());
        Ok(catalog)
    }

    fn entry(record: &RawRecord) -> Option<CostCatalogEntry> {
        let description = field(record, DESCRIPTION)?;
        let unit_cost = field(record, UNIT_COST).map(parse_cost).unwrap_or(Decimal::ZERO);

        // 空白換算係數預設為 1；無法解析時為 0，計算成本時視為未知
        let conversion_factor = match field(record, CONVERSION_FACTOR) {
            None => Decimal::ONE,
            Some(raw) => parse_decimal(raw).unwrap_or_else(|| {
                tracing::warn!("{} 的換算係數無法解析: {}", description, raw);
                Decimal::ZERO
            }),
        };

        let mut entry = CostCatalogEntry::new(description.to_string(), unit_cost)
            .with_units(
                field(record, SOURCE_UNIT).unwrap_or_default().to_string(),
                field(record, TARGET_UNIT).unwrap_or_default().to_string(),
            )
            .with_conversion_factor(conversion_factor);
        if let Some(class) = field(record, CLASS) {
            entry = entry.with_class(class.to_string());
        }
        Some(entry)
    }
}
