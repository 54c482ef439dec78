//! 產品目錄載入（每月一張表）

use std::path::Path;

use planner_core::{ProductCatalog, ProductEntry};
use rust_decimal::Decimal;

use crate::error::{IngestError, Result};
use crate::file_parser::{field, CsvParser, ExcelParser, RawRecord, RawTable};
use crate::numeric::parse_decimal;

/// 月份工作表在表頭前的說明列數
pub const SHEET_HEADER_OFFSET: usize = 3;

const CATEGORY: &[&str] = &["Categoria", "Category"];
const ARTICLE: &[&str] = &["Articolo", "Article"];
const UNIT: &[&str] = &["UDM", "Unit", "UOM"];
const COEFFICIENT: &[&str] = &["Coefficiente", "Coefficient"];

/// 產品目錄載入器
pub struct ProductCatalogLoader;

impl ProductCatalogLoader {
    /// 依路徑類型載入：目錄 → 每月 CSV；否則 → XLSX 活頁簿
    pub fn load(path: &Path, months: &[&str]) -> Result<ProductCatalog> {
        if path.is_dir() {
            Self::from_csv_dir(path, months)
        } else {
            Self::from_workbook(path, months)
        }
    }

    /// 從活頁簿載入，每個月份一張工作表
    ///
    /// 缺少的工作表記錄警告後略過。
    pub fn from_workbook(path: &Path, months: &[&str]) -> Result<ProductCatalog> {
        let mut parser = ExcelParser::open(path)?;
        let mut catalog = ProductCatalog::new();

        for month in months {
            match parser.parse_sheet(month, SHEET_HEADER_OFFSET) {
                Ok(Some(table)) => {
                    catalog.insert_month(*month, Self::entries(&table));
                }
                Ok(None) => tracing::warn!("活頁簿 {} 缺少工作表 {}，略過", path.display(), month),
                Err(e) => tracing::warn!("無法載入工作表 {}: {}", month, e),
            }
        }

        tracing::info!("產品目錄載入完成: {} 個月份", catalog.len());
        Ok(catalog)
    }

    /// 從目錄載入 `<月份>.csv`
    pub fn from_csv_dir(dir: &Path, months: &[&str]) -> Result<ProductCatalog> {
        if !dir.is_dir() {
            return Err(IngestError::FileNotFound(dir.display().to_string()));
        }

        let mut catalog = ProductCatalog::new();
        for month in months {
            let file = dir.join(format!("{month}.csv"));
            match CsvParser::parse(&file) {
                Ok(table) => catalog.insert_month(*month, Self::entries(&table)),
                Err(e) => tracing::warn!("無法載入月份 {}: {}", month, e),
            }
        }

        tracing::info!("產品目錄載入完成: {} 個月份", catalog.len());
        Ok(catalog)
    }

    fn entries(table: &RawTable) -> Vec<ProductEntry> {
        table.records.iter().filter_map(Self::entry).collect()
    }

    fn entry(record: &RawRecord) -> Option<ProductEntry> {
        let article = field(record, ARTICLE).unwrap_or_default();
        let raw_coefficient = field(record, COEFFICIENT);
        let coefficient = raw_coefficient.and_then(parse_decimal);

        // 沒有品名也沒有係數的列（小計、註解）
        if article.is_empty() && coefficient.is_none() {
            return None;
        }
        if let (Some(raw), None) = (raw_coefficient, coefficient) {
            tracing::warn!("產品 {} 的係數無法解析: {}", article, raw);
        }

        let mut entry = ProductEntry::new(
            article.to_string(),
            field(record, UNIT).unwrap_or_default().to_string(),
            Decimal::ZERO,
        )
        .with_coefficient(coefficient);
        if let Some(category) = field(record, CATEGORY) {
            entry = entry.with_category(category.to_string());
        }
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn write_month(dir: &TempDir, month: &str, body: &str) {
        fs::write(dir.path().join(format!("{month}.csv")), body).unwrap();
    }

    #[test]
    fn test_load_csv_dir() {
        let dir = TempDir::new().unwrap();
        write_month(
            &dir,
            "Aprile",
            "Categoria,Articolo,UDM,Coefficiente\n\
             BEVANDE,Latte,l,\"0,25\"\n\
             PANE,Pane,kg,0.05\n\
             NOTE,,,\n\
             PANE,Cornetto,pz,n/d\n",
        );
        write_month(&dir, "Maggio", "Category,Article,Unit,Coefficient\nFRUTTA,Mele,kg,0.1\n");

        let catalog =
            ProductCatalogLoader::load(dir.path(), &["Aprile", "Maggio", "Giugno"]).unwrap();

        assert_eq!(catalog.months().collect::<Vec<_>>(), vec!["Aprile", "Maggio"]);

        let april = catalog.month("Aprile").unwrap();
        assert_eq!(april.len(), 3);
        assert_eq!(april[0].coefficient, Some(dec!(0.25)));
        assert_eq!(april[0].category.as_deref(), Some("BEVANDE"));
        // 無法解析的係數保留為未知
        assert_eq!(april[2].article, "Cornetto");
        assert_eq!(april[2].coefficient, None);

        let may = catalog.month("Maggio").unwrap();
        assert_eq!(may[0].unit_of_measure, "kg");
    }

    #[test]
    fn test_missing_directory() {
        let result = ProductCatalogLoader::from_csv_dir(Path::new("/no/such/dir"), &["Aprile"]);
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_workbook() {
        let result = ProductCatalogLoader::load(Path::new("missing.xlsx"), &["Aprile"]);
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }
}
