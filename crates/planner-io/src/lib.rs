//! # Planner IO
//!
//! 資料匯入（CSV / XLSX）、訂貨報表與 CSV 匯出

pub mod costs;
pub mod error;
pub mod export;
pub mod file_parser;
pub mod headcounts;
pub mod numeric;
pub mod products;
pub mod report;
pub mod source;
pub mod stock;

// Re-export 主要類型
pub use costs::CostCatalogLoader;
pub use error::{IngestError, Result};
pub use export::CsvExporter;
pub use headcounts::HeadcountLoader;
pub use products::ProductCatalogLoader;
pub use report::OrderReport;
pub use source::CatalogSource;
pub use stock::StockLoader;
