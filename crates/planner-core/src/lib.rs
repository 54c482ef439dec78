//! # Planner Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod cost;
pub mod headcount;
pub mod inventory;
pub mod product;
pub mod request;
pub mod unit;

// Re-export 主要類型
pub use catalog::CatalogSet;
pub use config::{MonthReference, PlannerConfig, BUFFER_PERCENT_LIMIT};
pub use cost::{CostCatalog, CostCatalogEntry};
pub use headcount::DailyHeadcount;
pub use inventory::{StockEntry, StockTable};
pub use product::{ProductCatalog, ProductEntry};
pub use request::PlanningRequest;
pub use unit::UnitOfMeasure;

/// 計劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("早餐人數必須至少為 1，實際: {0}")]
    InvalidHeadcount(u32),

    #[error("緩衝百分比必須介於 0 與 {max} 之間，實際: {value}")]
    InvalidBuffer { value: u32, max: u32 },

    #[error("找不到參考月份: {0}")]
    MonthNotFound(String),

    #[error("每日產能必須大於 0")]
    InvalidCapacity,

    #[error("找不到類別: {0}")]
    UnknownCategory(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
