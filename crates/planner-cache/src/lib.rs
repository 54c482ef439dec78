//! # Planner Cache
//!
//! 目錄快取與失效追蹤

pub mod catalog_cache;
pub mod dirty_tracking;

use thiserror::Error;

// Re-export 主要類型
pub use catalog_cache::{CatalogCache, CatalogLoader, SourceLoader};
pub use dirty_tracking::DirtyTracker;

/// 快取錯誤類型
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("目錄載入失敗: {0}")]
    Load(#[from] planner_io::IngestError),

    #[error("快取鎖定失敗")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, CacheError>;
