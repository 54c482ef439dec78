//! 目錄來源（檔案路徑集合）

use std::path::{Path, PathBuf};

use planner_core::{CatalogSet, CostCatalog};
use serde::{Deserialize, Serialize};

use crate::costs::CostCatalogLoader;
use crate::error::Result;
use crate::headcounts::HeadcountLoader;
use crate::products::ProductCatalogLoader;

/// 一次工作階段使用的資料檔
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    /// 產品目錄：XLSX 活頁簿或每月 CSV 的目錄
    pub catalog: PathBuf,

    /// 成本目錄 CSV
    pub costs: Option<PathBuf>,

    /// 每日實際份數 CSV
    pub headcounts: Option<PathBuf>,
}

impl CatalogSource {
    pub fn new(catalog: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
            costs: None,
            headcounts: None,
        }
    }

    /// 建構器模式：設置成本目錄
    pub fn with_costs(mut self, path: impl Into<PathBuf>) -> Self {
        self.costs = Some(path.into());
        self
    }

    /// 建構器模式：設置每日份數
    pub fn with_headcounts(mut self, path: impl Into<PathBuf>) -> Self {
        self.headcounts = Some(path.into());
        self
    }

    /// 所有來源檔案路徑
    pub fn paths(&self) -> Vec<&Path> {
        std::iter::once(self.catalog.as_path())
            .chain(self.costs.as_deref())
            .chain(self.headcounts.as_deref())
            .collect()
    }

    /// 載入所有目錄
    ///
    /// 產品目錄無法開啟時回傳錯誤；成本與份數檔缺失時記錄警告並以空表繼續。
    pub fn load(&self, months: &[&str]) -> Result<CatalogSet> {
        let products = ProductCatalogLoader::load(&self.catalog, months)?;

        let costs = match &self.costs {
            Some(path) => CostCatalogLoader::from_csv(path).unwrap_or_else(|e| {
                tracing::warn!("無法載入成本目錄，成本將視為未知: {}", e);
                CostCatalog::default()
            }),
            None => CostCatalog::default(),
        };

        let headcounts = match &self.headcounts {
            Some(path) => HeadcountLoader::from_csv(path).unwrap_or_else(|e| {
                tracing::warn!("無法載入每日份數: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(CatalogSet::new(products, costs).with_headcounts(headcounts))
    }
}
