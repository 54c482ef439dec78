//! 載入後的目錄集合

use serde::{Deserialize, Serialize};

use crate::{CostCatalog, DailyHeadcount, ProductCatalog};

/// 一次工作階段載入的所有目錄
///
/// 載入後唯讀共享，計算元件不會就地修改。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSet {
    /// 月份產品目錄
    pub products: ProductCatalog,

    /// 成本目錄
    pub costs: CostCatalog,

    /// 歷史每日早餐份數
    pub headcounts: Vec<DailyHeadcount>,
}

impl CatalogSet {
    pub fn new(products: ProductCatalog, costs: CostCatalog) -> Self {
        Self {
            products,
            costs,
            headcounts: Vec::new(),
        }
    }

    /// 建構器模式：設置歷史份數
    pub fn with_headcounts(mut self, headcounts: Vec<DailyHeadcount>) -> Self {
        self.headcounts = headcounts;
        self
    }
}
