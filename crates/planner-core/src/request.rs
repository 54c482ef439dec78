//! 訂貨規劃請求

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{PlannerConfig, PlannerError, ProductCatalog, ProductEntry};

/// 訂貨規劃請求
///
/// 整條計算管線的唯一輸入；所有結果表都是它與目錄的純函數。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningRequest {
    /// 參考月份（取用該月份的消耗係數）
    pub reference_month: String,

    /// 目標早餐份數
    pub target_headcount: u32,

    /// 緩衝百分比
    pub buffer_percent: u32,

    /// 排除的類別
    pub excluded_categories: BTreeSet<String>,

    /// 是否扣除現有庫存
    pub apply_inventory: bool,
}

impl PlanningRequest {
    /// 創建新的規劃請求（不排除類別、不扣庫存）
    pub fn new(reference_month: String, target_headcount: u32, buffer_percent: u32) -> Self {
        Self {
            reference_month,
            target_headcount,
            buffer_percent,
            excluded_categories: BTreeSet::new(),
            apply_inventory: false,
        }
    }

    /// 建構器模式：排除類別
    pub fn with_excluded_category(mut self, category: String) -> Self {
        self.excluded_categories.insert(category);
        self
    }

    /// 建構器模式：設置排除類別
    pub fn with_excluded_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.excluded_categories = categories.into_iter().collect();
        self
    }

    /// 建構器模式：扣除現有庫存
    pub fn with_inventory(mut self, apply: bool) -> Self {
        self.apply_inventory = apply;
        self
    }

    /// 產品是否因類別被排除（無類別的產品永不排除）
    pub fn excludes(&self, product: &ProductEntry) -> bool {
        product
            .category
            .as_ref()
            .is_some_and(|c| self.excluded_categories.contains(c))
    }

    /// 在執行管線前驗證請求
    ///
    /// 管線本身假設輸入已驗證，不再重複檢查。
    pub fn validate(&self, catalog: &ProductCatalog, config: &PlannerConfig) -> crate::Result<()> {
        if self.target_headcount < 1 {
            return Err(PlannerError::InvalidHeadcount(self.target_headcount));
        }

        let max = config.buffer_limit();
        if self.buffer_percent > max {
            return Err(PlannerError::InvalidBuffer {
                value: self.buffer_percent,
                max,
            });
        }

        if !catalog.contains_month(&self.reference_month) {
            return Err(PlannerError::MonthNotFound(self.reference_month.clone()));
        }

        if config.daily_capacity == 0 {
            return Err(PlannerError::InvalidCapacity);
        }

        Ok(())
    }
}
