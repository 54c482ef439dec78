//! 產品目錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::UnitOfMeasure;

/// 產品條目（每月每產品一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// 類別
    pub category: Option<String>,

    /// 品名
    pub article: String,

    /// 計量單位代碼（原始字串）
    pub unit_of_measure: String,

    /// 消耗係數（每份早餐的消耗量）
    ///
    /// `None` 表示來源儲存格無法解析，規劃時一律排除。
    pub coefficient: Option<Decimal>,
}

impl ProductEntry {
    /// 創建新的產品條目
    pub fn new(article: String, unit_of_measure: String, coefficient: Decimal) -> Self {
        Self {
            category: None,
            article,
            unit_of_measure,
            coefficient: Some(coefficient),
        }
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// 建構器模式：設置係數（`None` 表示未知）
    pub fn with_coefficient(mut self, coefficient: Option<Decimal>) -> Self {
        self.coefficient = coefficient;
        self
    }

    /// 解析後的計量單位
    pub fn unit(&self) -> UnitOfMeasure {
        UnitOfMeasure::parse(&self.unit_of_measure)
    }

    /// 取得可用於規劃的正係數
    pub fn plannable_coefficient(&self) -> Option<Decimal> {
        self.coefficient.filter(|c| *c > Decimal::ZERO)
    }

    /// 是否屬於指定類別
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// 產品目錄（按月份，保留載入順序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    months: Vec<(String, Vec<ProductEntry>)>,
}

impl ProductCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入某月份的產品表
    pub fn with_month(mut self, month: impl Into<String>, entries: Vec<ProductEntry>) -> Self {
        self.insert_month(month, entries);
        self
    }

    /// 加入或取代某月份的產品表
    pub fn insert_month(&mut self, month: impl Into<String>, entries: Vec<ProductEntry>) {
        let month = month.into();
        match self.months.iter_mut().find(|(name, _)| *name == month) {
            Some((_, existing)) => *existing = entries,
            None => self.months.push((month, entries)),
        }
    }

    /// 取得某月份的產品表
    pub fn month(&self, month: &str) -> Option<&[ProductEntry]> {
        self.months
            .iter()
            .find(|(name, _)| name == month)
            .map(|(_, entries)| entries.as_slice())
    }

    /// 是否包含某月份
    pub fn contains_month(&self, month: &str) -> bool {
        self.month(month).is_some()
    }

    /// 所有月份名稱（載入順序）
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.months.iter().map(|(name, _)| name.as_str())
    }

    /// 某月份出現的類別（首次出現順序）
    pub fn categories(&self, month: &str) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for entry in self.month(month).unwrap_or_default() {
            if let Some(category) = &entry.category {
                if !categories.contains(category) {
                    categories.push(category.clone());
                }
            }
        }
        categories
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }
}
