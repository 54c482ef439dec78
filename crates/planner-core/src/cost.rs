//! 成本目錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 成本目錄條目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCatalogEntry {
    /// 品項描述（比對鍵）
    pub description: String,

    /// 平均單位成本
    pub unit_cost: Decimal,

    /// 採購單位
    pub source_unit: String,

    /// 消耗單位
    pub target_unit: String,

    /// 單位換算係數
    pub conversion_factor: Decimal,

    /// 成本分類（FOOD、BEVERAGE ...）
    pub class: Option<String>,
}

impl CostCatalogEntry {
    /// 創建新的成本條目（換算係數預設為 1）
    pub fn new(description: String, unit_cost: Decimal) -> Self {
        Self {
            description,
            unit_cost,
            source_unit: String::new(),
            target_unit: String::new(),
            conversion_factor: Decimal::ONE,
            class: None,
        }
    }

    /// 建構器模式：設置單位對
    pub fn with_units(mut self, source_unit: String, target_unit: String) -> Self {
        self.source_unit = source_unit;
        self.target_unit = target_unit;
        self
    }

    /// 建構器模式：設置換算係數
    pub fn with_conversion_factor(mut self, factor: Decimal) -> Self {
        self.conversion_factor = factor;
        self
    }

    /// 建構器模式：設置成本分類
    pub fn with_class(mut self, class: String) -> Self {
        self.class = Some(class);
        self
    }

    /// 換算係數是否可用（非零）
    pub fn has_usable_conversion(&self) -> bool {
        !self.conversion_factor.is_zero()
    }
}

/// 成本目錄（保留檔案順序，比對為先到先得）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostCatalog {
    entries: Vec<CostCatalogEntry>,
}

impl CostCatalog {
    pub fn new(entries: Vec<CostCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CostCatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<CostCatalogEntry> for CostCatalog {
    fn from_iter<I: IntoIterator<Item = CostCatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_entry_builder() {
        let entry = CostCatalogEntry::new("PANE INTEGRALE".to_string(), dec!(3.20))
            .with_units("KG".to_string(), "G".to_string())
            .with_conversion_factor(dec!(1000))
            .with_class("FOOD".to_string());

        assert_eq!(entry.unit_cost, dec!(3.20));
        assert_eq!(entry.source_unit, "KG");
        assert_eq!(entry.conversion_factor, dec!(1000));
        assert_eq!(entry.class.as_deref(), Some("FOOD"));
        assert!(entry.has_usable_conversion());
    }

    #[test]
    fn test_zero_conversion_factor_flagged() {
        let entry = CostCatalogEntry::new("LATTE".to_string(), dec!(1.1))
            .with_conversion_factor(Decimal::ZERO);

        assert!(!entry.has_usable_conversion());
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog: CostCatalog = ["B", "A", "C"]
            .into_iter()
            .map(|d| CostCatalogEntry::new(d.to_string(), Decimal::ONE))
            .collect();

        let order: Vec<_> = catalog.entries().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(catalog.len(), 3);
    }
}
