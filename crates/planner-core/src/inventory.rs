//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 現有庫存記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    /// 品名
    pub article: String,

    /// 現有庫存（不小於 0）
    pub quantity_on_hand: Decimal,
}

impl StockEntry {
    /// 創建新的庫存記錄，負數視為 0
    pub fn new(article: String, quantity_on_hand: Decimal) -> Self {
        Self {
            article,
            quantity_on_hand: quantity_on_hand.max(Decimal::ZERO),
        }
    }
}

/// 庫存表（以品名精確比對）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockTable {
    quantities: HashMap<String, Decimal>,
}

impl StockTable {
    /// 創建空庫存表
    pub fn new() -> Self {
        Self::default()
    }

    /// 從庫存記錄建立（重複品名以後者為準）
    pub fn from_entries(entries: impl IntoIterator<Item = StockEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.set(entry);
        }
        table
    }

    /// 設置庫存
    pub fn set(&mut self, entry: StockEntry) {
        self.quantities
            .insert(entry.article.trim().to_string(), entry.quantity_on_hand);
    }

    /// 取得現有庫存，找不到時為 0
    pub fn on_hand(&self, article: &str) -> Decimal {
        self.quantities
            .get(article.trim())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 是否有該品名的庫存記錄
    pub fn contains(&self, article: &str) -> bool {
        self.quantities.contains_key(article.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_stock_entry() {
        let entry = StockEntry::new("Latte".to_string(), dec!(4.5));
        assert_eq!(entry.quantity_on_hand, dec!(4.5));

        // 負庫存視為 0
        let negative = StockEntry::new("Burro".to_string(), dec!(-3));
        assert_eq!(negative.quantity_on_hand, Decimal::ZERO);
    }

    #[test]
    fn test_unmatched_article_defaults_to_zero() {
        let table = StockTable::from_entries(vec![StockEntry::new("Latte".to_string(), dec!(2))]);

        assert_eq!(table.on_hand("Latte"), dec!(2));
        assert_eq!(table.on_hand(" Latte "), dec!(2));
        assert_eq!(table.on_hand("Caffè"), Decimal::ZERO);
        assert!(!table.contains("Caffè"));
    }

    #[test]
    fn test_duplicate_article_last_wins() {
        let table = StockTable::from_entries(vec![
            StockEntry::new("Pane".to_string(), dec!(1)),
            StockEntry::new("Pane".to_string(), dec!(7)),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.on_hand("Pane"), dec!(7));
    }
}
