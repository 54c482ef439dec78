//! 成本估算

use planner_core::{CostCatalogEntry, PlannerError};
use rust_decimal::Decimal;

/// 成本估算器
///
/// 未比對到成本的產品回傳 `None`，合計時視為 0（會低估總額，屬已知精度缺口）。
pub struct CostEstimator;

impl CostEstimator {
    /// 數量成本 = 數量 × 單位成本（緩衝階段與實際下單階段）
    pub fn quantity_cost(quantity: Decimal, entry: Option<&CostCatalogEntry>) -> Option<Decimal> {
        entry.and_then(|e| quantity.checked_mul(e.unit_cost))
    }

    /// 預計消耗的理論成本 = 單位成本 × 預計消耗 / 換算係數
    ///
    /// 換算係數為 0 時視為成本未知，不會觸發除以零。
    pub fn theoretical_cost(
        predicted_consumption: Decimal,
        entry: Option<&CostCatalogEntry>,
    ) -> Option<Decimal> {
        let entry = entry?;
        if !entry.has_usable_conversion() {
            return None;
        }
        entry
            .unit_cost
            .checked_mul(predicted_consumption)?
            .checked_div(entry.conversion_factor)
    }

    /// 合計已知成本
    pub fn total<I>(costs: I) -> planner_core::Result<Decimal>
    where
        I: IntoIterator<Item = Option<Decimal>>,
    {
        costs
            .into_iter()
            .flatten()
            .try_fold(Decimal::ZERO, |acc, cost| acc.checked_add(cost))
            .ok_or_else(|| PlannerError::CalculationError("成本合計溢位".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bread() -> CostCatalogEntry {
        CostCatalogEntry::new("PANE".to_string(), dec!(2.40)).with_conversion_factor(dec!(2))
    }

    #[test]
    fn test_quantity_cost() {
        assert_eq!(CostEstimator::quantity_cost(dec!(6), Some(&bread())), Some(dec!(14.40)));
        assert_eq!(CostEstimator::quantity_cost(dec!(6), None), None);
    }

    #[test]
    fn test_theoretical_cost_uses_conversion_factor() {
        // 2.40 × 5 / 2 = 6
        assert_eq!(CostEstimator::theoretical_cost(dec!(5), Some(&bread())), Some(dec!(6)));
    }

    #[test]
    fn test_zero_conversion_factor_is_unknown_cost() {
        let entry = bread().with_conversion_factor(Decimal::ZERO);

        assert_eq!(CostEstimator::theoretical_cost(dec!(5), Some(&entry)), None);
        // 數量成本不使用換算係數
        assert_eq!(CostEstimator::quantity_cost(dec!(5), Some(&entry)), Some(dec!(12.00)));
    }

    #[test]
    fn test_total_skips_unknown_costs() {
        let total = CostEstimator::total(vec![Some(dec!(1.5)), None, Some(dec!(2))]).unwrap();
        assert_eq!(total, dec!(3.5));
        assert_eq!(CostEstimator::total(Vec::new()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_total_overflow_is_error() {
        let err = CostEstimator::total(vec![Some(Decimal::MAX), Some(Decimal::ONE)]).unwrap_err();
        assert!(matches!(err, PlannerError::CalculationError(_)));
    }
}
