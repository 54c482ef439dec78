//! 消耗量推算

use planner_core::PlannerError;
use rust_decimal::Decimal;

/// 消耗量推算器
pub struct ConsumptionProjector;

impl ConsumptionProjector {
    /// 預計消耗 = 係數 × 目標份數
    ///
    /// 僅對正係數定義；非正係數的產品在上游已被排除。
    /// 乘積超出 `Decimal` 範圍時回傳 [`PlannerError::CalculationError`]。
    pub fn project(coefficient: Decimal, target_headcount: u32) -> planner_core::Result<Decimal> {
        coefficient
            .checked_mul(Decimal::from(target_headcount))
            .ok_or_else(|| {
                PlannerError::CalculationError(format!(
                    "預計消耗溢位：係數 {coefficient} × 份數 {target_headcount}"
                ))
            })
    }
}
