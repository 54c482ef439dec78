//! 庫存淨額計算

use planner_core::UnitOfMeasure;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 淨額計算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetRequirement {
    /// 緩衝後需求
    pub buffered_quantity: Decimal,
    /// 現有庫存
    pub stock_on_hand: Decimal,
    /// 取整前淨需求（不小於 0）
    pub raw_net: Decimal,
    /// 取整後應訂購量
    pub to_order: Decimal,
}

/// 淨額計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算淨需求
    ///
    /// 淨需求 = max(0, 緩衝後需求 - 現有庫存)；庫存過多時不會產生負訂單。
    pub fn calculate(
        buffered_quantity: Decimal,
        stock_on_hand: Decimal,
        unit: UnitOfMeasure,
    ) -> NetRequirement {
        let raw_net = (buffered_quantity - stock_on_hand).max(Decimal::ZERO);

        NetRequirement {
            buffered_quantity,
            stock_on_hand,
            raw_net,
            to_order: Self::round_order(raw_net, unit),
        }
    }

    /// 淨額階段取整：件/公斤/公克/包裝取最接近整數（銀行家捨入），其餘取兩位小數
    pub fn round_order(quantity: Decimal, unit: UnitOfMeasure) -> Decimal {
        let dp = if unit.orders_whole_units() { 0 } else { 2 };
        quantity.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
    }
}
