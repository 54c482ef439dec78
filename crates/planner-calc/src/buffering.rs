//! 緩衝與取整規則

use planner_core::{PlannerError, UnitOfMeasure};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 低於此預計消耗量的離散單位產品，至少多備一個單位
const MINIMUM_BUMP_THRESHOLD: Decimal = Decimal::TEN;

/// 緩衝計算結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferedQuantity {
    /// 膨脹後、取整前的數量
    pub raw_buffered: Decimal,
    /// 取整後的緩衝數量
    pub buffered_quantity: Decimal,
    /// 實際加上的緩衝量（緩衝數量 - 預計消耗）
    pub buffer_applied: Decimal,
    /// 是否觸發最小加量規則
    pub minimum_bump_applied: bool,
}

/// 緩衝計算器
pub struct BufferCalculator;

impl BufferCalculator {
    /// 套用緩衝
    ///
    /// 1. 依百分比膨脹
    /// 2. 離散單位且預計消耗 < 10 時，至少為預計消耗 + 1
    /// 3. 離散單位無條件進位，其餘單位取兩位小數
    ///
    /// 膨脹後超出 `Decimal` 範圍時回傳 [`PlannerError::CalculationError`]。
    pub fn apply(
        predicted_consumption: Decimal,
        buffer_percent: u32,
        unit: UnitOfMeasure,
    ) -> planner_core::Result<BufferedQuantity> {
        let factor = Decimal::ONE + Decimal::from(buffer_percent) / Decimal::ONE_HUNDRED;
        let mut raw_buffered = predicted_consumption.checked_mul(factor).ok_or_else(|| {
            PlannerError::CalculationError(format!(
                "緩衝數量溢位：{predicted_consumption} × {factor}"
            ))
        })?;

        let mut minimum_bump_applied = false;
        if unit.is_discrete() && predicted_consumption < MINIMUM_BUMP_THRESHOLD {
            let floor = predicted_consumption + Decimal::ONE;
            if raw_buffered < floor {
                raw_buffered = floor;
                minimum_bump_applied = true;
            }
        }

        let buffered_quantity = Self::round_buffered(raw_buffered, unit);

        Ok(BufferedQuantity {
            raw_buffered,
            buffered_quantity,
            buffer_applied: buffered_quantity - predicted_consumption,
            minimum_bump_applied,
        })
    }

    /// 緩衝階段取整：離散單位向上取整，其餘四捨六入到兩位小數
    ///
    /// 與淨額階段的取整規則不同，不可合併。
    pub fn round_buffered(quantity: Decimal, unit: UnitOfMeasure) -> Decimal {
        if unit.is_discrete() {
            quantity.ceil()
        } else {
            quantity.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_kilogram_quantity_bumped() {
        // 5 kg + 10% = 5.5，但最小加量規則要求至少 6
        let result = BufferCalculator::apply(dec!(5.0), 10, UnitOfMeasure::Kilogram).unwrap();

        assert_eq!(result.raw_buffered, dec!(6.0));
        assert_eq!(result.buffered_quantity, dec!(6));
        assert_eq!(result.buffer_applied, dec!(1));
        assert!(result.minimum_bump_applied);
    }

    #[test]
    fn test_bump_applies_with_zero_buffer() {
        let result = BufferCalculator::apply(dec!(3), 0, UnitOfMeasure::Piece).unwrap();
        assert_eq!(result.buffered_quantity, dec!(4));
    }

    #[test]
    fn test_large_discrete_quantity_uses_percentage() {
        // 40 件 + 10% = 44，不觸發最小加量
        let result = BufferCalculator::apply(dec!(40), 10, UnitOfMeasure::Piece).unwrap();
        assert_eq!(result.buffered_quantity, dec!(44));
        assert!(!result.minimum_bump_applied);

        // 12.3 conf + 5% = 12.915 → 13
        let result = BufferCalculator::apply(dec!(12.3), 5, UnitOfMeasure::Package).unwrap();
        assert_eq!(result.buffered_quantity, dec!(13));
    }

    #[test]
    fn test_continuous_unit_rounds_to_two_decimals() {
        // 公克不屬於離散單位：不加量、不進位
        let result = BufferCalculator::apply(dec!(3.333), 10, UnitOfMeasure::Gram).unwrap();
        assert_eq!(result.raw_buffered, dec!(3.6663));
        assert_eq!(result.buffered_quantity, dec!(3.67));
        assert!(!result.minimum_bump_applied);

        let result = BufferCalculator::apply(dec!(7.5), 0, UnitOfMeasure::Liter).unwrap();
        assert_eq!(result.buffered_quantity, dec!(7.5));
        assert_eq!(result.buffer_applied, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_buffer_is_error() {
        let err = BufferCalculator::apply(Decimal::MAX, 10, UnitOfMeasure::Liter).unwrap_err();
        assert!(matches!(err, PlannerError::CalculationError(_)));
    }

    #[rstest]
    #[case(dec!(9.99), UnitOfMeasure::Piece, dec!(11))]
    #[case(dec!(10), UnitOfMeasure::Piece, dec!(11))]
    #[case(dec!(0.4), UnitOfMeasure::Package, dec!(2))]
    #[case(dec!(0.4), UnitOfMeasure::Other, dec!(0.44))]
    fn test_buffer_cases(
        #[case] predicted: Decimal,
        #[case] unit: UnitOfMeasure,
        #[case] expected: Decimal,
    ) {
        assert_eq!(BufferCalculator::apply(predicted, 10, unit).unwrap().buffered_quantity, expected);
    }

    fn discrete_unit() -> impl Strategy<Value = UnitOfMeasure> {
        prop_oneof![
            Just(UnitOfMeasure::Piece),
            Just(UnitOfMeasure::Kilogram),
            Just(UnitOfMeasure::Package),
        ]
    }

    proptest! {
        #[test]
        fn prop_small_discrete_gets_at_least_one_extra_unit(
            mantissa in 1i64..10_000,
            buffer in 0u32..=50,
            unit in discrete_unit(),
        ) {
            // 0.001 .. 9.999
            let predicted = Decimal::new(mantissa, 3);
            let result = BufferCalculator::apply(predicted, buffer, unit).unwrap();

            prop_assert!(result.buffered_quantity >= predicted + Decimal::ONE);
        }

        #[test]
        fn prop_discrete_is_integer_ceiling(
            mantissa in 1i64..100_000_000,
            buffer in 0u32..=50,
            unit in discrete_unit(),
        ) {
            let predicted = Decimal::new(mantissa, 4);
            let result = BufferCalculator::apply(predicted, buffer, unit).unwrap();

            prop_assert_eq!(result.buffered_quantity.fract(), Decimal::ZERO);
            prop_assert!(result.buffered_quantity >= result.raw_buffered);
            prop_assert!(result.buffered_quantity - result.raw_buffered < Decimal::ONE);
        }
    }
}
