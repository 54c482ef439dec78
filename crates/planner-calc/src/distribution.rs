//! 天數分配

use planner_core::PlannerError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 天數分配結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDistribution {
    /// 目標份數
    pub target_headcount: u32,
    /// 每日上限
    pub daily_capacity: u32,
    /// 最少需要的天數
    pub days_needed: u32,
    /// 平均每日份數（兩位小數，向上取）
    pub per_day_average: Decimal,
}

impl DayDistribution {
    /// 每日整數份數，相差不超過 1，較大的排在前面
    pub fn daily_loads(&self) -> Vec<u32> {
        let base = self.target_headcount / self.days_needed;
        let extra = self.target_headcount % self.days_needed;
        (0..self.days_needed)
            .map(|day| if day < extra { base + 1 } else { base })
            .collect()
    }
}

/// 天數分配計算器
pub struct DayDistributionPlanner;

impl DayDistributionPlanner {
    /// 依每日上限計算最少天數與平均每日份數
    pub fn distribute(target_headcount: u32, daily_capacity: u32) -> planner_core::Result<DayDistribution> {
        if daily_capacity == 0 {
            return Err(PlannerError::InvalidCapacity);
        }
        if target_headcount == 0 {
            return Err(PlannerError::InvalidHeadcount(target_headcount));
        }

        let days_needed = target_headcount.div_ceil(daily_capacity);

        // 向上取到兩位小數，確保 平均 × 天數 ≥ 目標份數
        let per_day_average = (Decimal::from(target_headcount) / Decimal::from(days_needed))
            .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity);

        tracing::debug!(
            "天數分配: {} 份 / 上限 {} = {} 天，平均 {}",
            target_headcount,
            daily_capacity,
            days_needed,
            per_day_average
        );

        Ok(DayDistribution {
            target_headcount,
            daily_capacity,
            days_needed,
            per_day_average,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(300, 2, dec!(150.0))]
    #[case(194, 1, dec!(194.0))]
    #[case(195, 2, dec!(97.5))]
    #[case(1, 1, dec!(1))]
    #[case(1000, 6, dec!(166.67))]
    fn test_reference_capacity(
        #[case] headcount: u32,
        #[case] days: u32,
        #[case] average: Decimal,
    ) {
        let result = DayDistributionPlanner::distribute(headcount, 194).unwrap();
        assert_eq!(result.days_needed, days);
        assert_eq!(result.per_day_average, average);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            DayDistributionPlanner::distribute(100, 0),
            Err(PlannerError::InvalidCapacity)
        ));
        assert!(matches!(
            DayDistributionPlanner::distribute(0, 194),
            Err(PlannerError::InvalidHeadcount(0))
        ));
    }

    #[test]
    fn test_daily_loads() {
        let result = DayDistributionPlanner::distribute(301, 194).unwrap();
        assert_eq!(result.daily_loads(), vec![151, 150]);

        let result = DayDistributionPlanner::distribute(388, 194).unwrap();
        assert_eq!(result.daily_loads(), vec![194, 194]);
    }

    proptest! {
        #[test]
        fn prop_distribution_covers_headcount_within_capacity(
            headcount in 1u32..50_000,
            capacity in 1u32..1_000,
        ) {
            let result = DayDistributionPlanner::distribute(headcount, capacity).unwrap();

            prop_assert!(result.per_day_average * Decimal::from(result.days_needed) >= Decimal::from(headcount));
            prop_assert!(result.per_day_average <= Decimal::from(capacity));

            let loads = result.daily_loads();
            prop_assert_eq!(loads.iter().sum::<u32>(), headcount);
            prop_assert!(loads.iter().all(|load| *load <= capacity));
        }
    }
}
