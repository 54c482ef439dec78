//! 歷史月份分析

use std::collections::BTreeSet;

use planner_core::{DailyHeadcount, PlannerConfig, PlannerError, ProductCatalog};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projection::ConsumptionProjector;

/// 月度產品消耗列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRow {
    pub category: Option<String>,
    pub article: String,
    pub unit_of_measure: String,
    pub coefficient: Decimal,
    /// 係數 × 當月實際供應份數
    pub total_consumption: Decimal,
}

/// 類別消耗合計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_consumption: Decimal,
}

/// 月度明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDetail {
    pub month: String,
    pub breakfasts_served: u32,
    pub total_cost: Option<Decimal>,
    pub cost_per_breakfast: Option<Decimal>,
    pub products: Vec<ConsumptionRow>,
    /// 依消耗量由大到小
    pub category_totals: Vec<CategoryTotal>,
}

/// 跨月比較的單列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub month: String,
    pub article: String,
    pub coefficient: Decimal,
    pub total_consumption: Decimal,
}

/// 跨月比較結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub category: String,
    /// 實際納入比較的月份（依請求順序）
    pub months: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl MonthComparison {
    /// 產品 × 月份的樞紐表（產品依首次出現順序）
    pub fn pivot(&self) -> Vec<(String, Vec<Option<Decimal>>)> {
        let mut pivot: Vec<(String, Vec<Option<Decimal>>)> = Vec::new();
        for row in &self.rows {
            let Some(column) = self.months.iter().position(|m| *m == row.month) else {
                continue;
            };
            let position = match pivot.iter().position(|(article, _)| *article == row.article) {
                Some(position) => position,
                None => {
                    pivot.push((row.article.clone(), vec![None; self.months.len()]));
                    pivot.len() - 1
                }
            };
            pivot[position].1[column] = Some(row.total_consumption);
        }
        pivot
    }
}

/// 實際與目標份數比較
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadcountSummary {
    pub month_number: u32,
    pub month_name: Option<String>,
    pub actual_breakfasts: u64,
    pub service_days: usize,
    pub daily_average: Option<Decimal>,
    pub target_breakfasts: Option<u32>,
    /// 實際 - 目標
    pub difference_vs_target: Option<i64>,
    /// 目標份數平均到有資料的天數
    pub target_daily_average: Option<Decimal>,
    /// 當月總成本平均到有資料的天數
    pub cost_per_day: Option<Decimal>,
    pub days: Vec<DailyHeadcount>,
}

/// 歷史分析器
pub struct HistoryAnalyzer;

impl HistoryAnalyzer {
    /// 月度明細：各產品按當月實際份數推算總消耗，並依類別合計
    pub fn monthly_detail(
        catalog: &ProductCatalog,
        config: &PlannerConfig,
        month: &str,
    ) -> planner_core::Result<MonthlyDetail> {
        let products = catalog
            .month(month)
            .ok_or_else(|| PlannerError::MonthNotFound(month.to_string()))?;
        let reference = config.month(month);
        let breakfasts_served = config.breakfasts_served(month);

        let rows = products
            .iter()
            .filter_map(|product| {
                let coefficient = product.plannable_coefficient()?;
                Some(
                    ConsumptionProjector::project(coefficient, breakfasts_served).map(
                        |total_consumption| ConsumptionRow {
                            category: product.category.clone(),
                            article: product.article.clone(),
                            unit_of_measure: product.unit_of_measure.clone(),
                            coefficient,
                            total_consumption,
                        },
                    ),
                )
            })
            .collect::<planner_core::Result<Vec<_>>>()?;

        let mut category_totals: Vec<CategoryTotal> = Vec::new();
        for row in &rows {
            let Some(category) = &row.category else {
                continue;
            };
            match category_totals.iter_mut().find(|t| t.category == *category) {
                Some(total) => {
                    total.total_consumption = total
                        .total_consumption
                        .checked_add(row.total_consumption)
                        .ok_or_else(|| {
                            PlannerError::CalculationError(format!("類別 {category} 合計溢位"))
                        })?;
                }
                None => category_totals.push(CategoryTotal {
                    category: category.clone(),
                    total_consumption: row.total_consumption,
                }),
            }
        }
        category_totals.sort_by(|a, b| {
            b.total_consumption
                .cmp(&a.total_consumption)
                .then_with(|| a.category.cmp(&b.category))
        });

        tracing::debug!(
            "月度明細 {}: {} 產品，{} 類別，{} 份",
            month,
            rows.len(),
            category_totals.len(),
            breakfasts_served
        );

        Ok(MonthlyDetail {
            month: month.to_string(),
            breakfasts_served,
            total_cost: reference.map(|r| r.total_cost),
            cost_per_breakfast: reference.and_then(|r| r.cost_per_breakfast()),
            products: rows,
            category_totals,
        })
    }

    /// 多個月份出現過的所有類別（排序後去重）
    pub fn available_categories(catalog: &ProductCatalog, months: &[String]) -> Vec<String> {
        months
            .iter()
            .flat_map(|month| catalog.categories(month))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 跨月比較某類別的產品消耗
    ///
    /// 目錄中不存在的月份會被略過；類別不在任何所選月份中時回傳錯誤。
    pub fn compare_months(
        catalog: &ProductCatalog,
        config: &PlannerConfig,
        months: &[String],
        category: &str,
    ) -> planner_core::Result<MonthComparison> {
        let available = Self::available_categories(catalog, months);
        if !available.iter().any(|c| c == category) {
            return Err(PlannerError::UnknownCategory(category.to_string()));
        }

        let mut included = Vec::new();
        let mut rows = Vec::new();
        for month in months {
            let Some(products) = catalog.month(month) else {
                tracing::warn!("目錄中沒有月份 {}，略過", month);
                continue;
            };
            if included.contains(month) {
                continue;
            }
            included.push(month.clone());

            let breakfasts_served = config.breakfasts_served(month);
            for product in products
                .iter()
                .filter(|product| product.in_category(category))
                .filter(|product| !product.article.trim().is_empty())
            {
                let Some(coefficient) = product.coefficient else {
                    continue;
                };
                rows.push(ComparisonRow {
                    month: month.clone(),
                    article: product.article.clone(),
                    coefficient,
                    total_consumption: ConsumptionProjector::project(coefficient, breakfasts_served)?,
                });
            }
        }

        Ok(MonthComparison {
            category: category.to_string(),
            months: included,
            rows,
        })
    }

    /// 比較某月份的實際每日份數與目標
    pub fn headcount_summary(
        history: &[DailyHeadcount],
        config: &PlannerConfig,
        month_number: u32,
    ) -> HeadcountSummary {
        let mut days: Vec<DailyHeadcount> = history
            .iter()
            .filter(|record| record.month() == month_number)
            .cloned()
            .collect();
        days.sort_by_key(|record| record.date);

        let reference = config.month_by_number(month_number);
        let actual_breakfasts: u64 = days.iter().map(|d| u64::from(d.breakfasts)).sum();
        let service_days = days.len();

        let per_day = |amount: Decimal| {
            if service_days == 0 {
                None
            } else {
                Some((amount / Decimal::from(service_days)).round_dp(2))
            }
        };

        let target_breakfasts = reference.map(|r| r.breakfasts_served);

        HeadcountSummary {
            month_number,
            month_name: reference.map(|r| r.name.clone()),
            actual_breakfasts,
            service_days,
            daily_average: per_day(Decimal::from(actual_breakfasts)),
            target_breakfasts,
            difference_vs_target: target_breakfasts
                .map(|target| actual_breakfasts as i64 - i64::from(target)),
            target_daily_average: target_breakfasts.and_then(|t| per_day(Decimal::from(t))),
            cost_per_day: reference.and_then(|r| per_day(r.total_cost)),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planner_core::{MonthReference, ProductEntry};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn config() -> PlannerConfig {
        PlannerConfig::new(194)
            .with_month(MonthReference::new("Aprile", 4, 1000, dec!(5000)))
            .with_month(MonthReference::new("Maggio", 5, 2000, dec!(9000)))
    }

    fn catalog() -> ProductCatalog {
        ProductCatalog::new()
            .with_month(
                "Aprile",
                vec![
                    ProductEntry::new("Pane".to_string(), "kg".to_string(), dec!(0.1))
                        .with_category("PANE".to_string()),
                    ProductEntry::new("Latte".to_string(), "l".to_string(), dec!(0.3))
                        .with_category("BEVANDE".to_string()),
                    ProductEntry::new("Fette".to_string(), "pz".to_string(), dec!(0.5))
                        .with_category("PANE".to_string()),
                    ProductEntry::new("Tè".to_string(), "pz".to_string(), Decimal::ZERO)
                        .with_category("BEVANDE".to_string()),
                ],
            )
            .with_month(
                "Maggio",
                vec![
                    ProductEntry::new("Pane".to_string(), "kg".to_string(), dec!(0.12))
                        .with_category("PANE".to_string()),
                    ProductEntry::new("Brioche".to_string(), "pz".to_string(), dec!(0.4))
                        .with_category("PANE".to_string()),
                    ProductEntry::new("Caffè".to_string(), "kg".to_string(), dec!(0.01))
                        .with_category("BEVANDE".to_string()),
                ],
            )
    }

    #[test]
    fn test_monthly_detail() {
        let detail = HistoryAnalyzer::monthly_detail(&catalog(), &config(), "Aprile").unwrap();

        assert_eq!(detail.breakfasts_served, 1000);
        assert_eq!(detail.cost_per_breakfast, Some(dec!(5)));
        // 係數為 0 的產品被排除
        assert_eq!(detail.products.len(), 3);
        assert_eq!(detail.products[0].total_consumption, dec!(100.0));

        let totals: Vec<_> = detail
            .category_totals
            .iter()
            .map(|t| (t.category.as_str(), t.total_consumption))
            .collect();
        assert_eq!(totals, vec![("PANE", dec!(600.0)), ("BEVANDE", dec!(300.0))]);
    }

    #[test]
    fn test_monthly_detail_unknown_month() {
        let err = HistoryAnalyzer::monthly_detail(&catalog(), &config(), "Luglio").unwrap_err();
        assert!(matches!(err, PlannerError::MonthNotFound(_)));
    }

    #[test]
    fn test_compare_months() {
        let months = vec!["Aprile".to_string(), "Maggio".to_string(), "Luglio".to_string()];
        let comparison =
            HistoryAnalyzer::compare_months(&catalog(), &config(), &months, "PANE").unwrap();

        assert_eq!(comparison.months, vec!["Aprile", "Maggio"]);
        assert_eq!(comparison.rows.len(), 4);

        let pivot = comparison.pivot();
        assert_eq!(
            pivot,
            vec![
                ("Pane".to_string(), vec![Some(dec!(100.0)), Some(dec!(240.00))]),
                ("Fette".to_string(), vec![Some(dec!(500.0)), None]),
                ("Brioche".to_string(), vec![None, Some(dec!(800.0))]),
            ]
        );
    }

    #[test]
    fn test_compare_unknown_category() {
        let months = vec!["Aprile".to_string()];
        let err = HistoryAnalyzer::compare_months(&catalog(), &config(), &months, "FRUTTA")
            .unwrap_err();
        assert!(matches!(err, PlannerError::UnknownCategory(c) if c == "FRUTTA"));
    }

    #[test]
    fn test_available_categories_sorted_union() {
        let months = vec!["Maggio".to_string(), "Aprile".to_string()];
        assert_eq!(
            HistoryAnalyzer::available_categories(&catalog(), &months),
            vec!["BEVANDE", "PANE"]
        );
    }

    #[test]
    fn test_headcount_summary() {
        let history = vec![
            DailyHeadcount::new(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(), 40),
            DailyHeadcount::new(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), 30),
            DailyHeadcount::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 99),
            DailyHeadcount::new(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap(), 50),
        ];

        let summary = HistoryAnalyzer::headcount_summary(&history, &config(), 4);

        assert_eq!(summary.month_name.as_deref(), Some("Aprile"));
        assert_eq!(summary.actual_breakfasts, 120);
        assert_eq!(summary.service_days, 3);
        assert_eq!(summary.daily_average, Some(dec!(40)));
        assert_eq!(summary.difference_vs_target, Some(-880));
        assert_eq!(summary.target_daily_average, Some(dec!(333.33)));
        assert_eq!(summary.cost_per_day, Some(dec!(1666.67)));
        assert_eq!(summary.days[0].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_headcount_summary_without_data() {
        let summary = HistoryAnalyzer::headcount_summary(&[], &config(), 9);

        assert_eq!(summary.month_name, None);
        assert_eq!(summary.service_days, 0);
        assert_eq!(summary.daily_average, None);
        assert_eq!(summary.difference_vs_target, None);
    }
}
