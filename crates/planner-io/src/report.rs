//! 分類訂貨報表（純文字）

use std::collections::BTreeMap;

use chrono::NaiveDate;
use planner_calc::{PlanningResult, PlanningRow};
use rust_decimal::Decimal;

/// 沒有類別的產品歸入此組
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// 訂貨報表產生器
pub struct OrderReport;

impl OrderReport {
    /// 產生報表；日期由呼叫端傳入
    ///
    /// 只列出訂購量大於 0 的產品，依類別分組（字母序，未分類在最後）。
    pub fn render(result: &PlanningResult, generated_on: NaiveDate) -> String {
        let request = &result.request;
        let distribution = &result.distribution;

        let mut lines = vec![
            format!("BREAKFAST ORDER - {}", generated_on.format("%d/%m/%Y")),
            format!(
                "Breakfasts: {} (Buffer: {}%)",
                request.target_headcount, request.buffer_percent
            ),
            format!(
                "Distribution: {} breakfasts/day over {} days",
                distribution.per_day_average, distribution.days_needed
            ),
            String::new(),
        ];

        let mut groups: BTreeMap<String, Vec<&PlanningRow>> = BTreeMap::new();
        let mut uncategorized = Vec::new();
        for row in result.rows_to_order() {
            match row.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                Some(category) => groups.entry(category.to_uppercase()).or_default().push(row),
                None => uncategorized.push(row),
            }
        }

        let mut sections: Vec<(String, Vec<&PlanningRow>)> = groups.into_iter().collect();
        if !uncategorized.is_empty() {
            sections.push((UNCATEGORIZED.to_string(), uncategorized));
        }

        for (title, mut rows) in sections {
            rows.sort_by(|a, b| a.article.cmp(&b.article));
            lines.push(format!("--- {title} ---"));
            lines.extend(rows.into_iter().map(Self::line));
            lines.push(String::new());
        }

        if result.total_order_cost > Decimal::ZERO {
            lines.push(format!("Estimated total cost: {:.2}", result.total_order_cost));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// `<品名>: <訂購量> <單位>[ - <單位成本>/unit]`
    fn line(row: &PlanningRow) -> String {
        let mut line = format!(
            "{}: {} {}",
            row.article,
            row.orderable_quantity().normalize(),
            row.unit_of_measure
        );
        if let Some(cost) = row.unit_cost.filter(|c| *c > Decimal::ZERO) {
            line.push_str(&format!(" - {cost:.2}/unit"));
        }
        line
    }
}
