use std::io;

use planner_calc::{
    DayDistribution, HeadcountSummary, MonthComparison, MonthlyDetail, PlanningResult,
};
use planner_io::CsvExporter;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::OutputFormat;

pub mod table;

fn opt(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 依指定格式輸出規劃結果
pub fn print_planning(result: &PlanningResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Csv => Ok(CsvExporter::planning(io::stdout().lock(), result)?),
        OutputFormat::Table => {
            println!("{}", render_planning(result));
            Ok(())
        }
    }
}

#[must_use]
pub fn render_planning(result: &PlanningResult) -> String {
    let with_stock = result.request.apply_inventory;

    let mut headers = vec![
        "category",
        "article",
        "uom",
        "coefficient",
        "predicted",
        "buffered",
        "unit_cost",
        "cost_with_buffer",
    ];
    if with_stock {
        headers.extend(["stock", "to_order", "effective_cost"]);
    }

    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.category.clone().unwrap_or_default(),
                row.article.clone(),
                row.unit_of_measure.clone(),
                row.coefficient.to_string(),
                row.predicted_consumption.to_string(),
                row.buffered_quantity.to_string(),
                opt(row.unit_cost),
                opt(row.cost_with_buffer.map(|c| c.round_dp(2))),
            ];
            if with_stock {
                cells.push(opt(row.stock_on_hand));
                cells.push(opt(row.to_order));
                cells.push(opt(row.effective_cost.map(|c| c.round_dp(2))));
            }
            cells
        })
        .collect();

    let mut lines = vec![
        table::render_table(&headers, &rows),
        String::new(),
        render_distribution(&result.distribution),
        format!("Total order cost: {}", money(result.total_order_cost)),
        format!("Total predicted cost: {}", money(result.total_predicted_cost)),
        format!("Cost per breakfast: {}", money(result.cost_per_breakfast)),
    ];
    lines.extend(result.warnings.iter().map(|warning| {
        format!("[{:?}] {}: {}", warning.severity, warning.article, warning.message)
    }));
    lines.join("\n")
}

/// 輸出月度明細（有每日份數時附上份數摘要）
pub fn print_month(
    detail: &MonthlyDetail,
    summary: Option<&HeadcountSummary>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct MonthView<'a> {
                detail: &'a MonthlyDetail,
                headcounts: Option<&'a HeadcountSummary>,
            }
            print_json(&MonthView {
                detail,
                headcounts: summary,
            })
        }
        OutputFormat::Csv => Ok(CsvExporter::monthly_detail(io::stdout().lock(), detail)?),
        OutputFormat::Table => {
            println!("{}", render_month(detail, summary));
            Ok(())
        }
    }
}

#[must_use]
pub fn render_month(detail: &MonthlyDetail, summary: Option<&HeadcountSummary>) -> String {
    let rows: Vec<Vec<String>> = detail
        .products
        .iter()
        .map(|row| {
            vec![
                row.category.clone().unwrap_or_default(),
                row.article.clone(),
                row.unit_of_measure.clone(),
                row.coefficient.to_string(),
                row.total_consumption.round_dp(2).to_string(),
            ]
        })
        .collect();
    let totals: Vec<Vec<String>> = detail
        .category_totals
        .iter()
        .map(|t| vec![t.category.clone(), t.total_consumption.round_dp(2).to_string()])
        .collect();

    let mut out = format!(
        "{}: {} breakfasts served, total cost {}, cost per breakfast {}\n\n",
        detail.month,
        detail.breakfasts_served,
        detail.total_cost.map(money).unwrap_or_else(|| "-".to_string()),
        detail.cost_per_breakfast.map(money).unwrap_or_else(|| "-".to_string()),
    );
    out.push_str(&table::render_table(
        &["category", "article", "uom", "coefficient", "total_consumption"],
        &rows,
    ));
    out.push_str("\n\n");
    out.push_str(&table::render_table(&["category", "total_consumption"], &totals));

    if let Some(summary) = summary.filter(|s| s.service_days > 0) {
        out.push_str(&format!(
            "\n\nActual breakfasts: {} over {} days (average {})",
            summary.actual_breakfasts,
            summary.service_days,
            opt(summary.daily_average)
        ));
        if let (Some(target), Some(difference)) =
            (summary.target_breakfasts, summary.difference_vs_target)
        {
            out.push_str(&format!(
                "\nTarget: {target} (difference {difference:+}, target daily average {})",
                opt(summary.target_daily_average)
            ));
        }
        if let Some(cost) = summary.cost_per_day {
            out.push_str(&format!("\nCost per service day: {}", money(cost)));
        }
    }
    out
}

/// 輸出跨月比較；表格模式以產品為列、月份為欄
pub fn print_comparison(comparison: &MonthComparison, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(comparison),
        OutputFormat::Csv => Ok(CsvExporter::comparison(io::stdout().lock(), comparison)?),
        OutputFormat::Table => {
            println!("{}", render_comparison(comparison));
            Ok(())
        }
    }
}

#[must_use]
pub fn render_comparison(comparison: &MonthComparison) -> String {
    let mut headers = vec!["article"];
    headers.extend(comparison.months.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = comparison
        .pivot()
        .into_iter()
        .map(|(article, values)| {
            std::iter::once(article)
                .chain(values.into_iter().map(|v| opt(v.map(|d| d.round_dp(2)))))
                .collect()
        })
        .collect();

    format!(
        "{}\n\n{}",
        comparison.category,
        table::render_table(&headers, &rows)
    )
}

#[must_use]
pub fn render_distribution(distribution: &DayDistribution) -> String {
    let loads = distribution
        .daily_loads()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Distribution: {} breakfasts/day over {} days (capacity {}; daily loads: {})",
        distribution.per_day_average,
        distribution.days_needed,
        distribution.daily_capacity,
        loads
    )
}
