use std::fs;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use planner_cache::{CatalogCache, SourceLoader};
use planner_calc::{DayDistributionPlanner, HistoryAnalyzer, OrderPlanner};
use planner_core::{CatalogSet, PlanningRequest};
use planner_io::{CsvExporter, OrderReport, StockLoader};

use crate::cli::{CompareArgs, Commands, DistributeArgs, MonthArgs, PlanArgs};
use crate::output;
use crate::settings::Settings;

/// 將解析後的子命令分派給對應處理函數
pub fn dispatch(command: &Commands, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Commands::Plan(args) => plan(args, settings),
        Commands::Month(args) => month(args, settings),
        Commands::Compare(args) => compare(args, settings),
        Commands::Distribute(args) => distribute(args, settings),
    }
}

fn load_catalogs(settings: &Settings) -> anyhow::Result<Arc<CatalogSet>> {
    let source = settings.catalog_source();
    let months = settings
        .planner
        .month_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let cache = CatalogCache::new(SourceLoader::new(source.clone(), months));
    cache
        .get()
        .with_context(|| format!("failed to load catalog from {}", source.catalog.display()))
}

fn plan(args: &PlanArgs, settings: &Settings) -> anyhow::Result<()> {
    let catalogs = load_catalogs(settings)?;
    let config = &settings.planner;

    let request = PlanningRequest::new(
        args.month.clone(),
        args.headcount,
        args.buffer.unwrap_or(config.default_buffer_percent),
    )
    .with_excluded_categories(args.exclude.iter().cloned())
    .with_inventory(args.stock.is_some());
    request.validate(&catalogs.products, config)?;

    let stock = match &args.stock {
        Some(path) => Some(
            StockLoader::from_csv(path)
                .with_context(|| format!("failed to load stock from {}", path.display()))?,
        ),
        None => None,
    };

    let result = OrderPlanner::new(config.clone()).plan(&catalogs, &request, stock.as_ref())?;
    output::print_planning(&result, args.format)?;

    if let Some(path) = &args.report {
        fs::write(path, OrderReport::render(&result, Local::now().date_naive()))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }
    if let Some(path) = &args.export {
        CsvExporter::planning_to_file(path, &result)
            .with_context(|| format!("failed to export plan to {}", path.display()))?;
    }
    Ok(())
}

fn month(args: &MonthArgs, settings: &Settings) -> anyhow::Result<()> {
    let catalogs = load_catalogs(settings)?;
    let config = &settings.planner;

    let detail = HistoryAnalyzer::monthly_detail(&catalogs.products, config, &args.month)?;
    let summary = config.month(&args.month).map(|reference| {
        HistoryAnalyzer::headcount_summary(&catalogs.headcounts, config, reference.number)
    });

    output::print_month(&detail, summary.as_ref(), args.format)
}

fn compare(args: &CompareArgs, settings: &Settings) -> anyhow::Result<()> {
    let catalogs = load_catalogs(settings)?;

    let comparison = HistoryAnalyzer::compare_months(
        &catalogs.products,
        &settings.planner,
        &args.months,
        &args.category,
    )
    .map_err(|error| {
        let available = HistoryAnalyzer::available_categories(&catalogs.products, &args.months);
        anyhow::anyhow!("{error} (available: {})", available.join(", "))
    })?;

    output::print_comparison(&comparison, args.format)
}

fn distribute(args: &DistributeArgs, settings: &Settings) -> anyhow::Result<()> {
    let capacity = args.capacity.unwrap_or(settings.planner.daily_capacity);
    let distribution = DayDistributionPlanner::distribute(args.headcount, capacity)?;
    println!("{}", output::render_distribution(&distribution));
    Ok(())
}
