//! 簡單訂貨規劃示例

use chrono::Local;
use planner_calc::OrderPlanner;
use planner_core::{
    CatalogSet, CostCatalogEntry, PlannerConfig, PlanningRequest, ProductCatalog, ProductEntry,
    StockEntry, StockTable,
};
use planner_io::OrderReport;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 簡單訂貨規劃示例 ===\n");

    // 建立四月份的產品目錄
    let products = ProductCatalog::new().with_month(
        "Aprile",
        vec![
            ProductEntry::new("Latte".to_string(), "kg".to_string(), Decimal::new(5, 2))
                .with_category("BEVANDE".to_string()),
            ProductEntry::new("Cornetto".to_string(), "pz".to_string(), Decimal::new(8, 1))
                .with_category("DOLCI".to_string()),
            ProductEntry::new("Marmellata".to_string(), "g".to_string(), Decimal::new(25, 0))
                .with_category("DOLCI".to_string()),
        ],
    );

    // 成本目錄
    let costs = vec![
        CostCatalogEntry::new("LATTE INTERO".to_string(), Decimal::new(120, 2)),
        CostCatalogEntry::new("CORNETTO".to_string(), Decimal::new(40, 2)),
    ]
    .into_iter()
    .collect();

    let catalogs = CatalogSet::new(products, costs);
    let config = PlannerConfig::default();

    // 300 份早餐，緩衝 10%，扣除現有庫存
    let request = PlanningRequest::new("Aprile".to_string(), 300, 10).with_inventory(true);
    request.validate(&catalogs.products, &config)?;

    let stock = StockTable::from_entries(vec![StockEntry::new(
        "Cornetto".to_string(),
        Decimal::from(40),
    )]);

    let result = OrderPlanner::new(config).plan(&catalogs, &request, Some(&stock))?;

    println!("規劃結果:");
    for row in &result.rows {
        println!(
            "  {} - 預計 {} {}，緩衝後 {}，訂購 {}",
            row.article,
            row.predicted_consumption,
            row.unit_of_measure,
            row.buffered_quantity,
            row.orderable_quantity()
        );
    }

    println!("\n{}", OrderReport::render(&result, Local::now().date_naive()));

    Ok(())
}
