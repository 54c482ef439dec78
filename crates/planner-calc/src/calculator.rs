//! 訂貨規劃主計算器

use planner_core::{
    CatalogSet, PlannerConfig, PlannerError, PlanningRequest, ProductEntry, StockTable,
};
use rust_decimal::Decimal;

use crate::buffering::BufferCalculator;
use crate::costing::CostEstimator;
use crate::distribution::DayDistributionPlanner;
use crate::matching::{CostIndex, MatchKind};
use crate::netting::NettingCalculator;
use crate::projection::ConsumptionProjector;
use crate::{PlanningResult, PlanningRow, PlanningWarning};

/// 訂貨規劃計算器
pub struct OrderPlanner {
    /// 計劃配置
    config: PlannerConfig,
}

impl OrderPlanner {
    /// 創建新的訂貨規劃計算器
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// 主規劃入口
    ///
    /// 請求應已通過 [`PlanningRequest::validate`]。`stock` 僅在
    /// `request.apply_inventory` 為真時使用；此時若未提供，所有庫存視為 0。
    pub fn plan(
        &self,
        catalogs: &CatalogSet,
        request: &PlanningRequest,
        stock: Option<&StockTable>,
    ) -> planner_core::Result<PlanningResult> {
        tracing::info!(
            "開始訂貨規劃：月份 {}，份數 {}，緩衝 {}%，扣庫存 {}",
            request.reference_month,
            request.target_headcount,
            request.buffer_percent,
            request.apply_inventory
        );

        let start_time = std::time::Instant::now();

        // Step 1: 天數分配
        tracing::debug!("Step 1: 天數分配");
        let distribution =
            DayDistributionPlanner::distribute(request.target_headcount, self.config.daily_capacity)?;

        // Step 2: 篩選產品
        tracing::debug!("Step 2: 篩選產品");
        let products = catalogs
            .products
            .month(&request.reference_month)
            .ok_or_else(|| PlannerError::MonthNotFound(request.reference_month.clone()))?;
        let selected = self.select_products(products, request);
        tracing::debug!("產品: 共 {} 筆，納入 {} 筆", products.len(), selected.len());

        // Step 3: 逐產品計算
        tracing::debug!("Step 3: 逐產品計算");
        let index = CostIndex::new(&catalogs.costs);
        let empty_stock = StockTable::new();
        let stock = if request.apply_inventory {
            Some(stock.unwrap_or(&empty_stock))
        } else {
            None
        };

        let mut warnings = Vec::new();
        let rows = selected
            .into_iter()
            .map(|(product, coefficient)| {
                self.plan_product(product, coefficient, request, &index, stock, &mut warnings)
            })
            .collect::<planner_core::Result<Vec<PlanningRow>>>()?;

        // Step 4: 合計
        tracing::debug!("Step 4: 合計成本");
        let total_order_cost = if request.apply_inventory {
            CostEstimator::total(rows.iter().map(|row| row.effective_cost))?
        } else {
            CostEstimator::total(rows.iter().map(|row| row.cost_with_buffer))?
        };
        let total_predicted_cost =
            CostEstimator::total(rows.iter().map(|row| row.theoretical_cost))?;
        let cost_per_breakfast = total_predicted_cost / Decimal::from(request.target_headcount);

        let result = PlanningResult {
            request: request.clone(),
            distribution,
            rows,
            total_order_cost,
            total_predicted_cost,
            cost_per_breakfast,
            warnings,
        };

        tracing::info!("訂貨規劃完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "產品數量: {}，未比對成本: {}，訂單總成本: {}",
            result.rows.len(),
            result.unmatched_count(),
            result.total_order_cost
        );

        Ok(result)
    }

    /// 篩選正係數且未被排除類別的產品
    fn select_products<'a>(
        &self,
        products: &'a [ProductEntry],
        request: &PlanningRequest,
    ) -> Vec<(&'a ProductEntry, Decimal)> {
        products
            .iter()
            .filter(|product| !request.excludes(product))
            .filter_map(|product| match product.plannable_coefficient() {
                Some(coefficient) => Some((product, coefficient)),
                None => {
                    tracing::debug!("產品 {} 無有效係數，跳過", product.article);
                    None
                }
            })
            .collect()
    }

    /// 單產品計算
    fn plan_product(
        &self,
        product: &ProductEntry,
        coefficient: Decimal,
        request: &PlanningRequest,
        index: &CostIndex<'_>,
        stock: Option<&StockTable>,
        warnings: &mut Vec<PlanningWarning>,
    ) -> planner_core::Result<PlanningRow> {
        let unit = product.unit();

        let predicted_consumption =
            ConsumptionProjector::project(coefficient, request.target_headcount)?;
        let buffered =
            BufferCalculator::apply(predicted_consumption, request.buffer_percent, unit)?;

        let cost_match = index.find(&product.article);
        let entry = cost_match.map(|m| m.entry);

        match cost_match {
            None => warnings.push(PlanningWarning::info(
                product.article.clone(),
                "找不到對應的成本資料，成本不計入合計".to_string(),
            )),
            Some(m) if m.kind != MatchKind::Exact => {
                tracing::debug!(
                    "產品 {} 以子字串比對到 {}",
                    product.article,
                    m.entry.description
                );
            }
            Some(_) => {}
        }

        if let Some(entry) = entry.filter(|e| !e.has_usable_conversion()) {
            tracing::warn!("成本條目 {} 換算係數為 0，理論成本視為未知", entry.description);
            warnings.push(PlanningWarning::warning(
                product.article.clone(),
                format!("成本條目 {} 換算係數為 0", entry.description),
            ));
        }

        let net = stock.map(|table| {
            NettingCalculator::calculate(
                buffered.buffered_quantity,
                table.on_hand(&product.article),
                unit,
            )
        });

        Ok(PlanningRow {
            category: product.category.clone(),
            article: product.article.clone(),
            unit_of_measure: product.unit_of_measure.clone(),
            coefficient,
            predicted_consumption,
            buffered_quantity: buffered.buffered_quantity,
            buffer_applied: buffered.buffer_applied,
            cost_match: entry.map(|e| e.description.clone()),
            unit_cost: entry.map(|e| e.unit_cost),
            theoretical_cost: CostEstimator::theoretical_cost(predicted_consumption, entry),
            cost_with_buffer: CostEstimator::quantity_cost(buffered.buffered_quantity, entry),
            stock_on_hand: net.map(|n| n.stock_on_hand),
            to_order: net.map(|n| n.to_order),
            effective_cost: net.and_then(|n| CostEstimator::quantity_cost(n.to_order, entry)),
        })
    }
}
