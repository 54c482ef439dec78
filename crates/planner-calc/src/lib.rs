//! # Order Planning Engine
//!
//! 核心訂貨規劃計算引擎

pub mod buffering;
pub mod calculator;
pub mod costing;
pub mod distribution;
pub mod history;
pub mod matching;
pub mod netting;
pub mod projection;

// Re-export 主要類型
pub use buffering::{BufferCalculator, BufferedQuantity};
pub use calculator::OrderPlanner;
pub use costing::CostEstimator;
pub use distribution::{DayDistribution, DayDistributionPlanner};
pub use history::{
    CategoryTotal, ComparisonRow, ConsumptionRow, HeadcountSummary, HistoryAnalyzer,
    MonthComparison, MonthlyDetail,
};
pub use matching::{CostIndex, CostMatch, MatchKind, ProductMatcher};
pub use netting::{NetRequirement, NettingCalculator};
pub use projection::ConsumptionProjector;

use planner_core::PlanningRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 訂貨規劃結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResult {
    /// 原始請求
    pub request: PlanningRequest,

    /// 天數分配
    pub distribution: DayDistribution,

    /// 每產品一列（僅保留通過篩選的產品）
    pub rows: Vec<PlanningRow>,

    /// 訂單總成本（僅計入已比對成本的產品）
    pub total_order_cost: Decimal,

    /// 預計消耗的理論總成本
    pub total_predicted_cost: Decimal,

    /// 每份早餐平均理論成本
    pub cost_per_breakfast: Decimal,

    /// 警告信息
    pub warnings: Vec<PlanningWarning>,
}

impl PlanningResult {
    /// 需要訂購的列（訂購量大於 0）
    pub fn rows_to_order(&self) -> impl Iterator<Item = &PlanningRow> {
        self.rows
            .iter()
            .filter(|row| row.orderable_quantity() > Decimal::ZERO)
    }

    /// 未比對到成本的產品數量
    pub fn unmatched_count(&self) -> usize {
        self.rows.iter().filter(|row| row.unit_cost.is_none()).count()
    }
}

/// 單產品規劃結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRow {
    pub category: Option<String>,
    pub article: String,
    pub unit_of_measure: String,
    pub coefficient: Decimal,

    /// 預計消耗 = 係數 × 目標份數
    pub predicted_consumption: Decimal,

    /// 含緩衝並取整後的數量
    pub buffered_quantity: Decimal,

    /// 實際加上的緩衝量
    pub buffer_applied: Decimal,

    /// 比對到的成本目錄描述
    pub cost_match: Option<String>,

    pub unit_cost: Option<Decimal>,

    /// 預計消耗的理論成本（已套用單位換算）
    pub theoretical_cost: Option<Decimal>,

    pub cost_with_buffer: Option<Decimal>,

    /// 以下欄位僅在扣除庫存時有值
    pub stock_on_hand: Option<Decimal>,
    pub to_order: Option<Decimal>,
    pub effective_cost: Option<Decimal>,
}

impl PlanningRow {
    /// 實際要下單的數量：有扣庫存時取淨額，否則取緩衝後數量
    pub fn orderable_quantity(&self) -> Decimal {
        self.to_order.unwrap_or(self.buffered_quantity)
    }
}

/// 規劃警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWarning {
    pub article: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanningWarning {
    pub fn new(article: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            article,
            message,
            severity,
        }
    }

    pub fn info(article: String, message: String) -> Self {
        Self::new(article, message, WarningSeverity::Info)
    }

    pub fn warning(article: String, message: String) -> Self {
        Self::new(article, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
