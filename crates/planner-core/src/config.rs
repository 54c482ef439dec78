//! 計劃參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 參考部署的每日服務上限
pub const DEFAULT_DAILY_CAPACITY: u32 = 194;

/// 緩衝百分比的硬性上限，配置值不可超過
pub const BUFFER_PERCENT_LIMIT: u32 = 50;

/// 月份參考資料（實際供應份數與總成本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthReference {
    /// 月份名稱（對應產品目錄的工作表名稱）
    pub name: String,

    /// 月份編號（1-12）
    pub number: u32,

    /// 當月實際供應早餐份數
    pub breakfasts_served: u32,

    /// 當月總成本
    pub total_cost: Decimal,
}

impl MonthReference {
    pub fn new(name: &str, number: u32, breakfasts_served: u32, total_cost: Decimal) -> Self {
        Self {
            name: name.to_string(),
            number,
            breakfasts_served,
            total_cost,
        }
    }

    /// 每份早餐平均成本（份數為 0 時無意義）
    pub fn cost_per_breakfast(&self) -> Option<Decimal> {
        if self.breakfasts_served == 0 {
            return None;
        }
        Some(self.total_cost / Decimal::from(self.breakfasts_served))
    }
}

/// 計劃配置
///
/// 所有常數以明確的值傳入計算器，不使用全域狀態，
/// 方便用不同產能或月份表進行測試。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 每日最多可供應的早餐份數
    pub daily_capacity: u32,

    /// 預設緩衝百分比
    pub default_buffer_percent: u32,

    /// 允許的最大緩衝百分比（超過 [`BUFFER_PERCENT_LIMIT`] 時以上限為準）
    pub max_buffer_percent: u32,

    /// 月份參考表
    pub months: Vec<MonthReference>,
}

impl PlannerConfig {
    /// 創建不含月份參考表的配置
    pub fn new(daily_capacity: u32) -> Self {
        Self {
            daily_capacity,
            default_buffer_percent: 10,
            max_buffer_percent: BUFFER_PERCENT_LIMIT,
            months: Vec::new(),
        }
    }

    /// 建構器模式：設置每日產能
    pub fn with_daily_capacity(mut self, capacity: u32) -> Self {
        self.daily_capacity = capacity;
        self
    }

    /// 建構器模式：設置預設緩衝百分比
    pub fn with_default_buffer_percent(mut self, percent: u32) -> Self {
        self.default_buffer_percent = percent;
        self
    }

    /// 建構器模式：設置月份參考表
    pub fn with_months(mut self, months: Vec<MonthReference>) -> Self {
        self.months = months;
        self
    }

    /// 建構器模式：加入單一月份
    pub fn with_month(mut self, month: MonthReference) -> Self {
        self.months.retain(|m| m.name != month.name);
        self.months.push(month);
        self
    }

    /// 實際生效的緩衝上限
    pub fn buffer_limit(&self) -> u32 {
        self.max_buffer_percent.min(BUFFER_PERCENT_LIMIT)
    }

    /// 依名稱查詢月份
    pub fn month(&self, name: &str) -> Option<&MonthReference> {
        self.months.iter().find(|m| m.name == name)
    }

    /// 依編號查詢月份
    pub fn month_by_number(&self, number: u32) -> Option<&MonthReference> {
        self.months.iter().find(|m| m.number == number)
    }

    /// 某月份的實際供應份數，未設定時為 0
    pub fn breakfasts_served(&self, name: &str) -> u32 {
        self.month(name).map(|m| m.breakfasts_served).unwrap_or(0)
    }

    /// 所有月份名稱（配置順序）
    pub fn month_names(&self) -> Vec<&str> {
        self.months.iter().map(|m| m.name.as_str()).collect()
    }

    /// 參考部署的月份表（2024 年 4 月至 10 月）
    pub fn reference_months() -> Vec<MonthReference> {
        vec![
            MonthReference::new("Aprile", 4, 1279, Decimal::new(888302, 2)),
            MonthReference::new("Maggio", 5, 3459, Decimal::new(1500404, 2)),
            MonthReference::new("Giugno", 6, 4896, Decimal::new(1896623, 2)),
            MonthReference::new("Luglio", 7, 5199, Decimal::new(2254099, 2)),
            MonthReference::new("Agosto", 8, 5159, Decimal::new(2177370, 2)),
            MonthReference::new("Settembre", 9, 4337, Decimal::new(1971002, 2)),
            MonthReference::new("Ottobre", 10, 3202, Decimal::new(1374944, 2)),
        ]
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_CAPACITY).with_months(Self::reference_months())
    }
}
