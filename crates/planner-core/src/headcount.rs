//! 每日早餐人數模型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 每日實際早餐份數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHeadcount {
    /// 日期
    pub date: NaiveDate,

    /// 實際供應份數
    pub breakfasts: u32,
}

impl DailyHeadcount {
    pub fn new(date: NaiveDate, breakfasts: u32) -> Self {
        Self { date, breakfasts }
    }

    /// 月份（1-12）
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}
