//! CSV 匯出

use std::fs::File;
use std::io::Write;
use std::path::Path;

use planner_calc::{MonthComparison, MonthlyDetail, PlanningResult};
use serde::Serialize;

use crate::error::Result;

/// CSV 匯出器
pub struct CsvExporter;

impl CsvExporter {
    /// 將記錄序列化為 CSV（表頭取自欄位名稱）
    pub fn write_rows<W, T>(out: W, rows: &[T]) -> Result<()>
    where
        W: Write,
        T: Serialize,
    {
        let mut writer = csv::Writer::from_writer(out);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 規劃結果（所有欄位）
    pub fn planning<W: Write>(out: W, result: &PlanningResult) -> Result<()> {
        Self::write_rows(out, &result.rows)
    }

    /// 月度明細
    pub fn monthly_detail<W: Write>(out: W, detail: &MonthlyDetail) -> Result<()> {
        Self::write_rows(out, &detail.products)
    }

    /// 跨月比較（平鋪列）
    pub fn comparison<W: Write>(out: W, comparison: &MonthComparison) -> Result<()> {
        Self::write_rows(out, &comparison.rows)
    }

    /// 匯出規劃結果到檔案
    pub fn planning_to_file(path: &Path, result: &PlanningResult) -> Result<()> {
        let file = File::create(path)?;
        Self::planning(file, result)?;
        tracing::info!("規劃結果已匯出: {}", path.display());
        Ok(())
    }
}
