//! 分層設定：預設值 → TOML 檔 → `BREAKFAST_*` 環境變數

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use planner_core::PlannerConfig;
use planner_io::CatalogSource;
use serde::{Deserialize, Serialize};

/// 預設設定檔名稱（目前目錄）
pub const DEFAULT_CONFIG_FILE: &str = "breakfast-planner.toml";

/// 應用程式設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 計劃參數與月份參考表
    pub planner: PlannerConfig,

    /// 資料檔位置
    pub data: DataSettings,
}

/// 資料檔位置（相對路徑以 `dir` 為基準）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: PathBuf,
    /// XLSX 活頁簿或每月 CSV 的目錄
    pub catalog: PathBuf,
    pub costs: Option<PathBuf>,
    pub headcounts: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            catalog: PathBuf::from("breakfast_dashboard.xlsx"),
            costs: Some(PathBuf::from("unified_consumi_data.csv")),
            headcounts: Some(PathBuf::from("colazionigiornalierecount2024.csv")),
        }
    }
}

impl Settings {
    /// 建立 figment 提供者鏈
    ///
    /// 優先順序（高到低）：
    /// 1. 環境變數（`BREAKFAST_` 前綴，`__` 分隔層級，例如 `BREAKFAST_DATA__CATALOG`）
    /// 2. 設定檔（`--config` 或目前目錄的 `breakfast-planner.toml`）
    /// 3. 預設值
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let path = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("BREAKFAST_").split("__"))
    }

    /// 載入設定；`data_dir` 覆寫資料目錄
    pub fn load(config_file: Option<&Path>, data_dir: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = config_file {
            anyhow::ensure!(path.exists(), "config file not found: {}", path.display());
        }

        let mut settings: Self = Self::figment(config_file)
            .extract()
            .context("failed to load settings")?;

        if let Some(dir) = data_dir {
            settings.data.dir = dir.to_path_buf();
        }
        tracing::debug!("設定: {:?}", settings);
        Ok(settings)
    }

    /// 解析後的資料來源
    pub fn catalog_source(&self) -> CatalogSource {
        let data = &self.data;
        let mut source = CatalogSource::new(data.dir.join(&data.catalog));
        if let Some(costs) = &data.costs {
            source = source.with_costs(data.dir.join(costs));
        }
        if let Some(headcounts) = &data.headcounts {
            source = source.with_headcounts(data.dir.join(headcounts));
        }
        source
    }
}
