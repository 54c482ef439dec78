//! 日誌系統初始化
//!
//! 使用 tracing 與 tracing-subscriber，日誌一律寫到 stderr，
//! stdout 保留給表格 / JSON / CSV 輸出。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌系統
///
/// # 環境變數
/// - `BREAKFAST_LOG`: 日誌過濾器，未設置時改讀 `RUST_LOG`
///
/// 兩者皆未設置時：預設 `warn`，`--verbose` 為 `debug`，`--quiet` 為 `error`。
pub fn init(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("BREAKFAST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// 初始化測試環境的日誌系統
#[cfg(test)]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
