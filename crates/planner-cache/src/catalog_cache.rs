//! 目錄快取
//!
//! 載入後的 `CatalogSet` 以 `Arc` 共享；來源檔案修改時間改變、
//! 被標記為髒或呼叫 `invalidate()` 後，下次存取才重新載入。

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use planner_core::CatalogSet;
use planner_io::CatalogSource;

use crate::dirty_tracking::DirtyTracker;
use crate::{CacheError, Result};

/// 目錄載入介面
pub trait CatalogLoader {
    /// 決定快取是否過期的來源檔案
    fn sources(&self) -> Vec<PathBuf>;

    /// 載入目錄
    fn load(&self) -> Result<CatalogSet>;
}

/// 以 `CatalogSource` 載入指定月份
pub struct SourceLoader {
    source: CatalogSource,
    months: Vec<String>,
}

impl SourceLoader {
    pub fn new(source: CatalogSource, months: Vec<String>) -> Self {
        Self { source, months }
    }
}

impl CatalogLoader for SourceLoader {
    fn sources(&self) -> Vec<PathBuf> {
        self.source.paths().into_iter().map(Path::to_path_buf).collect()
    }

    fn load(&self) -> Result<CatalogSet> {
        let months: Vec<&str> = self.months.iter().map(String::as_str).collect();
        Ok(self.source.load(&months)?)
    }
}

type Stamps = Vec<(PathBuf, Option<SystemTime>)>;

struct Cached {
    stamps: Stamps,
    catalogs: Arc<CatalogSet>,
}

#[derive(Default)]
struct CacheState {
    cached: Option<Cached>,
    dirty: DirtyTracker,
}

/// 目錄快取
pub struct CatalogCache<L: CatalogLoader> {
    loader: L,
    state: Mutex<CacheState>,
}

impl<L: CatalogLoader> CatalogCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// 取得目錄；必要時重新載入
    pub fn get(&self) -> Result<Arc<CatalogSet>> {
        let stamps = self.stamps();
        let mut state = self.state.lock().map_err(|_| CacheError::Poisoned)?;

        if let Some(cached) = &state.cached {
            if !state.dirty.any_dirty() && cached.stamps == stamps {
                tracing::debug!("目錄快取命中");
                return Ok(Arc::clone(&cached.catalogs));
            }
        }

        tracing::info!("重新載入目錄（髒來源: {:?}）", state.dirty.dirty_sources());
        let catalogs = Arc::new(self.loader.load()?);
        state.cached = Some(Cached {
            stamps,
            catalogs: Arc::clone(&catalogs),
        });
        state.dirty.clear();

        Ok(catalogs)
    }

    /// 標記某來源已變更
    pub fn mark_dirty(&self, source: impl Into<PathBuf>) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| CacheError::Poisoned)?;
        state.dirty.mark_dirty(source);
        Ok(())
    }

    /// 丟棄快取，下次存取時重新載入
    pub fn invalidate(&self) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| CacheError::Poisoned)?;
        state.cached = None;
        Ok(())
    }

    fn stamps(&self) -> Stamps {
        self.loader
            .sources()
            .into_iter()
            .map(|path| {
                let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
                (path, modified)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    struct CountingLoader {
        path: PathBuf,
        loads: AtomicUsize,
    }

    impl CatalogLoader for CountingLoader {
        fn sources(&self) -> Vec<PathBuf> {
            vec![self.path.clone()]
        }

        fn load(&self) -> Result<CatalogSet> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(CatalogSet::default())
        }
    }

    fn cache(dir: &TempDir) -> CatalogCache<CountingLoader> {
        let path = dir.path().join("costi.csv");
        fs::write(&path, "Descrizione\n").unwrap();
        CatalogCache::new(CountingLoader {
            path,
            loads: AtomicUsize::new(0),
        })
    }

    fn loads(cache: &CatalogCache<CountingLoader>) -> usize {
        cache.loader.loads.load(Ordering::SeqCst)
    }

    #[test]
    fn test_second_access_hits_cache() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads(&cache), 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        cache.get().unwrap();
        cache.invalidate().unwrap();
        cache.get().unwrap();

        assert_eq!(loads(&cache), 2);
    }

    #[test]
    fn test_dirty_source_forces_reload() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        cache.get().unwrap();
        cache.mark_dirty(dir.path().join("costi.csv")).unwrap();
        cache.get().unwrap();
        cache.get().unwrap();

        assert_eq!(loads(&cache), 2);
    }

    #[test]
    fn test_modified_source_forces_reload() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        cache.get().unwrap();

        let file = File::options()
            .write(true)
            .open(dir.path().join("costi.csv"))
            .unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
        cache.get().unwrap();

        assert_eq!(loads(&cache), 2);
    }
}
