//! 髒標記追蹤

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 髒標記追蹤器（以來源檔案為單位）
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_sources: HashSet<PathBuf>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記來源為髒
    pub fn mark_dirty(&mut self, source: impl Into<PathBuf>) {
        self.dirty_sources.insert(source.into());
    }

    /// 檢查來源是否為髒
    pub fn is_dirty(&self, source: &Path) -> bool {
        self.dirty_sources.contains(source)
    }

    /// 是否有任何髒來源
    pub fn any_dirty(&self) -> bool {
        !self.dirty_sources.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_sources.clear();
    }

    /// 獲取所有髒來源（排序後）
    pub fn dirty_sources(&self) -> Vec<PathBuf> {
        let mut sources: Vec<PathBuf> = self.dirty_sources.iter().cloned().collect();
        sources.sort();
        sources
    }
}
