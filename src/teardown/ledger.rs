use std::path::{Path, PathBuf};

use hashlink::LinkedHashSet;

/// Paths brought into existence by runtime `create` calls.
#[derive(Debug, Clone, Default)]
pub struct RuntimeLedger {
    paths: LinkedHashSet<PathBuf>,
}

impl RuntimeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            self.paths.insert(path);
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Empties the ledger, newest paths first.
    pub fn drain(&mut self) -> Vec<PathBuf> {
        let mut drained = Vec::with_capacity(self.paths.len());
        while let Some(path) = self.paths.pop_back() {
            drained.push(path);
        }
        drained
    }
}
