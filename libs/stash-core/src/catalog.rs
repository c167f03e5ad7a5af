use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Named line-oriented datasets, each backed by a text file. Content is
/// read-only; the catalog only grows or replaces entries.
#[derive(Debug, Default)]
pub struct DatasetCatalog {
    datasets: BTreeMap<String, PathBuf>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from every `*.txt` file directly under `dir`, keyed
    /// by filename stem.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            else {
                continue;
            };
            catalog.datasets.insert(stem, path);
        }
        info!(datasets = catalog.datasets.len(), dir = %dir.display(), "dataset catalog scanned");
        Ok(catalog)
    }

    /// Adds or replaces an entry. The backing file's content is not
    /// validated, only recorded.
    pub fn register(&mut self, name: &str, path: PathBuf) {
        self.datasets.insert(name.to_string(), path);
    }

    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.datasets.get(name).map(PathBuf::as_path)
    }

    pub fn names(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
