use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use stash_core::sample::sample_lines;
use stash_core::{CooldownTracker, DatasetCatalog, Error, Result};

use crate::services::admin_service::AdminService;
use crate::services::epoch_now;

/// Cooldown-gated random sampling from the dataset catalog into per-user
/// drop files.
#[derive(Clone)]
pub struct DropService {
    catalog: Arc<RwLock<DatasetCatalog>>,
    cooldown: Arc<RwLock<CooldownTracker>>,
    admin: AdminService,
    database_dir: PathBuf,
    drops_dir: PathBuf,
    cooldown_secs: u64,
    sample_size: usize,
}

impl DropService {
    pub fn new(
        catalog: DatasetCatalog,
        admin: AdminService,
        database_dir: PathBuf,
        drops_dir: PathBuf,
        cooldown_secs: u64,
        sample_size: usize,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            cooldown: Arc::new(RwLock::new(CooldownTracker::new())),
            admin,
            database_dir,
            drops_dir,
            cooldown_secs,
            sample_size,
        }
    }

    /// Where uploaded dataset files land before registration.
    pub fn database_dir(&self) -> &Path {
        &self.database_dir
    }

    pub async fn dataset_names(&self) -> Vec<String> {
        self.catalog.read().await.names()
    }

    /// Admin-only: add or replace a catalog entry for an uploaded file.
    pub async fn register(&self, caller: i64, name: &str, path: PathBuf) -> Result<()> {
        self.admin.require_admin(caller)?;
        self.catalog.write().await.register(name, path);
        info!(name, "dataset registered");
        Ok(())
    }

    /// Draws a random sample from `dataset` and overwrites the caller's
    /// previous drop file for that dataset. Rate limited per user.
    pub async fn generate(&self, user_id: i64, dataset: &str) -> Result<PathBuf> {
        self.cooldown
            .write()
            .await
            .try_act(user_id, self.cooldown_secs, epoch_now())?;

        let source = {
            let catalog = self.catalog.read().await;
            catalog.resolve(dataset).map(Path::to_path_buf)
        }
        .ok_or_else(|| Error::NotFound(format!("dataset {dataset}")))?;

        let raw = match tokio::fs::read_to_string(&source).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("dataset {dataset}")));
            }
            Err(e) => return Err(Error::Storage(e)),
        };
        let lines: Vec<&str> = raw.lines().collect();
        let selected = sample_lines(&mut rand::rng(), &lines, self.sample_size);

        let artifact = self.drops_dir.join(format!("{user_id}_{dataset}.txt"));
        let mut contents = selected.join("\n");
        contents.push('\n');
        tokio::fs::write(&artifact, contents).await?;

        info!(user_id, dataset, lines = selected.len(), "drop generated");
        Ok(artifact)
    }
}
