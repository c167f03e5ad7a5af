use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Durable snapshot of the access ledger: a single JSON object mapping
/// string-encoded user ids to a float epoch-seconds expiry or `null`.
#[derive(Debug, Clone)]
pub struct AccessStore {
    path: PathBuf,
}

impl AccessStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An absent file is an empty ledger; a malformed one is an error, never
    /// a silent reset.
    pub fn load(&self) -> Result<BTreeMap<i64, Option<f64>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::Storage(e)),
        };
        let parsed: BTreeMap<String, Option<f64>> = serde_json::from_str(&raw)?;

        let mut grants = BTreeMap::new();
        for (user, expires_at) in parsed {
            let user_id: i64 = user.parse().map_err(|_| {
                Error::Storage(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non-numeric user id '{user}' in {}", self.path.display()),
                ))
            })?;
            grants.insert(user_id, expires_at);
        }
        Ok(grants)
    }

    /// Whole-file rewrite through a sibling temp file plus atomic rename, so
    /// a crash mid-write never leaves a torn snapshot.
    pub fn save(&self, grants: &BTreeMap<i64, Option<f64>>) -> Result<()> {
        let encoded: BTreeMap<String, Option<f64>> = grants
            .iter()
            .map(|(user_id, expires_at)| (user_id.to_string(), *expires_at))
            .collect();

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(&encoded)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), users = grants.len(), "access snapshot saved");
        Ok(())
    }
}
