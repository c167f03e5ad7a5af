use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use stash_core::{AccessLedger, AccessStore, Result};

use crate::services::admin_service::AdminService;
use crate::services::epoch_now;

/// The access ledger behind a single lock, persisted as a whole-file
/// snapshot before any mutation reports success.
#[derive(Clone)]
pub struct AccessService {
    ledger: Arc<RwLock<AccessLedger>>,
    store: AccessStore,
    admin: AdminService,
}

impl AccessService {
    pub fn load(store: AccessStore, admin: AdminService) -> Result<Self> {
        let grants = store.load()?;
        info!(users = grants.len(), path = %store.path().display(), "access ledger loaded");
        Ok(Self {
            ledger: Arc::new(RwLock::new(AccessLedger::from_map(grants))),
            store,
            admin,
        })
    }

    /// Upserts a grant and persists while still holding the write lock.
    pub async fn grant(&self, user_id: i64, expires_at: Option<f64>) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.grant(user_id, expires_at);
        self.store.save(ledger.snapshot())
    }

    pub async fn has_access(&self, user_id: i64) -> bool {
        self.ledger.read().await.has_access(user_id, epoch_now())
    }

    pub async fn revoke(&self, caller: i64, user_id: i64) -> Result<()> {
        self.admin.require_admin(caller)?;
        let mut ledger = self.ledger.write().await;
        ledger.revoke(user_id)?;
        self.store.save(ledger.snapshot())
    }

    pub async fn list(&self, caller: i64) -> Result<Vec<(i64, Option<f64>)>> {
        self.admin.require_admin(caller)?;
        Ok(self.ledger.read().await.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stash_core::Error;

    fn service(dir: &tempfile::TempDir) -> AccessService {
        AccessService::load(
            AccessStore::new(dir.path().join("access.json")),
            AdminService::new(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn grant_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let access = service(&dir);
        access.grant(7, None).await.unwrap();
        assert!(access.has_access(7).await);

        // A fresh service over the same file sees the grant.
        let reloaded = service(&dir);
        assert!(reloaded.has_access(7).await);
    }

    #[tokio::test]
    async fn revoke_is_admin_gated_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let access = service(&dir);
        access.grant(7, None).await.unwrap();

        assert!(matches!(
            access.revoke(99, 7).await,
            Err(Error::PermissionDenied)
        ));
        assert!(access.has_access(7).await);

        access.revoke(1, 7).await.unwrap();
        assert!(!access.has_access(7).await);
        assert!(!service(&dir).has_access(7).await);
    }

    #[tokio::test]
    async fn revoke_unknown_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let access = service(&dir);
        assert!(matches!(
            access.revoke(1, 7).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_is_admin_gated() {
        let dir = tempfile::tempdir().unwrap();
        let access = service(&dir);
        access.grant(7, Some(9.9e9)).await.unwrap();

        assert!(matches!(
            access.list(7).await,
            Err(Error::PermissionDenied)
        ));
        assert_eq!(access.list(1).await.unwrap(), vec![(7, Some(9.9e9))]);
    }
}
