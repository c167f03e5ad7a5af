use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use stash_core::{IssuedKey, KeyDuration, KeyRegistry, Result};

use crate::services::access_service::AccessService;
use crate::services::admin_service::AdminService;
use crate::services::epoch_now;

#[derive(Clone)]
pub struct KeyService {
    registry: Arc<RwLock<KeyRegistry>>,
    access: AccessService,
    admin: AdminService,
}

impl KeyService {
    pub fn new(access: AccessService, admin: AdminService) -> Self {
        Self {
            registry: Arc::new(RwLock::new(KeyRegistry::new())),
            access,
            admin,
        }
    }

    /// Admin-only: parse the duration spec and mint a single-use key.
    pub async fn issue(&self, caller: i64, spec: &str) -> Result<IssuedKey> {
        self.admin.require_admin(caller)?;
        let duration = KeyDuration::parse(spec)?;
        let issued = self.registry.write().await.issue(duration, epoch_now())?;
        info!("access key issued, valid {spec}");
        Ok(issued)
    }

    /// Redeems `key` for `user_id`. The registry write lock makes removal
    /// atomic per key, so at most one caller wins a given key; the resulting
    /// grant is persisted before success is reported.
    pub async fn redeem(&self, key: &str, user_id: i64) -> Result<Option<f64>> {
        let expires_at = self.registry.write().await.redeem(key, epoch_now())?;
        self.access.grant(user_id, expires_at).await?;
        info!(user_id, "access key redeemed");
        Ok(expires_at)
    }
}
