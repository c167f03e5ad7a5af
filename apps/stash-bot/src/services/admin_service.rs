use tracing::warn;

use stash_core::{Error, Result};

#[derive(Clone)]
pub struct AdminService {
    admin_id: i64,
}

impl AdminService {
    pub fn new(admin_id: i64) -> Self {
        Self { admin_id }
    }

    pub fn is_admin(&self, tg_id: i64) -> bool {
        tg_id == self.admin_id
    }

    /// Gate for admin-only operations; denial happens before any state is
    /// touched.
    pub fn require_admin(&self, tg_id: i64) -> Result<()> {
        if self.is_admin(tg_id) {
            Ok(())
        } else {
            warn!(tg_id, "admin-only operation denied");
            Err(Error::PermissionDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_configured_id_is_admin() {
        let admin = AdminService::new(42);
        assert!(admin.is_admin(42));
        assert!(!admin.is_admin(7));
        assert!(matches!(
            admin.require_admin(7),
            Err(Error::PermissionDenied)
        ));
    }
}
