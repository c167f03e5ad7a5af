use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Authoritative user -> access-expiry mapping. A `None` expiry means
/// unlimited access. At most one grant per user; granting again overwrites.
#[derive(Debug, Default)]
pub struct AccessLedger {
    grants: BTreeMap<i64, Option<f64>>,
}

impl AccessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(grants: BTreeMap<i64, Option<f64>>) -> Self {
        Self { grants }
    }

    pub fn grant(&mut self, user_id: i64, expires_at: Option<f64>) {
        self.grants.insert(user_id, expires_at);
    }

    /// Pure predicate, evaluated fresh against `now` on every call.
    pub fn has_access(&self, user_id: i64, now: f64) -> bool {
        match self.grants.get(&user_id) {
            None => false,
            Some(None) => true,
            Some(Some(ts)) => *ts > now,
        }
    }

    pub fn revoke(&mut self, user_id: i64) -> Result<()> {
        self.grants
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Option<f64>)> + '_ {
        self.grants.iter().map(|(user_id, expires_at)| (*user_id, *expires_at))
    }

    /// Full view for snapshot persistence.
    pub fn snapshot(&self) -> &BTreeMap<i64, Option<f64>> {
        &self.grants
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
