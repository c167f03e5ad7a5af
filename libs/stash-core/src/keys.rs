use std::collections::HashMap;

use crate::duration::KeyDuration;
use crate::error::{Error, Result};

const KEY_GEN_ATTEMPTS: u32 = 8;

/// A freshly minted single-use access key.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedKey {
    pub key: String,
    /// Absolute expiry in epoch seconds, `None` for lifetime access.
    pub expires_at: Option<f64>,
}

/// Outstanding single-use redemption keys. In-memory only: a restart drops
/// every unredeemed key. Stale keys are reaped lazily, on the lookup that
/// finds them past expiry.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: HashMap<String, Option<f64>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh random 6-digit key valid per `duration`. Collisions with
    /// an outstanding key are retried a bounded number of times.
    pub fn issue(&mut self, duration: KeyDuration, now: f64) -> Result<IssuedKey> {
        let expires_at = duration.expires_at(now);
        for _ in 0..KEY_GEN_ATTEMPTS {
            let key = rand::random_range(100_000u32..=999_999).to_string();
            if self.keys.contains_key(&key) {
                continue;
            }
            self.keys.insert(key.clone(), expires_at);
            return Ok(IssuedKey { key, expires_at });
        }
        Err(Error::KeyspaceExhausted)
    }

    /// Consumes `key` and returns its expiry rule. The key is removed on
    /// every path that finds it: a stale key is dropped before reporting
    /// `Expired`, a valid one is spent by redemption.
    pub fn redeem(&mut self, key: &str, now: f64) -> Result<Option<f64>> {
        let expires_at = self
            .keys
            .remove(key)
            .ok_or_else(|| Error::NotFound(format!("key {key}")))?;
        if let Some(ts) = expires_at {
            if ts < now {
                return Err(Error::Expired);
            }
        }
        Ok(expires_at)
    }

    pub fn outstanding(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_key_is_six_digits() {
        let mut registry = KeyRegistry::new();
        let issued = registry.issue(KeyDuration::Ttl(60), 1000.0).unwrap();
        assert_eq!(issued.key.len(), 6);
        assert!(issued.key.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(issued.expires_at, Some(1060.0));
        assert_eq!(registry.outstanding(), 1);
    }

    #[test]
    fn redeem_spends_the_key() {
        let mut registry = KeyRegistry::new();
        let issued = registry.issue(KeyDuration::Ttl(60), 1000.0).unwrap();

        assert_eq!(registry.redeem(&issued.key, 1010.0).unwrap(), Some(1060.0));
        assert_eq!(registry.outstanding(), 0);
        assert!(matches!(
            registry.redeem(&issued.key, 1010.0),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn lifetime_key_redeems_without_expiry() {
        let mut registry = KeyRegistry::new();
        let issued = registry.issue(KeyDuration::Lifetime, 1000.0).unwrap();
        assert_eq!(registry.redeem(&issued.key, 9_999_999.0).unwrap(), None);
    }

    #[test]
    fn expired_key_is_removed_on_redemption() {
        let mut registry = KeyRegistry::new();
        let issued = registry.issue(KeyDuration::Ttl(10), 1000.0).unwrap();

        assert!(matches!(
            registry.redeem(&issued.key, 1011.0),
            Err(Error::Expired)
        ));
        assert_eq!(registry.outstanding(), 0);
        assert!(matches!(
            registry.redeem(&issued.key, 1011.0),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn key_valid_exactly_at_expiry_instant() {
        let mut registry = KeyRegistry::new();
        let issued = registry.issue(KeyDuration::Ttl(10), 1000.0).unwrap();
        // Expired only when strictly past the deadline.
        assert_eq!(registry.redeem(&issued.key, 1010.0).unwrap(), Some(1010.0));
    }
}
