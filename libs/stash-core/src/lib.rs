pub mod access;
pub mod catalog;
pub mod cooldown;
pub mod duration;
pub mod error;
pub mod keys;
pub mod sample;
pub mod store;

pub use access::AccessLedger;
pub use catalog::DatasetCatalog;
pub use cooldown::CooldownTracker;
pub use duration::KeyDuration;
pub use error::{Error, Result};
pub use keys::{IssuedKey, KeyRegistry};
pub use store::AccessStore;

#[cfg(test)]
mod tests {
    use super::*;

    // End-to-end grant lifecycle with simulated time: issue, redeem, check,
    // expire.
    #[test]
    fn timed_keys_grant_access_until_their_expiry() {
        for (spec, secs) in [("30s", 30.0), ("5m", 300.0), ("2h", 7200.0), ("1d", 86400.0)] {
            let mut registry = KeyRegistry::new();
            let mut ledger = AccessLedger::new();
            let t0 = 1_000_000.0;

            let duration = KeyDuration::parse(spec).unwrap();
            let issued = registry.issue(duration, t0).unwrap();
            let expires_at = registry.redeem(&issued.key, t0).unwrap();
            ledger.grant(7, expires_at);

            assert!(ledger.has_access(7, t0), "{spec}: fresh grant");
            assert!(ledger.has_access(7, t0 + secs - 1.0), "{spec}: inside window");
            assert!(!ledger.has_access(7, t0 + secs + 1.0), "{spec}: past expiry");
        }
    }

    #[test]
    fn lifetime_key_grants_access_forever() {
        let mut registry = KeyRegistry::new();
        let mut ledger = AccessLedger::new();

        let issued = registry
            .issue(KeyDuration::parse("lifetime").unwrap(), 1000.0)
            .unwrap();
        ledger.grant(7, registry.redeem(&issued.key, 1000.0).unwrap());

        assert!(ledger.has_access(7, f64::MAX));
    }
}
