pub mod access_service;
pub mod admin_service;
pub mod drop_service;
pub mod key_service;

/// Current wall-clock time as fractional epoch seconds, the unit the core
/// and the persisted ledger use throughout.
pub(crate) fn epoch_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
