use std::collections::HashMap;

use crate::error::{Error, Result};

/// Per-user last-action timestamps for throttling one action. In-memory
/// only; a restart clears every window.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    last_action: HashMap<i64, f64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set: rejects with the remaining wait when the previous
    /// action for `user_id` is newer than `cooldown_secs`, otherwise records
    /// `now` and accepts.
    pub fn try_act(&mut self, user_id: i64, cooldown_secs: u64, now: f64) -> Result<()> {
        if let Some(last) = self.last_action.get(&user_id) {
            let elapsed = now - last;
            if elapsed < cooldown_secs as f64 {
                let retry_after_secs = (cooldown_secs as f64 - elapsed).ceil() as u64;
                return Err(Error::RateLimited { retry_after_secs });
            }
        }
        self.last_action.insert(user_id, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_action_is_accepted() {
        let mut tracker = CooldownTracker::new();
        assert!(tracker.try_act(7, 10, 1000.0).is_ok());
    }

    #[test]
    fn second_action_inside_window_is_rejected() {
        let mut tracker = CooldownTracker::new();
        tracker.try_act(7, 10, 1000.0).unwrap();
        assert!(matches!(
            tracker.try_act(7, 10, 1004.5),
            Err(Error::RateLimited { retry_after_secs: 6 })
        ));
    }

    #[test]
    fn action_after_window_is_accepted() {
        let mut tracker = CooldownTracker::new();
        tracker.try_act(7, 10, 1000.0).unwrap();
        assert!(tracker.try_act(7, 10, 1010.0).is_ok());
    }

    #[test]
    fn rejection_does_not_extend_the_window() {
        let mut tracker = CooldownTracker::new();
        tracker.try_act(7, 10, 1000.0).unwrap();
        let _ = tracker.try_act(7, 10, 1009.0);
        assert!(tracker.try_act(7, 10, 1010.0).is_ok());
    }

    #[test]
    fn windows_are_per_user() {
        let mut tracker = CooldownTracker::new();
        tracker.try_act(7, 10, 1000.0).unwrap();
        assert!(tracker.try_act(8, 10, 1000.0).is_ok());
    }
}
