use crate::error::{Error, Result};

/// Validity window requested for a new access key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDuration {
    Lifetime,
    /// Time-to-live in seconds.
    Ttl(u64),
}

impl KeyDuration {
    /// Parses an admin duration spec: the literal `lifetime`, or
    /// `<integer><unit>` with unit one of s/m/h/d.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("lifetime") {
            return Ok(Self::Lifetime);
        }
        let invalid =
            || Error::InvalidArgument(format!("bad duration spec '{spec}'"));

        let unit = spec.chars().last().ok_or_else(invalid)?;
        let digits = &spec[..spec.len() - unit.len_utf8()];
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        let unit_secs = match unit {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86400,
            _ => return Err(invalid()),
        };
        let secs = value.checked_mul(unit_secs).ok_or_else(invalid)?;
        Ok(Self::Ttl(secs))
    }

    /// Absolute expiry in epoch seconds, `None` for lifetime.
    pub fn expires_at(&self, now: f64) -> Option<f64> {
        match self {
            Self::Lifetime => None,
            Self::Ttl(secs) => Some(now + *secs as f64),
        }
    }
}
