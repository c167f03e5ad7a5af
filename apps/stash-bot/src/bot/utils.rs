/// Header prefixed to every reply.
pub fn banner() -> &'static str {
    "🌀 <b>Stash Hub</b>\n───────────────\n"
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// "Lifetime" or a formatted UTC datetime for an expiry timestamp.
pub fn fmt_expiry(expires_at: Option<f64>) -> String {
    match expires_at {
        None => "♾️ Lifetime".to_string(),
        Some(ts) => chrono::DateTime::from_timestamp(ts as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| format!("{ts}")),
    }
}
