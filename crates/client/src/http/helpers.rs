//! Helper functions for the HTTP client

use url::Url;

/// The URL with any password replaced, for logging.
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_err() {
                return "<unloggable url>".to_string();
            }
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}
