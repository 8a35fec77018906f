// Address bar input normalization.

use url::Url;

/// Turns address bar text into a navigable URL.
///
/// Surrounding whitespace is trimmed and `https://` is prepended when no
/// http(s) scheme is given. Empty or unparseable input yields `None`; the
/// caller drops the navigation without telling the user.
pub fn normalize_address(input: &str) -> Option<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    Url::parse(&candidate).ok()
}
