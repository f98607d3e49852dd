/// URL formatting and validation rules shared by the options page and the launcher
use url::Url;

/// Schemes a stored site may use
pub const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "chrome-extension", "file"];

/// Prefixes that suppress the default `https://`
const RECOGNIZED_PREFIXES: [&str; 4] = ["http://", "https://", "chrome-extension://", "file://"];

const DEFAULT_PREFIX: &str = "https://";

/// Turn a user-entered string into a URL ready for storage
///
/// Algorithm:
/// 1. Trim surrounding whitespace; an empty result is rejected
/// 2. If the text does not start with a recognized scheme prefix,
///    prepend `https://`
/// 3. Reject the result if it does not parse as a URL
///
/// The formatted text is returned as typed (no normalization), so
/// `example.com` becomes `https://example.com`, not `https://example.com/`.
///
/// Examples:
/// - `  google.com ` → `https://google.com`
/// - `http://x.test` → `http://x.test`
/// - `file:///home/me/notes.html` → unchanged
/// - `bad host name` → rejected
pub fn format_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if RECOGNIZED_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_PREFIX, trimmed)
    };

    Url::parse(&candidate).ok().map(|_| candidate)
}

/// Strict check used for anything that gets persisted: the URL must parse
/// and its scheme must be one of [`ALLOWED_SCHEMES`]
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| ALLOWED_SCHEMES.contains(&parsed.scheme()))
        .unwrap_or(false)
}

/// Loose check used by the launcher: any parseable URL, whatever its scheme
pub fn is_structurally_valid(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Local files only open when the user grants file-URL access to the extension
pub fn is_file_url(url: &str) -> bool {
    url.starts_with("file:///")
}
