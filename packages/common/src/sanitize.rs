//! Best-effort scrubbing of user-supplied text before it is stored or echoed.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid pattern"));
static IFRAME_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe>").expect("valid pattern"));
static JS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid pattern"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Strip script and iframe blocks, `javascript:` URLs and inline event handlers.
///
/// Not a full HTML sanitizer; rendered output should still be escaped.
pub fn sanitize_html(html: &str) -> String {
    let html = SCRIPT_BLOCK.replace_all(html, "");
    let html = IFRAME_BLOCK.replace_all(&html, "");
    let html = JS_SCHEME.replace_all(&html, "");
    EVENT_HANDLER.replace_all(&html, "").into_owned()
}

/// Trim, collapse runs of whitespace and drop angle brackets.
pub fn sanitize_text(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect()
}

/// Whether `url` is an absolute URL with a scheme and a host.
pub fn validate_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| u.has_host())
}
