//! Visible text from an allergen web page.

use std::sync::LazyLock;

use regex::Regex;

static RE_MAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<main[^>]*>(.*?)</main>").unwrap());
static RE_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());
static RE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static RE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static RE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</?(p|div|li|tr|td|th|h[1-6]|table|ul|ol|section|article)[^>]*>")
        .unwrap()
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Reduce a page to one line per visible text block.
///
/// Uses `<main>` when present, else `<body>`, else the whole document.
/// Block-level tags become line breaks so table cells land on their own
/// lines, ready for [`crate::pipeline::text::preprocess_text`].
pub fn html_to_text(html: &str) -> String {
    let content = RE_MAIN
        .captures(html)
        .or_else(|| RE_BODY.captures(html))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html);

    let text = RE_SCRIPT.replace_all(content, "");
    let text = RE_STYLE.replace_all(&text, "");
    let text = RE_BREAK.replace_all(&text, "\n");
    let text = RE_TAG.replace_all(&text, "");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
