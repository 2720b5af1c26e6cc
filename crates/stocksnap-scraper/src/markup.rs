//! Parsed quote-page markup and the low-level tag helpers shared by the
//! field extractors.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

pub(crate) static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("class"));
pub(crate) static TEST_ID_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("data-testid"));
pub(crate) static FIELD_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("data-field"));
pub(crate) static VALUE_ATTR: LazyLock<Regex> = LazyLock::new(|| attr_regex("value"));

fn attr_regex(attr: &str) -> Regex {
    Regex::new(&format!(r#"(?is)\s{attr}\s*=\s*["']([^"']*)["']"#)).expect("valid attr regex")
}

/// The HTML body of one quote page.
///
/// Extraction never fails on a `QuotePage`; missing fields surface as
/// sentinels or `None` from [`crate::extract`].
#[derive(Debug, Clone)]
pub struct QuotePage {
    html: String,
}

impl QuotePage {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Returns the value captured by one of the `*_ATTR` patterns inside a
/// single opening tag.
pub(crate) fn extract_attr(tag: &str, attr: &Regex) -> Option<String> {
    attr.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

/// Returns the markup between the end of an opening tag at `open_end` and
/// the next matching `</tag_name>`.
pub(crate) fn inner_html<'a>(html: &'a str, open_end: usize, tag_name: &str) -> Option<&'a str> {
    let close = format!("</{}", tag_name.to_ascii_lowercase());
    let rest = &html[open_end..];
    let idx = rest.to_ascii_lowercase().find(&close)?;
    Some(&rest[..idx])
}

/// Strips tags, decodes common entities, and collapses whitespace.
pub(crate) fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
