//! Field extraction from a Yahoo Finance quote page.
//!
//! Each field sits behind one function with its own anchor so a layout change
//! only touches that function. A missing field is an expected outcome: the
//! name falls back to [`NAME_NOT_FOUND`] and the price to `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::markup::{
    clean_text, extract_attr, inner_html, QuotePage, CLASS_ATTR, FIELD_ATTR, TEST_ID_ATTR,
    VALUE_ATTR,
};

/// Returned by [`extract_company_name`] when the name heading is missing.
pub const NAME_NOT_FOUND: &str = "name not found";

/// Class prefix Yahoo's Svelte build puts on styled quote-header elements.
const STYLED_CLASS_PREFIX: &str = "yf-";

const PRICE_TEST_ID: &str = "qsp-price";
const PRICE_STREAMER_FIELD: &str = "regularMarketPrice";

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b([^>]*)>(.*?)</h1>").expect("valid h1 regex"));
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthesis regex"));
static TEST_ID_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9-]*)\b[^>]*\sdata-testid\s*=\s*[^>]*>")
        .expect("valid data-testid regex")
});
static STREAMER_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<fin-streamer\b[^>]*>").expect("valid fin-streamer regex"));

/// Company display name from the quote header.
///
/// Takes the first `<h1>` carrying a `yf-` styling class, drops any
/// parenthesized group such as the repeated `(AAPL)`, and trims.
/// Returns [`NAME_NOT_FOUND`] when no such heading exists or it has no text.
#[must_use]
pub fn extract_company_name(page: &QuotePage) -> String {
    let heading = H1_RE.captures_iter(page.html()).find(|cap| {
        cap.get(1)
            .and_then(|attrs| extract_attr(attrs.as_str(), &CLASS_ATTR))
            .is_some_and(|class| {
                class
                    .split_whitespace()
                    .any(|token| token.starts_with(STYLED_CLASS_PREFIX))
            })
    });

    let Some(heading) = heading else {
        tracing::warn!("quote page has no styled name heading");
        return NAME_NOT_FOUND.to_string();
    };

    let text = clean_text(heading.get(2).map_or("", |m| m.as_str()));
    let name = PAREN_RE.replace_all(&text, "");
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        tracing::warn!("styled name heading is empty");
        return NAME_NOT_FOUND.to_string();
    }
    name
}

/// Current price string, exactly as rendered (e.g. `"195.27"`).
///
/// Prefers the element tagged `data-testid="qsp-price"`; falls back to the
/// older `<fin-streamer data-field="regularMarketPrice">` markup. `None` when
/// neither is present with non-empty text.
#[must_use]
pub fn extract_price(page: &QuotePage) -> Option<String> {
    let price = price_by_test_id(page.html()).or_else(|| price_by_streamer(page.html()));
    if price.is_none() {
        tracing::warn!("quote page has no price element");
    }
    price
}

fn price_by_test_id(html: &str) -> Option<String> {
    TEST_ID_TAG_RE.captures_iter(html).find_map(|cap| {
        let open = cap.get(0)?;
        let test_id = extract_attr(open.as_str(), &TEST_ID_ATTR)?;
        if test_id != PRICE_TEST_ID {
            return None;
        }
        let tag_name = cap.get(1)?.as_str();
        let text = clean_text(inner_html(html, open.end(), tag_name)?);
        non_empty(text)
    })
}

fn price_by_streamer(html: &str) -> Option<String> {
    STREAMER_TAG_RE.find_iter(html).find_map(|open| {
        let field = extract_attr(open.as_str(), &FIELD_ATTR)?;
        if field != PRICE_STREAMER_FIELD {
            return None;
        }
        inner_html(html, open.end(), "fin-streamer")
            .map(clean_text)
            .and_then(non_empty)
            .or_else(|| extract_attr(open.as_str(), &VALUE_ATTR).and_then(non_empty))
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
