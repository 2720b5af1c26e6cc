//! RSS item extraction.

use quick_xml::events::Event;
use quick_xml::Reader;
use stocksnap_core::NewsItem;

use crate::error::SentimentError;

#[derive(Clone, Copy)]
enum ItemField {
    Title,
    Description,
}

/// Parse up to `max_items` `<item>` entries from an RSS document, in order.
///
/// Each item yields its `<title>` and `<description>` text (CDATA included),
/// trimmed. Items past `max_items` are not read. Channel-level `<title>` and
/// `<description>` are ignored.
///
/// # Errors
///
/// - [`SentimentError::MalformedEntry`] if an item lacks `<title>` or `<description>`.
/// - [`SentimentError::Xml`] if the document is not well-formed.
pub fn parse_feed_items(xml: &str, max_items: usize) -> Result<Vec<NewsItem>, SentimentError> {
    let mut items = Vec::new();
    if max_items == 0 {
        return Ok(items);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_item = false;
    let mut current: Option<ItemField> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"item" => {
                        in_item = true;
                        current = None;
                        title = None;
                        description = None;
                    }
                    b"title" if in_item && current.is_none() => {
                        current = Some(ItemField::Title);
                        title = Some(String::new());
                    }
                    b"description" if in_item && current.is_none() => {
                        current = Some(ItemField::Description);
                        description = Some(String::new());
                    }
                    _ => {}
                }
            }
            Event::Empty(e) if in_item => match e.name().as_ref() {
                b"title" => title = Some(String::new()),
                b"description" => description = Some(String::new()),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"title" | b"description" => current = None,
                b"item" if in_item => {
                    in_item = false;
                    let index = items.len();
                    let title = title
                        .take()
                        .ok_or(SentimentError::MalformedEntry { index, field: "title" })?;
                    let summary = description.take().ok_or(SentimentError::MalformedEntry {
                        index,
                        field: "description",
                    })?;
                    items.push(NewsItem {
                        title: title.trim().to_string(),
                        summary: summary.trim().to_string(),
                    });
                    if items.len() >= max_items {
                        break;
                    }
                }
                _ => {}
            },
            Event::Text(e) => {
                if let Some(field) = current {
                    let text = e.unescape()?;
                    push_text(field, &text, &mut title, &mut description);
                }
            }
            Event::CData(e) => {
                if let Some(field) = current {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    push_text(field, &text, &mut title, &mut description);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(count = items.len(), max_items, "parsed feed items");
    Ok(items)
}

fn push_text(
    field: ItemField,
    text: &str,
    title: &mut Option<String>,
    description: &mut Option<String>,
) {
    let target = match field {
        ItemField::Title => title,
        ItemField::Description => description,
    };
    if let Some(buf) = target.as_mut() {
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(text);
    }
}
