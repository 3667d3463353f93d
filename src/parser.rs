//! Extracts article previews from raw feed markup.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::models::FeedEntry;

/// Maximum number of items inspected per feed.
pub const MAX_ENTRIES: usize = 3;

/// Returns up to [`MAX_ENTRIES`] `(title, link)` pairs from the first
/// [`MAX_ENTRIES`] `<item>` elements, in document order.
///
/// Any well-formed document counts, whatever its root. Items missing a title
/// or a link are skipped rather than replaced by a later item. Input that
/// does not parse yields no entries.
pub fn parse_entries(raw: &str) -> Vec<FeedEntry> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = match Document::parse_with_options(raw, options) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("Feed body did not parse: {}", e);
            return Vec::new();
        }
    };

    doc.descendants()
        .filter(|node| is_element_named(node, "item"))
        .take(MAX_ENTRIES)
        .filter_map(|item| {
            let title = first_text(item, "title")?;
            let link = first_text(item, "link")?;
            Some(FeedEntry {
                title: title.trim().to_string(),
                link: link.trim().to_string(),
            })
        })
        .collect()
}

fn is_element_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Text content of the first `tag` element below `item`, nested markup
/// included. An empty string counts as missing; whitespace does not.
fn first_text(item: Node, tag: &str) -> Option<String> {
    let element = item.descendants().find(|node| is_element_named(node, tag))?;
    let text: String = element
        .descendants()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect();
    (!text.is_empty()).then_some(text)
}
