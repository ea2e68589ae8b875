// src/infrastructure/html/netscape.rs
//! Parser for Netscape bookmark HTML exports (the format browsers produce
//! under "export bookmarks").

use select::document::Document;
use select::node::Node;
use select::predicate::Name;
use tracing::{debug, instrument};

use crate::domain::import::{BookmarkRecord, ParsedBookmarks, IMPORTED_FROM_BROWSER_TAG};

/// Extracts one record per anchor with a usable href. Anchors without the
/// attribute are ignored; an empty or `javascript:` href counts as skipped.
/// Malformed markup is tolerated; the underlying parser recovers instead of
/// failing.
#[instrument(skip_all, level = "debug")]
pub fn parse_bookmark_html(html: &str) -> ParsedBookmarks {
    let document = Document::from(html);

    let mut records = Vec::new();
    let mut skipped = 0;

    for anchor in document.find(Name("a")) {
        // Anchors without an href attribute are not bookmarks at all and do
        // not count towards the skip total.
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        if href.is_empty() || href.starts_with("javascript:") {
            skipped += 1;
            continue;
        }

        let text = anchor.text();
        let title = text.trim();
        let title = if title.is_empty() { href } else { title };

        // The fixed top-level tag applies to every record; a derived folder
        // chain rides alongside it as a second path, never merged into it.
        let mut folder_paths = vec![vec![IMPORTED_FROM_BROWSER_TAG.to_string()]];
        let chain = folder_chain(&anchor);
        if !chain.is_empty() {
            folder_paths.push(chain);
        }

        records.push(BookmarkRecord {
            title: title.to_string(),
            url: href.to_string(),
            folder_paths,
        });
    }

    debug!("Parsed {} record(s), skipped {}", records.len(), skipped);
    ParsedBookmarks { records, skipped }
}

/// Folder names for an anchor, root first. Each enclosing `dl` contributes
/// the name from its preceding heading, collected leaf-to-root and reversed.
fn folder_chain(anchor: &Node) -> Vec<String> {
    let mut segments = Vec::new();

    let mut current = anchor.parent();
    while let Some(node) = current {
        if node.name() == Some("dl") {
            if let Some(name) = folder_heading(&node) {
                segments.push(name);
            }
        }
        current = node.parent();
    }

    segments.reverse();
    segments
}

/// The folder name announced before a `dl`, taken from its closest element
/// sibling. A `dt` sibling names the folder through its `h3`; when the
/// export omits `</dt>` end tags the sublist ends up nested inside the `dt`
/// and the sibling is the `h3` itself. Any other element means this list
/// has no heading.
fn folder_heading(dl: &Node) -> Option<String> {
    let mut sibling = dl.prev();
    while let Some(node) = sibling {
        match node.name() {
            None => sibling = node.prev(),
            Some("h3") => return Some(node.text().trim().to_string()),
            Some("dt") => {
                return node
                    .find(Name("h3"))
                    .next()
                    .map(|h3| h3.text().trim().to_string())
            }
            Some(_) => return None,
        }
    }
    None
}
