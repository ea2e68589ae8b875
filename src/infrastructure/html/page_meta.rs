// src/infrastructure/html/page_meta.rs
//! Metadata extraction from fetched page HTML: OpenGraph tags first, plain
//! meta tags and document structure as fallback.

use select::document::Document;
use select::predicate::{Attr, Name};

use crate::domain::metadata::PageMetadata;
use crate::util::url::resolve_url;

/// Pulls title, description and image out of a page. A field is `None` only
/// when every source for it is missing; an empty value still counts as
/// extracted. A non-empty image URL is made absolute against `page_url`.
pub fn extract_page_metadata(html: &str, page_url: &str) -> PageMetadata {
    let document = Document::from(html);

    let title = meta_content(&document, "property", "og:title").or_else(|| {
        document
            .find(Name("title"))
            .next()
            .map(|node| node.text().trim().to_string())
    });

    let description = meta_content(&document, "property", "og:description")
        .or_else(|| meta_content(&document, "name", "description"));

    let image = meta_content(&document, "property", "og:image")
        .or_else(|| meta_content(&document, "name", "twitter:image"))
        .or_else(|| {
            document
                .find(Name("img"))
                .filter_map(|node| node.attr("src"))
                .next()
                .map(|src| src.trim().to_string())
        })
        .map(|src| {
            if src.is_empty() {
                src
            } else {
                resolve_url(&src, page_url)
            }
        });

    PageMetadata {
        title,
        description,
        image,
    }
}

fn meta_content(document: &Document, attr: &str, value: &str) -> Option<String> {
    document
        .find(Attr(attr, value))
        .filter_map(|node| node.attr("content"))
        .next()
        .map(|content| content.trim().to_string())
}
