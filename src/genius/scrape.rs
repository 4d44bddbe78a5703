//! Lyrics extraction from Genius song pages.
//!
//! The lyrics live in one or more `div[data-lyrics-container="true"]` blocks,
//! with `<br>` as line breaks and section labels as plain `[Label]` lines.

use scraper::{ElementRef, Html, Node, Selector};

const CONTAINER: &str = r#"div[data-lyrics-container="true"]"#;

/// Plain lyrics text of a song page, `None` if the page has no lyrics blocks.
pub fn extract_lyrics(html: &str) -> anyhow::Result<Option<String>> {
    let selector = Selector::parse(CONTAINER)
        .map_err(|e| anyhow::anyhow!("invalid lyrics selector: {e:?}"))?;
    let doc = Html::parse_document(html);

    let blocks: Vec<String> = doc
        .select(&selector)
        .map(|container| {
            let mut text = String::new();
            push_text(container, &mut text);
            text
        })
        .collect();

    if blocks.is_empty() {
        return Ok(None);
    }
    Ok(Some(blocks.join("\n").trim().to_string()))
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            // page header ("N Contributors", translations) nested in the first block
            Node::Element(el) if el.attr("data-exclude-from-selection") == Some("true") => {}
            Node::Element(_) => {
                if let Some(inner) = ElementRef::wrap(child) {
                    push_text(inner, out);
                }
            }
            _ => {}
        }
    }
}
