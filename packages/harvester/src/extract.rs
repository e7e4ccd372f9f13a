//! Normalized text extraction from title XML.
//!
//! A title document is reduced to the text of its section nodes: the section
//! heading (which carries the citation) followed by the body paragraphs,
//! with inline markup flattened and whitespace collapsed. Sections inside
//! appendices are skipped. When a document parses but contains no
//! recognizable sections, the raw body stands in for the text and the
//! outcome is tagged degraded instead of failing the title.

use roxmltree::{Document, Node};

use crate::error::Result;

/// Outcome of text extraction for one title document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text assembled from recognized section structure.
    Structured(String),
    /// No recognizable sections; the raw document body stands in.
    Degraded(String),
}

impl Extraction {
    /// The normalized text, whichever way it was obtained.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Extraction::Structured(text) | Extraction::Degraded(text) => text,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Extraction::Degraded(_))
    }
}

/// Extract normalized text from title XML.
///
/// Deterministic: the same input always yields the same output, so content
/// fingerprints are comparable across runs.
///
/// # Returns
/// * `Extraction::Structured` when at least one section was found
/// * `Extraction::Degraded` when the XML parsed but held no sections
/// * `Err(HarvestError::Xml)` when the input is not XML at all
pub fn extract(raw: &str) -> Result<Extraction> {
    let doc = Document::parse(raw)?;

    let sections: Vec<String> = doc
        .descendants()
        .filter(|n| is_section(*n) && !inside_appendix(*n))
        .map(section_text)
        .filter(|text| !text.is_empty())
        .collect();

    if sections.is_empty() {
        return Ok(Extraction::Degraded(raw.to_string()));
    }

    Ok(Extraction::Structured(sections.join("\n\n")))
}

/// Section nodes are marked by their TYPE attribute, not their tag name;
/// the publisher varies the DIV level across titles.
fn is_section(node: Node<'_, '_>) -> bool {
    node.is_element() && node.attribute("TYPE") == Some("SECTION")
}

/// Walk ancestors looking for appendix markup.
fn inside_appendix(node: Node<'_, '_>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_element() && parent.attribute("TYPE") == Some("APPENDIX") {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Assemble one section's text: heading first, then each paragraph.
fn section_text(section: Node<'_, '_>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(head) = find_child(section, "HEAD") {
        let text = inline_text(head);
        if !text.is_empty() {
            parts.push(text);
        }
    }

    for node in section.descendants() {
        if node.is_element() && matches!(node.tag_name().name(), "P" | "FP") {
            let text = inline_text(node);
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }

    parts.join(" ")
}

fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

/// Flatten a node's text content, collapsing whitespace runs to single spaces.
fn inline_text(node: Node<'_, '_>) -> String {
    let mut raw = String::new();
    collect_text(node, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: Node<'_, '_>, out: &mut String) {
    if let Some(t) = node.text() {
        out.push_str(t);
    }
    for child in node.children() {
        if child.is_element() {
            collect_text(child, out);
        }
        if let Some(tail) = child.tail() {
            out.push_str(tail);
        }
    }
}
