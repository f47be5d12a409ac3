//! Content renderer: turns untrusted text into a display-ready [`Document`].
//!
//! Text is parsed as GitHub-flavored markdown with single newlines kept as
//! line breaks. Raw HTML from the source is carried as literal text and link
//! destinations are filtered through [`sanitize::sanitize_href`], so nothing
//! in the output can execute in a display context.

use std::collections::HashMap;

use markdown::{mdast, to_mdast, ParseOptions};
use shared::domain::RenderMode;

pub mod document;
mod html;
mod plain;
pub mod sanitize;

pub use document::{Block, Document, Inline, List, ListItem, Table};

/// Sanitized, display-ready content. The only way to build one is through the
/// markdown transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableContent {
    mode: RenderMode,
    document: Document,
}

impl RenderableContent {
    /// Absent or blank text yields empty content.
    pub fn render(mode: RenderMode, text: Option<&str>) -> Self {
        let document = text.map(render_markdown).unwrap_or_default();
        Self { mode, document }
    }

    pub fn user_echo(text: &str) -> Self {
        Self::render(RenderMode::UserEcho, Some(text))
    }

    pub fn service_output(text: &str) -> Self {
        Self::render(RenderMode::ServiceOutput, Some(text))
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn to_html(&self) -> String {
        html::to_html(&self.document)
    }

    pub fn to_plain_text(&self) -> String {
        plain::to_plain_text(&self.document)
    }
}

/// Parses `text` into a [`Document`]. Pure and deterministic.
pub fn render_markdown(text: &str) -> Document {
    let root = match to_mdast(text, &ParseOptions::gfm()) {
        Ok(node) => node,
        Err(_) => mdast::Node::Text(mdast::Text {
            value: text.to_string(),
            position: None,
        }),
    };

    let children = match root {
        mdast::Node::Root(root) => root.children,
        other => vec![other],
    };

    let lowering = Lowering::new(&children);
    Document {
        blocks: lowering.blocks(&children, 0),
    }
}

/// Containers nested deeper than this are flattened to their text, which
/// keeps the lowered tree shallow for the serializers.
const MAX_NESTING: usize = 32;

struct LinkDefinition {
    url: String,
    title: Option<String>,
}

struct Lowering {
    definitions: HashMap<String, LinkDefinition>,
}

impl Lowering {
    fn new(nodes: &[mdast::Node]) -> Self {
        let mut definitions = HashMap::new();
        collect_definitions(nodes, &mut definitions);
        Self { definitions }
    }

    fn blocks(&self, nodes: &[mdast::Node], depth: usize) -> Vec<Block> {
        if depth >= MAX_NESTING {
            let text = nodes
                .iter()
                .map(flatten_text)
                .filter(|text| !text.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if text.is_empty() {
                return Vec::new();
            }
            return vec![Block::Paragraph(text_with_breaks(&text))];
        }
        nodes
            .iter()
            .filter_map(|node| self.block(node, depth))
            .collect()
    }

    fn block(&self, node: &mdast::Node, depth: usize) -> Option<Block> {
        let depth = depth + 1;
        let block = match node {
            mdast::Node::Paragraph(paragraph) => {
                Block::Paragraph(self.inlines(&paragraph.children, depth))
            }
            mdast::Node::Heading(heading) => Block::Heading {
                depth: heading.depth,
                children: self.inlines(&heading.children, depth),
            },
            mdast::Node::Code(code) => Block::CodeBlock {
                lang: code.lang.clone(),
                code: code.value.clone(),
            },
            mdast::Node::List(list) => Block::List(self.list(list, depth)),
            mdast::Node::Blockquote(blockquote) => {
                Block::Blockquote(self.blocks(&blockquote.children, depth))
            }
            mdast::Node::Table(table) => Block::Table(self.table(table, depth)),
            mdast::Node::ThematicBreak(_) => Block::ThematicBreak,
            mdast::Node::Html(html) => {
                Block::Paragraph(text_with_breaks(html.value.trim_end_matches('\n')))
            }
            mdast::Node::Definition(_) => return None,
            other => {
                let text = flatten_text(other);
                if text.trim().is_empty() {
                    return None;
                }
                Block::Paragraph(text_with_breaks(&text))
            }
        };
        Some(block)
    }

    fn list(&self, list: &mdast::List, depth: usize) -> List {
        let items: Vec<ListItem> = list
            .children
            .iter()
            .filter_map(|node| match node {
                mdast::Node::ListItem(item) => Some(ListItem {
                    checked: item.checked,
                    spread: item.spread,
                    blocks: self.blocks(&item.children, depth + 1),
                }),
                _ => None,
            })
            .collect();

        // One item with blank-line separated content makes the whole list loose.
        let spread = list.spread || items.iter().any(|item| item.spread);
        List {
            ordered: list.ordered,
            start: list.start,
            spread,
            items,
        }
    }

    fn table(&self, table: &mdast::Table, depth: usize) -> Table {
        let rows = table
            .children
            .iter()
            .filter_map(|row| match row {
                mdast::Node::TableRow(row) => Some(
                    row.children
                        .iter()
                        .map(|cell| match cell {
                            mdast::Node::TableCell(cell) => self.inlines(&cell.children, depth),
                            other => self.inlines(std::slice::from_ref(other), depth),
                        })
                        .collect(),
                ),
                _ => None,
            })
            .collect();
        Table { rows }
    }

    fn inlines(&self, nodes: &[mdast::Node], depth: usize) -> Vec<Inline> {
        let mut out = Vec::new();
        if depth >= MAX_NESTING {
            let text: String = nodes.iter().map(flatten_text).collect();
            out.extend(text_with_breaks(&text));
            return out;
        }
        for node in nodes {
            self.push_inline(node, &mut out, depth);
        }
        out
    }

    fn push_inline(&self, node: &mdast::Node, out: &mut Vec<Inline>, depth: usize) {
        let depth = depth + 1;
        match node {
            mdast::Node::Text(text) => out.extend(text_with_breaks(&text.value)),
            mdast::Node::Emphasis(emphasis) => {
                out.push(Inline::Emphasis(self.inlines(&emphasis.children, depth)))
            }
            mdast::Node::Strong(strong) => {
                out.push(Inline::Strong(self.inlines(&strong.children, depth)))
            }
            mdast::Node::Delete(delete) => {
                out.push(Inline::Delete(self.inlines(&delete.children, depth)))
            }
            mdast::Node::InlineCode(code) => out.push(Inline::Code(code.value.clone())),
            mdast::Node::Link(link) => out.push(Inline::Link {
                href: sanitize::sanitize_href(&link.url),
                title: link.title.clone(),
                children: self.inlines(&link.children, depth),
            }),
            mdast::Node::LinkReference(reference) => {
                let children = self.inlines(&reference.children, depth);
                match self.definitions.get(&reference.identifier) {
                    Some(definition) => out.push(Inline::Link {
                        href: sanitize::sanitize_href(&definition.url),
                        title: definition.title.clone(),
                        children,
                    }),
                    None => out.extend(children),
                }
            }
            mdast::Node::Break(_) => out.push(Inline::Break),
            // Inline HTML is shown as the literal source text.
            mdast::Node::Html(html) => out.extend(text_with_breaks(&html.value)),
            mdast::Node::Image(image) => push_text(out, &image.alt),
            mdast::Node::ImageReference(image) => push_text(out, &image.alt),
            mdast::Node::Paragraph(paragraph) => {
                out.extend(self.inlines(&paragraph.children, depth))
            }
            other => push_text(out, &flatten_text(other)),
        }
    }
}

/// Text content of `node`. Walks with an explicit stack so arbitrarily deep
/// trees are safe; paragraphs and other blocks start on a new line.
fn flatten_text(node: &mdast::Node) -> String {
    let mut out = String::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            mdast::Node::Text(mdast::Text { value, .. })
            | mdast::Node::InlineCode(mdast::InlineCode { value, .. })
            | mdast::Node::Html(mdast::Html { value, .. }) => out.push_str(value),
            mdast::Node::Code(mdast::Code { value, .. }) => {
                start_line(&mut out);
                out.push_str(value);
            }
            mdast::Node::Image(mdast::Image { alt, .. })
            | mdast::Node::ImageReference(mdast::ImageReference { alt, .. }) => out.push_str(alt),
            mdast::Node::Break(_) => out.push('\n'),
            mdast::Node::Definition(_) => {}
            other => {
                if matches!(
                    other,
                    mdast::Node::Paragraph(_) | mdast::Node::Heading(_) | mdast::Node::TableRow(_)
                ) {
                    start_line(&mut out);
                }
                if let Some(children) = other.children() {
                    stack.extend(children.iter().rev());
                }
            }
        }
    }
    out
}

fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn collect_definitions(nodes: &[mdast::Node], definitions: &mut HashMap<String, LinkDefinition>) {
    let mut stack: Vec<&mdast::Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            mdast::Node::Definition(definition) => {
                // First definition wins, as in CommonMark.
                definitions
                    .entry(definition.identifier.clone())
                    .or_insert_with(|| LinkDefinition {
                        url: definition.url.clone(),
                        title: definition.title.clone(),
                    });
            }
            other => {
                if let Some(children) = other.children() {
                    stack.extend(children.iter().rev());
                }
            }
        }
    }
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        out.push(Inline::Text(text.to_string()));
    }
}

/// Splits soft line endings into explicit breaks.
fn text_with_breaks(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    for (index, segment) in text.split('\n').enumerate() {
        if index > 0 {
            out.push(Inline::Break);
        }
        push_text(&mut out, segment.strip_suffix('\r').unwrap_or(segment));
    }
    out
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
