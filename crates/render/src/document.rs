//! Display-ready document tree produced from markdown.
//!
//! Every node holds plain text only. Nothing in this tree is ever passed
//! through to a display surface verbatim; serializers escape all text.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { depth: u8, children: Vec<Inline> },
    CodeBlock { lang: Option<String>, code: String },
    List(List),
    Blockquote(Vec<Block>),
    Table(Table),
    ThematicBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    /// Loose lists keep paragraph wrappers around item content.
    pub spread: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub checked: Option<bool>,
    /// Item content was separated by blank lines in the source.
    pub spread: bool,
    pub blocks: Vec<Block>,
}

/// First row is the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Vec<Inline>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Delete(Vec<Inline>),
    Code(String),
    /// `href` is `None` when the destination was rejected.
    Link {
        href: Option<String>,
        title: Option<String>,
        children: Vec<Inline>,
    },
    Break,
}

pub(crate) fn inline_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Delete(children)
            | Inline::Link { children, .. } => out.push_str(&inline_text(children)),
            Inline::Break => out.push('\n'),
        }
    }
    out
}
