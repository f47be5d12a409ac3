//! Plain-text layout of a [`Document`] for terminal display.

use crate::document::{inline_text, Block, Document, Inline};

pub fn to_plain_text(document: &Document) -> String {
    block_lines(&document.blocks).join("\n")
}

fn block_lines(blocks: &[Block]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(single_block_lines(block));
    }
    lines
}

fn single_block_lines(block: &Block) -> Vec<String> {
    match block {
        Block::Paragraph(children) => split_lines(&inline_plain(children)),
        Block::Heading { depth, children } => {
            let marker = "#".repeat(usize::from((*depth).clamp(1, 6)));
            vec![format!("{marker} {}", inline_plain(children).replace('\n', " "))]
        }
        Block::CodeBlock { code, .. } => code
            .trim_end_matches('\n')
            .lines()
            .map(|line| format!("    {line}"))
            .collect(),
        Block::List(list) => {
            let mut lines = Vec::new();
            let mut number = list.start.unwrap_or(1);
            for item in &list.items {
                let mut bullet = if list.ordered {
                    let bullet = format!("{number}. ");
                    number = number.saturating_add(1);
                    bullet
                } else {
                    "- ".to_string()
                };
                match item.checked {
                    Some(true) => bullet.push_str("[x] "),
                    Some(false) => bullet.push_str("[ ] "),
                    None => {}
                }

                let indent = " ".repeat(bullet.chars().count());
                let item_lines = if list.spread {
                    block_lines(&item.blocks)
                } else {
                    item.blocks.iter().flat_map(single_block_lines).collect()
                };
                if item_lines.is_empty() {
                    lines.push(bullet.trim_end().to_string());
                    continue;
                }
                for (index, line) in item_lines.into_iter().enumerate() {
                    if index == 0 {
                        lines.push(format!("{bullet}{line}"));
                    } else if line.is_empty() {
                        lines.push(line);
                    } else {
                        lines.push(format!("{indent}{line}"));
                    }
                }
            }
            lines
        }
        Block::Blockquote(children) => block_lines(children)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect(),
        Block::Table(table) => table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| inline_plain(cell).replace('\n', " "))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect(),
        Block::ThematicBreak => vec!["---".to_string()],
    }
}

fn inline_plain(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Emphasis(children) | Inline::Strong(children) | Inline::Delete(children) => {
                out.push_str(&inline_plain(children))
            }
            Inline::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            Inline::Link {
                href: Some(href),
                children,
                ..
            } => {
                let label = inline_plain(children);
                if label == *href || inline_text(children) == *href {
                    out.push_str(&label);
                } else {
                    out.push_str(&format!("{label} <{href}>"));
                }
            }
            Inline::Link {
                href: None,
                children,
                ..
            } => out.push_str(&inline_plain(children)),
            Inline::Break => out.push('\n'),
        }
    }
    out
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
