//! HTML serialization of a [`Document`]. All text and attribute values are
//! escaped; the only tags emitted are the fixed set below.

use crate::{
    document::{Block, Document, Inline, List, Table},
    sanitize::escape_html,
};

pub fn to_html(document: &Document) -> String {
    let mut out = String::new();
    write_blocks(&mut out, &document.blocks, false);
    out
}

fn write_blocks(out: &mut String, blocks: &[Block], tight: bool) {
    for block in blocks {
        write_block(out, block, tight);
    }
}

fn write_block(out: &mut String, block: &Block, tight: bool) {
    match block {
        Block::Paragraph(children) if tight => {
            write_inlines(out, children);
            out.push('\n');
        }
        Block::Paragraph(children) => {
            out.push_str("<p>");
            write_inlines(out, children);
            out.push_str("</p>\n");
        }
        Block::Heading { depth, children } => {
            let depth = (*depth).clamp(1, 6);
            out.push_str(&format!("<h{depth}>"));
            write_inlines(out, children);
            out.push_str(&format!("</h{depth}>\n"));
        }
        Block::CodeBlock { lang, code } => {
            match lang {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    escape_html(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape_html(code));
            if !code.is_empty() && !code.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("</code></pre>\n");
        }
        Block::List(list) => write_list(out, list),
        Block::Blockquote(children) => {
            out.push_str("<blockquote>\n");
            write_blocks(out, children, false);
            out.push_str("</blockquote>\n");
        }
        Block::Table(table) => write_table(out, table),
        Block::ThematicBreak => out.push_str("<hr />\n"),
    }
}

fn write_list(out: &mut String, list: &List) {
    let tag = if list.ordered { "ol" } else { "ul" };
    match list.start {
        Some(start) if list.ordered && start != 1 => {
            out.push_str(&format!("<ol start=\"{start}\">\n"));
        }
        _ => out.push_str(&format!("<{tag}>\n")),
    }

    for item in &list.items {
        out.push_str("<li>");
        match item.checked {
            Some(true) => out.push_str("<input type=\"checkbox\" disabled=\"\" checked=\"\" /> "),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled=\"\" /> "),
            None => {}
        }
        if list.spread {
            out.push('\n');
        }
        write_blocks(out, &item.blocks, !list.spread);
        if out.ends_with('\n') && !list.spread {
            out.pop();
        }
        out.push_str("</li>\n");
    }

    out.push_str(&format!("</{tag}>\n"));
}

fn write_table(out: &mut String, table: &Table) {
    let mut rows = table.rows.iter();
    out.push_str("<table>\n");
    if let Some(header) = rows.next() {
        out.push_str("<thead>\n<tr>\n");
        for cell in header {
            out.push_str("<th>");
            write_inlines(out, cell);
            out.push_str("</th>\n");
        }
        out.push_str("</tr>\n</thead>\n");
    }

    let body: Vec<_> = rows.collect();
    if !body.is_empty() {
        out.push_str("<tbody>\n");
        for row in body {
            out.push_str("<tr>\n");
            for cell in row {
                out.push_str("<td>");
                write_inlines(out, cell);
                out.push_str("</td>\n");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

fn write_inlines(out: &mut String, nodes: &[Inline]) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Emphasis(children) => wrap(out, "em", children),
            Inline::Strong(children) => wrap(out, "strong", children),
            Inline::Delete(children) => wrap(out, "del", children),
            Inline::Code(code) => {
                out.push_str("<code>");
                out.push_str(&escape_html(code));
                out.push_str("</code>");
            }
            Inline::Link {
                href: Some(href),
                title,
                children,
            } => {
                out.push_str(&format!("<a href=\"{}\"", escape_html(href)));
                if let Some(title) = title {
                    out.push_str(&format!(" title=\"{}\"", escape_html(title)));
                }
                out.push_str(" rel=\"nofollow noopener noreferrer\">");
                write_inlines(out, children);
                out.push_str("</a>");
            }
            Inline::Link {
                href: None,
                children,
                ..
            } => write_inlines(out, children),
            Inline::Break => out.push_str("<br />\n"),
        }
    }
}

fn wrap(out: &mut String, tag: &str, children: &[Inline]) {
    out.push_str(&format!("<{tag}>"));
    write_inlines(out, children);
    out.push_str(&format!("</{tag}>"));
}
