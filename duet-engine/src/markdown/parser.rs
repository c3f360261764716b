//! Markdown parsing (Markdown → tree import)
//!
//! Pipeline: Markdown string → Comrak AST → document tree. The walk is
//! total: anything outside the recognized construct set degrades to literal
//! text, so `parse` never fails on any input.

use super::rules::MarkdownRules;
use crate::doc::{
    coalesce_inlines, normalize_marks, Block, Blockquote, CodeBlock, Document, Heading, Image,
    Inline, List, ListItem, Mark, Paragraph, Table, TableCell, TableRow, Text,
};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use log::debug;

/// Parse Markdown with the canonical default rules.
pub fn parse(source: &str) -> Document {
    parse_with_rules(source, &MarkdownRules::default())
}

/// Parse Markdown with custom rules. Always produces a document; empty
/// input yields a single empty paragraph.
pub fn parse_with_rules(source: &str, rules: &MarkdownRules) -> Document {
    let arena = Arena::new();
    let options = comrak_options(rules);
    let root = parse_document(&arena, source, &options);

    let mut blocks = collect_blocks(root.children(), rules);
    if blocks.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::default()));
    }
    debug!(
        "parsed {} bytes of markdown into {} top-level blocks",
        source.len(),
        blocks.len()
    );
    Document { blocks }
}

fn comrak_options(rules: &MarkdownRules) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.underline = true;
    options.extension.shortcodes = rules.emoji_shortcodes;
    options
}

fn collect_blocks<'a, I>(children: I, rules: &MarkdownRules) -> Vec<Block>
where
    I: Iterator<Item = &'a AstNode<'a>>,
{
    let mut blocks = Vec::new();
    for node in children {
        collect_block(node, rules, &mut blocks);
    }
    blocks
}

fn collect_block<'a>(node: &'a AstNode<'a>, rules: &MarkdownRules, blocks: &mut Vec<Block>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Document => {
            blocks.extend(collect_blocks(node.children(), rules));
        }

        NodeValue::Paragraph => {
            blocks.push(Block::Paragraph(Paragraph {
                inlines: collect_inlines(node, rules),
            }));
        }

        NodeValue::Heading(heading) => {
            blocks.push(Block::Heading(Heading::new(
                heading.level,
                collect_inlines(node, rules),
            )));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            convert_list(node, ordered, rules, blocks);
        }

        NodeValue::BlockQuote => {
            blocks.push(Block::Blockquote(Blockquote {
                blocks: collect_blocks(node.children(), rules),
            }));
        }

        NodeValue::CodeBlock(code_block) => {
            // Fenced and indented code both land here; an unterminated
            // fence arrives with the rest of the input as its literal.
            let language = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            blocks.push(Block::CodeBlock(CodeBlock {
                language,
                literal: code_block.literal.clone(),
            }));
        }

        NodeValue::ThematicBreak => {
            blocks.push(Block::HorizontalRule);
        }

        NodeValue::Table(_) => {
            blocks.push(convert_table(node, rules));
        }

        NodeValue::HtmlBlock(html) => {
            // Raw HTML is not part of the construct set; keep it as
            // literal text so nothing is silently lost.
            let literal = html.literal.trim_end().to_string();
            if !literal.is_empty() {
                blocks.push(Block::Paragraph(Paragraph::from_text(literal)));
            }
        }

        _ => {
            // Unknown block kind: degrade to its plain text content.
            let text = text_of(node);
            if !text.trim().is_empty() {
                blocks.push(Block::Paragraph(Paragraph::from_text(text)));
            }
        }
    }
}

/// Convert a Comrak list node. Items are grouped by task-ness: a source
/// list mixing `- [x]` and plain markers becomes consecutive task/plain
/// lists, which keeps `checked` present exactly on task items and makes
/// the split a fixed point under re-serialization.
fn convert_list<'a>(
    node: &'a AstNode<'a>,
    ordered: bool,
    rules: &MarkdownRules,
    blocks: &mut Vec<Block>,
) {
    for child in node.children() {
        let child_data = child.data.borrow();
        let checked = match &child_data.value {
            NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
            _ => None,
        };

        let item = ListItem {
            checked,
            blocks: collect_blocks(child.children(), rules),
        };

        match (checked, blocks.last_mut()) {
            (Some(_), Some(Block::TaskList(list))) => list.items.push(item),
            (Some(_), _) => blocks.push(Block::TaskList(List { items: vec![item] })),
            (None, Some(Block::OrderedList(list))) if ordered => list.items.push(item),
            (None, Some(Block::BulletList(list))) if !ordered => list.items.push(item),
            (None, _) => {
                let list = List { items: vec![item] };
                blocks.push(if ordered {
                    Block::OrderedList(list)
                } else {
                    Block::BulletList(list)
                });
            }
        }
    }
}

/// Convert a Comrak table node. Body rows are padded with empty cells or
/// truncated to the header row's column count, so the resulting table has
/// one consistent width whatever the source looked like.
fn convert_table<'a>(node: &'a AstNode<'a>, rules: &MarkdownRules) -> Block {
    let mut rows: Vec<TableRow> = Vec::new();

    for row_node in node.children() {
        let row_data = row_node.data.borrow();
        if let NodeValue::TableRow(header) = &row_data.value {
            let mut cells = Vec::new();
            for cell_node in row_node.children() {
                cells.push(TableCell {
                    header: *header,
                    inlines: collect_inlines(cell_node, rules),
                });
            }
            rows.push(TableRow { cells });
        }
    }

    let columns = rows.first().map(|row| row.cells.len()).unwrap_or(0);
    for (index, row) in rows.iter_mut().enumerate() {
        row.cells.truncate(columns);
        while row.cells.len() < columns {
            row.cells.push(TableCell {
                header: index == 0,
                inlines: Vec::new(),
            });
        }
    }

    Block::Table(Table { rows })
}

/// Collect the inline children of a node, flattening Comrak's nested
/// emphasis tree into marked text runs in canonical order.
fn collect_inlines<'a>(node: &'a AstNode<'a>, rules: &MarkdownRules) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut marks = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut marks, &mut out, rules);
    }
    coalesce_inlines(out)
}

fn collect_inline<'a>(
    node: &'a AstNode<'a>,
    marks: &mut Vec<Mark>,
    out: &mut Vec<Inline>,
    rules: &MarkdownRules,
) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => push_run(out, text.clone(), marks),

        NodeValue::SoftBreak => {
            if rules.hard_line_breaks {
                out.push(Inline::HardBreak);
            } else {
                push_run(out, " ".to_string(), marks);
            }
        }

        NodeValue::LineBreak => out.push(Inline::HardBreak),

        NodeValue::Code(code) => {
            marks.push(Mark::Code);
            push_run(out, code.literal.clone(), marks);
            marks.pop();
        }

        NodeValue::Strong => descend(node, Mark::Bold, marks, out, rules),
        NodeValue::Emph => descend(node, Mark::Italic, marks, out, rules),
        NodeValue::Underline => descend(node, Mark::Underline, marks, out, rules),
        NodeValue::Strikethrough => descend(node, Mark::Strikethrough, marks, out, rules),

        NodeValue::Link(link) => {
            descend(
                node,
                Mark::Link {
                    href: link.url.clone(),
                },
                marks,
                out,
                rules,
            );
        }

        NodeValue::Image(link) => {
            out.push(Inline::Image(Image {
                src: link.url.clone(),
                alt: text_of(node),
            }));
        }

        NodeValue::HtmlInline(html) => push_run(out, html.clone(), marks),

        NodeValue::ShortCode(shortcode) => push_run(out, shortcode.emoji.clone(), marks),

        _ => {
            // Unknown inline kind: keep its plain text.
            let text = text_of(node);
            if !text.is_empty() {
                push_run(out, text, marks);
            }
        }
    }
}

fn descend<'a>(
    node: &'a AstNode<'a>,
    mark: Mark,
    marks: &mut Vec<Mark>,
    out: &mut Vec<Inline>,
    rules: &MarkdownRules,
) {
    marks.push(mark);
    for child in node.children() {
        collect_inline(child, marks, out, rules);
    }
    marks.pop();
}

fn push_run(out: &mut Vec<Inline>, literal: String, marks: &[Mark]) {
    let mut marks = marks.to_vec();
    normalize_marks(&mut marks);
    out.push(Inline::Text(Text { literal, marks }));
}

/// Plain text content of a subtree (used for image alt text and unknown
/// node degradation).
fn text_of<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::ShortCode(shortcode) => out.push_str(&shortcode.emoji),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}
