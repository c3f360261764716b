//! Markdown serialization (tree → Markdown export)
//!
//! Hand-written, rule-driven emitter. Every node kind has one fixed
//! replacement rule, dispatched by an exhaustive match, so adding a kind is
//! a compile-time change. The output is the canonical form: parsing it and
//! serializing again reproduces the same text.

use super::rules::MarkdownRules;
use crate::doc::{
    coalesce_inlines, normalize_marks, Block, Blockquote, CodeBlock, Document, Inline, List,
    ListItem, Mark, Table, TableCell, Text,
};

enum ListKind {
    Bullet,
    Ordered,
    Task,
}

pub struct MarkdownSerializer {
    rules: MarkdownRules,
}

impl MarkdownSerializer {
    pub fn new(rules: MarkdownRules) -> Self {
        Self { rules }
    }

    /// Serialize a document to canonical Markdown. Total: every well-formed
    /// tree produces a string ending in exactly one newline. A document
    /// with no renderable content comes out as a single newline, the same
    /// text the empty input round-trips to.
    pub fn serialize(&self, doc: &Document) -> String {
        let mut out = self.block_seq(&doc.blocks);
        out.push('\n');
        out
    }

    /// Render a block sequence joined by blank lines. Adjacent lists of the
    /// same kind are merged first: Markdown has no way to separate them, so
    /// merging is what makes list structure a round-trip fixed point.
    fn block_seq(&self, blocks: &[Block]) -> String {
        coalesce_lists(blocks)
            .iter()
            .map(|b| self.block(b))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn block(&self, block: &Block) -> String {
        match block {
            Block::Paragraph(p) => self.inline_seq(&p.inlines),
            Block::Heading(h) => {
                let mut out = "#".repeat(usize::from(h.level.clamp(1, 6)));
                out.push(' ');
                out.push_str(&self.inline_seq(&h.inlines));
                out.trim_end().to_string()
            }
            Block::BulletList(list) => self.list(list, ListKind::Bullet),
            Block::OrderedList(list) => self.list(list, ListKind::Ordered),
            Block::TaskList(list) => self.list(list, ListKind::Task),
            Block::Blockquote(bq) => self.blockquote(bq),
            Block::CodeBlock(cb) => self.code_block(cb),
            Block::HorizontalRule => "---".to_string(),
            Block::Table(table) => self.table(table),
        }
    }

    fn list(&self, list: &List, kind: ListKind) -> String {
        let mut lines: Vec<String> = Vec::new();
        for (index, item) in list.items.iter().enumerate() {
            let marker = match kind {
                ListKind::Bullet => format!("{} ", self.rules.bullet_marker),
                ListKind::Ordered => format!("{}. ", index + 1),
                ListKind::Task => {
                    let tick = if item.checked.unwrap_or(false) { 'x' } else { ' ' };
                    format!("{} [{tick}] ", self.rules.bullet_marker)
                }
            };
            self.item_lines(item, &marker, &mut lines);
        }
        lines.join("\n")
    }

    fn item_lines(&self, item: &ListItem, marker: &str, lines: &mut Vec<String>) {
        let blocks = coalesce_lists(&item.blocks);
        let mut rest = &blocks[..];
        // The first paragraph rides on the marker line.
        let lead = match blocks.first() {
            Some(Block::Paragraph(p)) => {
                rest = &blocks[1..];
                self.inline_seq(&p.inlines)
            }
            _ => String::new(),
        };
        lines.push(format!("{marker}{lead}").trim_end().to_string());

        for block in rest {
            let nested_list = matches!(
                block,
                Block::BulletList(_) | Block::OrderedList(_) | Block::TaskList(_)
            );
            // Non-list continuation blocks need a blank line to re-parse as
            // their own block instead of lazily joining the lead paragraph.
            if !nested_list {
                lines.push(String::new());
            }
            for line in self.block(block).split('\n') {
                if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{}{}", self.rules.indent_string, line));
                }
            }
        }
    }

    fn blockquote(&self, bq: &Blockquote) -> String {
        if bq.blocks.is_empty() {
            return ">".to_string();
        }
        self.block_seq(&bq.blocks)
            .split('\n')
            .map(|line| format!("> {line}").trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn code_block(&self, cb: &CodeBlock) -> String {
        let mut out = String::from("```");
        if let Some(language) = &cb.language {
            out.push_str(language);
        }
        out.push('\n');
        out.push_str(&cb.literal);
        if !cb.literal.is_empty() && !cb.literal.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```");
        out
    }

    /// The table rule takes precedence over the generic cell/row handling:
    /// cells hold their trimmed plain text only, never block or mark
    /// output. One `---` separator cell per header column.
    fn table(&self, table: &Table) -> String {
        let columns = table.rows.first().map(|r| r.cells.len()).unwrap_or(0);
        if columns == 0 {
            return String::new();
        }
        let mut lines = Vec::with_capacity(table.rows.len() + 1);
        for (index, row) in table.rows.iter().enumerate() {
            let mut line = String::from("|");
            for cell in 0..columns {
                let text = row
                    .cells
                    .get(cell)
                    .map(|c| cell_text(c))
                    .unwrap_or_default();
                line.push(' ');
                line.push_str(&text);
                line.push_str(" |");
            }
            lines.push(line);
            if index == 0 {
                let mut separator = String::from("|");
                for _ in 0..columns {
                    separator.push_str(" --- |");
                }
                lines.push(separator);
            }
        }
        lines.join("\n")
    }

    fn inline_seq(&self, inlines: &[Inline]) -> String {
        let inlines = coalesce_inlines(inlines.to_vec());
        // A hard break at paragraph end has no Markdown spelling that
        // survives a re-parse, so trailing breaks are dropped.
        let mut end = inlines.len();
        while end > 0 && matches!(inlines[end - 1], Inline::HardBreak) {
            end -= 1;
        }
        let mut out = String::new();
        for inline in &inlines[..end] {
            match inline {
                Inline::Text(text) => out.push_str(&self.text_run(text)),
                Inline::Image(image) => {
                    out.push_str(&format!("![{}]({})", image.alt, image.src));
                }
                Inline::HardBreak => out.push_str("\\\n"),
            }
        }
        out
    }

    /// Wrap a text run in its mark delimiters, innermost to outermost along
    /// the canonical order. Inline-code content is emitted verbatim, never
    /// re-escaped.
    fn text_run(&self, text: &Text) -> String {
        if text.literal.is_empty() {
            return String::new();
        }
        let mut marks = text.marks.clone();
        normalize_marks(&mut marks);
        let mut out = text.literal.replace('\n', " ");
        for mark in marks.iter().rev() {
            out = match mark {
                Mark::Code => format!("`{out}`"),
                Mark::Italic => format!("*{out}*"),
                Mark::Bold => format!("**{out}**"),
                Mark::Strikethrough => format!("~~{out}~~"),
                Mark::Underline => format!("__{out}__"),
                Mark::Highlight => format!("=={out}=="),
                Mark::Link { href } => format!("[{out}]({href})"),
            };
        }
        out
    }
}

/// Serialize with the canonical default rules.
pub fn serialize(doc: &Document) -> String {
    MarkdownSerializer::new(MarkdownRules::default()).serialize(doc)
}

/// Serialize with custom rules.
pub fn serialize_with_rules(doc: &Document, rules: &MarkdownRules) -> String {
    MarkdownSerializer::new(rules.clone()).serialize(doc)
}

/// Plain text of a table cell, trimmed, with pipes escaped so the cell
/// boundary survives a re-parse.
fn cell_text(cell: &TableCell) -> String {
    let mut out = String::new();
    for inline in &cell.inlines {
        match inline {
            Inline::Text(text) => out.push_str(&text.literal),
            Inline::Image(image) => out.push_str(&image.alt),
            Inline::HardBreak => out.push(' '),
        }
    }
    out.replace('\n', " ").trim().replace('|', "\\|")
}

/// Merge adjacent sibling lists of the same kind.
fn coalesce_lists(blocks: &[Block]) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match (out.last_mut(), block) {
            (Some(Block::BulletList(prev)), Block::BulletList(next)) => {
                prev.items.extend(next.items.iter().cloned());
            }
            (Some(Block::OrderedList(prev)), Block::OrderedList(next)) => {
                prev.items.extend(next.items.iter().cloned());
            }
            (Some(Block::TaskList(prev)), Block::TaskList(next)) => {
                prev.items.extend(next.items.iter().cloned());
            }
            _ => out.push(block.clone()),
        }
    }
    out
}
