//! Core data structures for the document tree.

use serde::{Deserialize, Serialize};

/// The root of a document. Children are always block-level nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    BulletList(List),
    OrderedList(List),
    TaskList(List),
    Blockquote(Blockquote),
    CodeBlock(CodeBlock),
    HorizontalRule,
    Table(Table),
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

/// A heading with a level clamped to 1..=6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub inlines: Vec<Inline>,
}

/// An ordered, bullet or task list. The variant of the enclosing [`Block`]
/// decides how items are rendered; the items themselves are shared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

/// One list item. `checked` is `Some` exactly when the item belongs to a
/// task list. Nested lists appear as trailing entries in `blocks`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub blocks: Vec<Block>,
}

/// A block quote wrapping further block content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blockquote {
    pub blocks: Vec<Block>,
}

/// A fenced (or imported indented) code block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub literal: String,
}

/// A table. The first row is the header row; every row holds the same
/// number of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub header: bool,
    pub inlines: Vec<Inline>,
}

/// An inline node. Text nodes never have children; styling is carried by
/// the marks on the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Text(Text),
    Image(Image),
    HardBreak,
}

/// A run of text with zero or more stacked marks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    pub literal: String,
    pub marks: Vec<Mark>,
}

/// An inline image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A non-exclusive inline style. Marks stack freely on a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Highlight,
    Code,
    Link { href: String },
}

impl Mark {
    /// Canonical nesting position, outermost first. Serialization wraps
    /// delimiters in this order and normalization sorts by it, so a run's
    /// mark order is stable across round trips regardless of how the marks
    /// were inserted.
    pub fn rank(&self) -> u8 {
        match self {
            Mark::Link { .. } => 0,
            Mark::Highlight => 1,
            Mark::Underline => 2,
            Mark::Strikethrough => 3,
            Mark::Bold => 4,
            Mark::Italic => 5,
            Mark::Code => 6,
        }
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }
}

impl Heading {
    pub fn new(level: u8, inlines: Vec<Inline>) -> Self {
        Heading {
            level: level.clamp(1, 6),
            inlines,
        }
    }
}

impl Paragraph {
    /// A paragraph holding a single unmarked text run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Paragraph {
            inlines: vec![Inline::text(text)],
        }
    }
}

impl ListItem {
    /// A plain (bullet/ordered) item holding one paragraph.
    pub fn from_text(text: impl Into<String>) -> Self {
        ListItem {
            checked: None,
            blocks: vec![Block::Paragraph(Paragraph::from_text(text))],
        }
    }

    /// A task item holding one paragraph.
    pub fn task(checked: bool, text: impl Into<String>) -> Self {
        ListItem {
            checked: Some(checked),
            blocks: vec![Block::Paragraph(Paragraph::from_text(text))],
        }
    }
}

impl Inline {
    /// An unmarked text run.
    pub fn text(literal: impl Into<String>) -> Self {
        Inline::Text(Text {
            literal: literal.into(),
            marks: Vec::new(),
        })
    }

    /// A text run with the given marks.
    pub fn marked(literal: impl Into<String>, marks: Vec<Mark>) -> Self {
        Inline::Text(Text {
            literal: literal.into(),
            marks,
        })
    }
}

/// Sorts marks into canonical order and drops duplicates.
pub fn normalize_marks(marks: &mut Vec<Mark>) {
    marks.sort_by_key(Mark::rank);
    marks.dedup();
}

/// Merges adjacent text runs that carry identical mark sets. Both
/// conversion directions rely on this so that a tree reaches a fixed point
/// under serialize/parse: `**a**` directly followed by `**b**` is the same
/// run as `**ab**`.
pub fn coalesce_inlines(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        match inline {
            Inline::Text(text) if text.literal.is_empty() => {}
            Inline::Text(text) => match out.last_mut() {
                Some(Inline::Text(prev)) if prev.marks == text.marks => {
                    prev.literal.push_str(&text.literal);
                }
                _ => out.push(Inline::Text(text)),
            },
            other => out.push(other),
        }
    }
    out
}
