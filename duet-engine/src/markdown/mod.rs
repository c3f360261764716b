//! Bidirectional conversion between the document tree and Markdown text.
//!
//! # Library Choice
//!
//! Parsing uses the `comrak` crate: a single, well-maintained CommonMark
//! implementation whose extensions cover everything the import side needs
//! (tables, strikethrough, autolinks, task lists, underline, emoji
//! shortcodes). We never hand-roll the Markdown grammar; inbound support is
//! an adapter from comrak's AST to the tree.
//!
//! Serialization is hand-written: the canonical output is the contract
//! (delimiters, indent width, separator rows are all pinned by the
//! round-trip property), and some of it, like `==highlight==` and
//! `__underline__`, is outside what a generic CommonMark formatter will
//! emit.
//!
//! # Element Mapping Table
//!
//! | Tree node        | Markdown form           | Export notes                        | Import notes                         |
//! |------------------|-------------------------|-------------------------------------|--------------------------------------|
//! | Heading          | `#`×level + inline      | level clamped to 1..=6              | ATX and setext                       |
//! | Paragraph        | inline content          | blocks joined by one blank line     | direct                               |
//! | BulletList       | `- item`                | tight items                         | marker char normalized               |
//! | OrderedList      | `1. item`               | renumbered from sibling position    | source `start` normalized away       |
//! | TaskList         | `- [x] ` / `- [ ] `     | content trimmed of trailing space   | `[X]` counts as checked; mixed lists split |
//! | nested list      | 4-space indent per level| two spaces de-nests under `1. `     | common indentation conventions       |
//! | Blockquote       | `> ` per line           | recursive block content             | recursive                            |
//! | CodeBlock        | ``` fence + language    | literal never re-escaped            | fenced and indented; open fence kept |
//! | HorizontalRule   | `---`                   |                                     | any thematic break                   |
//! | Table            | pipe rows + `| --- |`   | cells are trimmed plain text only   | ragged rows padded/truncated         |
//! | Image            | `![alt](src)`           |                                     | alt from child text                  |
//! | HardBreak        | backslash-newline       | dropped at paragraph end            | backslash or double-space            |
//! | Bold             | `**…**`                 | canonical mark order: link,         | `**`                                 |
//! | Italic           | `*…*`                   | highlight, underline, strike,       | `*` / `_`                            |
//! | Underline        | `__…__`                 | bold, italic, code (out→in)         | `__` via the underline extension     |
//! | Strikethrough    | `~~…~~`                 |                                     | `~~`                                 |
//! | Highlight        | `==…==`                 | export only                         | stays literal text (stable)          |
//! | Code             | `` `…` ``               | innermost                           | backtick spans                       |
//! | Link             | `[text](href)`          | outermost                           | inline links and autolinks           |
//!
//! # Lossy conversions
//!
//! - Marks inside table cells are dropped on export (cells carry trimmed
//!   plain text, as the table rule takes precedence).
//! - `==highlight==` does not parse back into a mark; the delimiters stay
//!   literal, which is text-stable across further round trips.
//! - Raw HTML degrades to literal text.
//!
//! Both directions are total functions: `serialize` cannot fail on any
//! well-formed tree, `parse` cannot fail on any string.

pub mod parser;
pub mod rules;
pub mod serializer;

pub use parser::{parse, parse_with_rules};
pub use rules::MarkdownRules;
pub use serializer::{serialize, serialize_with_rules};
