use serde::{Deserialize, Serialize};

/// Knobs for the Markdown conversion pair.
///
/// The defaults are the canonical form: what [`serialize`] emits for a
/// given tree, and the fixed point the round-trip property is verified
/// against.
///
/// [`serialize`]: crate::markdown::serialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownRules {
    /// One unit of nested-list indentation. Four spaces: two would de-nest
    /// a child list under an ordered parent on re-parse, because `1. `
    /// starts item content at column three.
    pub indent_string: String,

    /// The character used for bullet and task list markers.
    pub bullet_marker: char,

    /// Whether soft line breaks inside a paragraph parse as hard breaks.
    /// Off by default: a lone newline stays a word separator.
    pub hard_line_breaks: bool,

    /// Whether `:name:` emoji shorthand is rewritten to the emoji
    /// character on parse.
    pub emoji_shortcodes: bool,
}

impl Default for MarkdownRules {
    fn default() -> Self {
        Self {
            indent_string: "    ".to_string(),
            bullet_marker: '-',
            hard_line_breaks: false,
            emoji_shortcodes: true,
        }
    }
}
