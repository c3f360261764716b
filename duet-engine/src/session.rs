//! The mode-toggle controller.
//!
//! Owns which representation (tree or text) is authoritative at any
//! moment, and runs each conversion exactly once per transition. The
//! payload is a private two-variant enum rather than a pair of flags, so
//! an invalid "both editable" state cannot be constructed.

use crate::doc::Document;
use crate::markdown::{parse_with_rules, serialize_with_rules, MarkdownRules};
use crate::template;
use log::debug;

/// Which representation is currently authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// The tree is live; the visual surface may mutate it.
    Visual,
    /// The text buffer is live; it may be edited as plain text.
    Source,
}

enum Payload {
    Tree(Document),
    Text(String),
}

/// An editing session: the document in exactly one of its two forms.
pub struct EditorSession {
    payload: Payload,
    rules: MarkdownRules,
}

impl EditorSession {
    /// Start a session from a Markdown string. Parses once and enters
    /// Visual mode.
    pub fn open(markdown: &str) -> Self {
        Self::open_with_rules(markdown, MarkdownRules::default())
    }

    pub fn open_with_rules(markdown: &str, rules: MarkdownRules) -> Self {
        let tree = parse_with_rules(markdown, &rules);
        EditorSession {
            payload: Payload::Tree(tree),
            rules,
        }
    }

    pub fn mode(&self) -> EditorMode {
        match self.payload {
            Payload::Tree(_) => EditorMode::Visual,
            Payload::Text(_) => EditorMode::Source,
        }
    }

    /// The tree, when Visual. `None` in Source mode: the tree does not
    /// exist then, so stale edits to it are impossible.
    pub fn document(&self) -> Option<&Document> {
        match &self.payload {
            Payload::Tree(tree) => Some(tree),
            Payload::Text(_) => None,
        }
    }

    /// Mutable access for the visual editing surface. The controller does
    /// not see or validate intermediate states; only the tree at the
    /// moment of the next transition matters.
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.payload {
            Payload::Tree(tree) => Some(tree),
            Payload::Text(_) => None,
        }
    }

    /// The text buffer, when Source.
    pub fn source(&self) -> Option<&str> {
        match &self.payload {
            Payload::Tree(_) => None,
            Payload::Text(text) => Some(text),
        }
    }

    /// Mutable text buffer for plain-text editing, when Source.
    pub fn source_mut(&mut self) -> Option<&mut String> {
        match &mut self.payload {
            Payload::Tree(_) => None,
            Payload::Text(text) => Some(text),
        }
    }

    /// Flip the authoritative representation, converting once. Returns the
    /// mode entered.
    pub fn toggle(&mut self) -> EditorMode {
        self.payload = match std::mem::replace(&mut self.payload, Payload::Text(String::new())) {
            Payload::Tree(tree) => {
                let text = serialize_with_rules(&tree, &self.rules);
                debug!("toggle visual -> source ({} bytes)", text.len());
                Payload::Text(text)
            }
            Payload::Text(text) => {
                let tree = parse_with_rules(&text, &self.rules);
                debug!("toggle source -> visual ({} blocks)", tree.blocks.len());
                Payload::Tree(tree)
            }
        };
        self.mode()
    }

    /// Serialize the current content for an external sink (file, clipboard).
    /// Not a transition: the authoritative state is unchanged.
    pub fn export(&self) -> String {
        match &self.payload {
            Payload::Tree(tree) => serialize_with_rules(tree, &self.rules),
            Payload::Text(text) => text.clone(),
        }
    }

    /// Replace the content with external Markdown and force Visual mode,
    /// whatever the current state.
    pub fn import(&mut self, markdown: &str) {
        let tree = parse_with_rules(markdown, &self.rules);
        debug!("import ({} bytes -> {} blocks)", markdown.len(), tree.blocks.len());
        self.payload = Payload::Tree(tree);
    }
}

impl Default for EditorSession {
    /// A session seeded with the welcome template.
    fn default() -> Self {
        Self::open(template::WELCOME)
    }
}
