//! Conversion engine for the duet editor
//!
//!     This crate is the core of a visual Markdown editor: the document
//!     tree model shared with the editing surface, the two conversions
//!     between that tree and plain Markdown text, and the controller that
//!     decides which of the two representations is authoritative.
//!
//!     TLDR:
//!         - The tree is a closed set of block/inline variants (doc.rs);
//!           dispatch everywhere is an exhaustive match, so a new node kind
//!           is a compile-time change, not a runtime registration.
//!         - serialize() and parse() are pure, total functions. They never
//!           call each other and share no mutable state. Malformed input is
//!           a degradation, never an error.
//!         - EditorSession holds EITHER the tree OR the text, so only one
//!           representation can be edited at a time, by construction.
//!
//! Architecture
//!
//!     The file structure:
//!     .
//!     ├── doc.rs                  # Document tree model + normalization
//!     ├── markdown
//!     │   ├── parser.rs           # Markdown → tree (comrak AST adapter)
//!     │   ├── serializer.rs       # tree → Markdown (canonical emitter)
//!     │   ├── rules.rs            # documented constants/knobs
//!     │   └── mod.rs              # mapping table + public conversion API
//!     ├── session.rs              # mode-toggle controller
//!     ├── template.rs             # welcome document
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     The hard part is making the pair of conversions a fixed point: for
//!     any tree, serialize -> parse -> serialize must reproduce the first
//!     text byte for byte, even though the intermediate tree need not be
//!     node-for-node identical. Everything that threatens that property is
//!     normalized on both sides: marks have one canonical nesting order,
//!     adjacent text runs with equal marks coalesce, adjacent lists of the
//!     same kind merge on export while mixed-marker lists split on import,
//!     and ragged tables are padded to the header width.
//!
//! Library Choices
//!
//!     This is a pure library: no printing, no env vars, no file I/O. The
//!     shell (duet-cli here, the visual app elsewhere) owns all of that and
//!     hands the engine complete strings. We do not write a Markdown
//!     grammar; inbound text goes through comrak and we adapt its AST.
//!     Outbound text is emitted by hand because the canonical form is the
//!     contract and parts of it (highlight, underline) are outside what a
//!     generic formatter produces.

pub mod doc;
pub mod markdown;
pub mod session;
pub mod template;

pub use doc::{Block, Document, Inline, Mark};
pub use markdown::{parse, serialize, MarkdownRules};
pub use session::{EditorMode, EditorSession};
