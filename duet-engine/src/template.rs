//! The default starter document, used when a session begins without an
//! imported file. Kept in canonical form so that opening it and toggling
//! to source view shows exactly this text.

pub const WELCOME: &str = "# Welcome

This is a **visual Markdown editor**. The document you are reading lives as a tree while you edit, and as plain Markdown when you switch to source view.

## Features

- **Rich text editing** with the usual inline styles
- **Markdown export** for saving `.md` files
- **Source view** to see and edit the raw Markdown
- Tables, code blocks and task lists

## Getting started

You can:

1. Make text **bold**, *italic*, ~~struck through~~ or __underlined__
2. Create headings, links and images
3. Insert code blocks with a language tag

### A code example

```rust
fn main() {
    println!(\"hello\");
}
```

### A task list

- [x] Seed the editor with this document
- [ ] Replace it with your own words

| Shortcut | Action |
| --- | --- |
| Ctrl+Shift+M | Toggle source view |
| Ctrl+S | Export |

> **Tip:** toggling to source view captures the tree exactly once.

---

*Write something.*
";
