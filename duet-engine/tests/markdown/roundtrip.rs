//! Round-trip properties
//!
//! The central contract: serializing a tree, parsing the text and
//! serializing again reproduces the first text byte for byte, even when
//! the intermediate tree is not node-for-node identical.

use duet_engine::doc::{
    Block, Blockquote, CodeBlock, Document, Heading, Inline, List, ListItem, Mark, Paragraph,
    Table, TableCell, TableRow,
};
use duet_engine::markdown::{parse, serialize};
use proptest::prelude::*;

fn assert_fixed_point(doc: &Document) {
    let first = serialize(doc);
    let reparsed = parse(&first);
    let second = serialize(&reparsed);
    assert_eq!(first, second, "serialize∘parse moved the canonical text");
}

fn cell(header: bool, text: &str) -> TableCell {
    TableCell {
        header,
        inlines: vec![Inline::text(text)],
    }
}

// ==== Construct catalog ====

#[test]
fn test_fixed_point_catalog() {
    let catalog: Vec<Document> = vec![
        Document::default(),
        Document::new(vec![Block::Paragraph(Paragraph::default())]),
        Document::new(vec![Block::Heading(Heading::new(
            4,
            vec![Inline::marked("deep", vec![Mark::Italic])],
        ))]),
        Document::new(vec![Block::Paragraph(Paragraph {
            inlines: vec![
                Inline::text("mix "),
                Inline::marked("of", vec![Mark::Bold]),
                Inline::text(" "),
                Inline::marked("runs", vec![Mark::Underline, Mark::Code]),
            ],
        })]),
        Document::new(vec![Block::Paragraph(Paragraph {
            inlines: vec![
                Inline::text("broken"),
                Inline::HardBreak,
                Inline::text("line"),
            ],
        })]),
        Document::new(vec![Block::BulletList(List {
            items: vec![
                ListItem::from_text("plain"),
                ListItem {
                    checked: None,
                    blocks: vec![
                        Block::Paragraph(Paragraph::from_text("nested below")),
                        Block::OrderedList(List {
                            items: vec![ListItem::from_text("child")],
                        }),
                    ],
                },
            ],
        })]),
        Document::new(vec![Block::TaskList(List {
            items: vec![
                ListItem::task(true, "yes"),
                ListItem::task(false, "no"),
                ListItem {
                    checked: Some(false),
                    blocks: vec![
                        Block::Paragraph(Paragraph::from_text("with sub")),
                        Block::TaskList(List {
                            items: vec![ListItem::task(true, "sub")],
                        }),
                    ],
                },
            ],
        })]),
        Document::new(vec![Block::Blockquote(Blockquote {
            blocks: vec![
                Block::Paragraph(Paragraph::from_text("quoted")),
                Block::CodeBlock(CodeBlock {
                    language: Some("txt".into()),
                    literal: "inside\n".into(),
                }),
            ],
        })]),
        Document::new(vec![
            Block::Paragraph(Paragraph::from_text("before")),
            Block::HorizontalRule,
            Block::Paragraph(Paragraph::from_text("after")),
        ]),
        Document::new(vec![Block::Table(Table {
            rows: vec![
                TableRow {
                    cells: vec![cell(true, "a"), cell(true, "b")],
                },
                TableRow {
                    cells: vec![cell(false, "1"), cell(false, "2")],
                },
            ],
        })]),
        // Adjacent lists of every kind pairing.
        Document::new(vec![
            Block::BulletList(List {
                items: vec![ListItem::from_text("b1")],
            }),
            Block::TaskList(List {
                items: vec![ListItem::task(false, "t1")],
            }),
            Block::OrderedList(List {
                items: vec![ListItem::from_text("o1")],
            }),
            Block::OrderedList(List {
                items: vec![ListItem::from_text("o2")],
            }),
        ]),
        // Highlight has no parse inverse; the text must still be stable.
        Document::new(vec![Block::Paragraph(Paragraph {
            inlines: vec![
                Inline::marked("lit", vec![Mark::Highlight]),
                Inline::text(" and "),
                Inline::marked("both", vec![Mark::Highlight, Mark::Bold]),
            ],
        })]),
    ];

    for doc in &catalog {
        assert_fixed_point(doc);
    }
}

#[test]
fn test_unterminated_fence_text_is_stable() {
    let first = serialize(&parse("```rust\nnever closed\n"));
    assert_eq!(first, "```rust\nnever closed\n```\n");
    assert_eq!(serialize(&parse(&first)), first);
}

#[test]
fn test_raw_html_text_is_stable() {
    let first = serialize(&parse("<aside>not markdown</aside>\n"));
    let second = serialize(&parse(&first));
    assert_eq!(first, second);
}

#[test]
fn test_end_to_end_scenario_is_byte_identical() {
    let input = "# Title\n\n- [x] done\n- [ ] todo\n";
    assert_eq!(serialize(&parse(input)), input);
}

#[test]
fn test_welcome_template_is_byte_identical() {
    let input = duet_engine::template::WELCOME;
    assert_eq!(serialize(&parse(input)), input);
}

// ==== Property tests ====

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z][a-zA-Z0-9]{0,7}").unwrap()
}

fn style_marks() -> impl Strategy<Value = Vec<Mark>> {
    proptest::collection::vec(
        prop_oneof![
            Just(Mark::Bold),
            Just(Mark::Italic),
            Just(Mark::Underline),
            Just(Mark::Strikethrough),
            Just(Mark::Highlight),
            Just(Mark::Code),
        ],
        0..3,
    )
}

/// Marked words separated by plain spaces, the shape the visual surface
/// produces for styled sentences.
fn styled_inlines() -> impl Strategy<Value = Vec<Inline>> {
    proptest::collection::vec((word(), style_marks()), 1..5).prop_map(|words| {
        let mut inlines = Vec::new();
        for (index, (text, marks)) in words.into_iter().enumerate() {
            if index > 0 {
                inlines.push(Inline::text(" "));
            }
            inlines.push(Inline::marked(text, marks));
        }
        inlines
    })
}

fn paragraph_block() -> impl Strategy<Value = Block> {
    styled_inlines().prop_map(|inlines| Block::Paragraph(Paragraph { inlines }))
}

fn list_block() -> impl Strategy<Value = Block> {
    (
        proptest::collection::vec(word(), 1..4),
        proptest::bool::ANY,
    )
        .prop_map(|(words, ordered)| {
            let items = words.into_iter().map(ListItem::from_text).collect();
            if ordered {
                Block::OrderedList(List { items })
            } else {
                Block::BulletList(List { items })
            }
        })
}

fn task_block() -> impl Strategy<Value = Block> {
    proptest::collection::vec((proptest::bool::ANY, word()), 1..4).prop_map(|items| {
        Block::TaskList(List {
            items: items
                .into_iter()
                .map(|(checked, text)| ListItem::task(checked, text))
                .collect(),
        })
    })
}

fn heading_block() -> impl Strategy<Value = Block> {
    (1u8..=6, word()).prop_map(|(level, text)| {
        Block::Heading(Heading::new(level, vec![Inline::text(text)]))
    })
}

proptest! {
    #[test]
    fn prop_serialize_parse_serialize_is_identity(
        blocks in proptest::collection::vec(
            prop_oneof![paragraph_block(), list_block(), task_block(), heading_block()],
            1..6,
        )
    ) {
        assert_fixed_point(&Document::new(blocks));
    }

    #[test]
    fn prop_task_checked_survives_round_trip(flags in proptest::collection::vec(proptest::bool::ANY, 1..6)) {
        let doc = Document::new(vec![Block::TaskList(List {
            items: flags.iter().map(|&checked| ListItem::task(checked, "item")).collect(),
        })]);
        let reparsed = parse(&serialize(&doc));
        let recovered: Vec<Option<bool>> = match &reparsed.blocks[..] {
            [Block::TaskList(list)] => list.items.iter().map(|i| i.checked).collect(),
            other => panic!("expected a single task list, got {other:?}"),
        };
        let expected: Vec<Option<bool>> = flags.iter().map(|&f| Some(f)).collect();
        prop_assert_eq!(recovered, expected);
    }

    #[test]
    // Any insertion order of the three marks must land on the same text.
    fn prop_bold_italic_strike_all_recovered(order in proptest::sample::select(vec![
        vec![Mark::Bold, Mark::Italic, Mark::Strikethrough],
        vec![Mark::Italic, Mark::Strikethrough, Mark::Bold],
        vec![Mark::Strikethrough, Mark::Bold, Mark::Italic],
        vec![Mark::Strikethrough, Mark::Italic, Mark::Bold],
        vec![Mark::Italic, Mark::Bold, Mark::Strikethrough],
        vec![Mark::Bold, Mark::Strikethrough, Mark::Italic],
    ])) {
        let doc = Document::new(vec![Block::Paragraph(Paragraph {
            inlines: vec![Inline::marked("styled", order)],
        })]);
        let text = serialize(&doc);
        prop_assert!(text.contains("**"));
        prop_assert!(text.contains('*'));
        prop_assert!(text.contains("~~"));

        let reparsed = parse(&text);
        match &reparsed.blocks[..] {
            [Block::Paragraph(p)] => match &p.inlines[..] {
                [Inline::Text(t)] => {
                    prop_assert_eq!(t.literal.as_str(), "styled");
                    prop_assert_eq!(
                        t.marks.clone(),
                        vec![Mark::Strikethrough, Mark::Bold, Mark::Italic]
                    );
                }
                other => panic!("expected one text run, got {other:?}"),
            },
            other => panic!("expected one paragraph, got {other:?}"),
        }
    }

    #[test]
    fn prop_table_of_words_round_trips(
        header in proptest::collection::vec(word(), 2..4),
        body in proptest::collection::vec(word(), 2..4),
    ) {
        let columns = header.len().min(body.len());
        let doc = Document::new(vec![Block::Table(Table {
            rows: vec![
                TableRow { cells: header[..columns].iter().map(|w| cell(true, w)).collect() },
                TableRow { cells: body[..columns].iter().map(|w| cell(false, w)).collect() },
            ],
        })]);
        assert_fixed_point(&doc);

        let reparsed = parse(&serialize(&doc));
        match &reparsed.blocks[..] {
            [Block::Table(table)] => {
                prop_assert_eq!(table.rows.len(), 2);
                prop_assert_eq!(table.rows[0].cells.len(), columns);
            }
            other => panic!("expected a table, got {other:?}"),
        }
    }
}
