//! Integration tests for the parsing module.
//!
//! Every parse also runs the invariant checker; `Snap::summary` gives a
//! one-line-per-block view for inline snapshots.

#[path = "invariants.rs"]
mod invariants_tests;
#[path = "normalize.rs"]
mod normalize_tests;

use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::parsing::{
    ParseError, ParseOptions, ParsedDoc, QuoteContinuation,
    blocks::{BlockData, BlockKind},
    normalize_line_endings, parse_bytes, parse_document_with,
    snapshot::{invariants, normalize},
};

fn parse(md: &str) -> ParsedDoc {
    parse_with(md, &ParseOptions::default())
}

fn parse_with(md: &str, options: &ParseOptions) -> ParsedDoc {
    let rope = Rope::from(md);
    let doc = parse_document_with(&rope, options);
    invariants(&rope, &doc.blocks);
    doc
}

fn summary(md: &str) -> Vec<String> {
    normalize(&parse(md).blocks).summary()
}

/// Rebuilds text from raw block text plus the blank lines that followed.
fn reconstruct(doc: &ParsedDoc) -> String {
    let mut out = String::new();
    for b in &doc.blocks {
        out.push_str(&b.raw_text);
        out.push('\n');
        for _ in 0..b.trailing_blank_lines {
            out.push('\n');
        }
    }
    out
}

#[test]
fn heading_and_paragraphs() {
    let doc = parse("# Title\n\npara one\n\npara two");
    let data: Vec<&BlockData> = doc.blocks.iter().map(|b| &b.data).collect();
    assert_eq!(
        data,
        vec![
            &BlockData::Heading {
                level: 1,
                text: "Title".to_string()
            },
            &BlockData::Paragraph {
                text: "para one".to_string()
            },
            &BlockData::Paragraph {
                text: "para two".to_string()
            },
        ]
    );
}

#[test]
fn heading_and_paragraphs_summary() {
    insta::assert_compact_debug_snapshot!(
        summary("# Title\n\npara one\n\npara two"),
        @r#"["Heading(1) 0..1 Title", "Paragraph 2..3 para one", "Paragraph 4..5 para two"]"#
    );
}

#[test]
fn two_column_table() {
    let doc = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert_eq!(doc.blocks.len(), 1);
    let block = &doc.blocks[0];
    assert!(!block.malformed);
    let BlockData::Table(table) = &block.data else {
        panic!("expected table, got {:?}", block.data);
    };
    assert_eq!(table.rows.len(), 2);
    assert!(table.rows.iter().all(|r| r.column_count == 2 && !r.malformed));
    assert_eq!(table.rows[1].cells, vec!["1", "2"]);
}

#[test]
fn ragged_table_keeps_every_cell() {
    let doc = parse("| a | b |\n|---|---|\n| 1 | 2 | 3 |\n| 4 |\n");
    let block = &doc.blocks[0];
    assert!(block.malformed);
    let BlockData::Table(table) = &block.data else {
        panic!("expected table");
    };
    assert_eq!(table.rows[1].cells, vec!["1", "2", "3"]);
    assert!(table.rows[1].malformed);
    assert_eq!(table.rows[2].cells, vec!["4"]);
    assert!(table.rows[2].malformed);
}

#[test]
fn unterminated_fence_runs_to_end() {
    let doc = parse("intro\n\n```rust\nfn main() {}\n\n# not a heading\n");
    assert_eq!(doc.blocks.len(), 2);
    let code = &doc.blocks[1];
    assert_eq!(code.kind(), BlockKind::Code);
    assert!(code.malformed);
    assert_eq!(code.source_range.start, 2);
    assert_eq!(code.source_range.end, 6);
    let BlockData::Code(body) = &code.data else {
        panic!("expected code");
    };
    assert_eq!(body.language, "rust");
    assert!(!body.closed);
    assert_eq!(body.body, "fn main() {}\n\n# not a heading");
}

#[test]
fn mixed_document_summary() {
    let md = "\
# Notes

> quoted
> more

- one
  - two

---
<Chart kind=\"bar\" />
~~~
code
~~~
";
    insta::assert_compact_debug_snapshot!(
        summary(md),
        @r#"["Heading(1) 0..1 Notes", "Quote(1) 2..4 quoted⏎more", "List(2) 5..7 one⏎two", "Rule 8..9 ---", "Embed(Chart) 9..10 <Chart kind=\"bar\" />", "Code 10..13 code"]"#
    );
}

#[test]
fn quote_bridges_blank_by_default() {
    let doc = parse("> a\n\n> b\n");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].kind(), BlockKind::Blockquote);
}

#[test]
fn quote_stops_at_blank_when_configured() {
    let options = ParseOptions {
        quote_continuation: QuoteContinuation::StopAtBlank,
        ..ParseOptions::default()
    };
    let doc = parse_with("> a\n\n> b\n", &options);
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[0].trailing_blank_lines, 1);
}

#[test]
fn list_indent_override() {
    let options = ParseOptions {
        list_indent: Some(4),
        ..ParseOptions::default()
    };
    let doc = parse_with("- a\n    - b\n", &options);
    let BlockData::List(list) = &doc.blocks[0].data else {
        panic!("expected list");
    };
    assert_eq!(list.items[1].depth, 1);
}

#[test]
fn round_trip_reconstructs_input() {
    let inputs = [
        "# Title\n\npara one\n\npara two",
        "\n\n## Lead blanks\r\nline\r\n\r\n\r\n- a\r\n- b\r\n",
        "| a | b |\n|---|---|\n| 1 | 2 |\n\n> q\n\n> r\n   \n***\n",
        "```\nunclosed\n\n",
    ];
    for md in inputs {
        let doc = parse(md);
        assert_eq!(
            normalize_line_endings(&reconstruct(&doc)),
            normalize_line_endings(md),
            "round trip of {md:?}"
        );
    }
}

#[test]
fn reparsing_merged_paragraphs_is_stable() {
    let doc = parse("first part\n\nsecond part\n");
    let merged = doc
        .blocks
        .iter()
        .map(|b| b.raw_text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let reparsed = parse(&merged);
    assert_eq!(reparsed.blocks.len(), 1);
    assert_eq!(
        reparsed.blocks[0].data,
        BlockData::Paragraph {
            text: "first part\nsecond part".to_string()
        }
    );
    assert_eq!(reparsed.blocks[0].raw_text, merged);
}

#[test]
fn rejects_binary_input() {
    let err = parse_bytes(b"abc\0def", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::BinaryContent { offset: 3 }));

    let err = parse_bytes(&[0x66, 0xff, 0x66], &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidUtf8(_)));
}

#[test]
fn empty_input_has_no_blocks() {
    assert!(parse("").blocks.is_empty());
    assert!(parse("\n\n  \n").blocks.is_empty());
}
