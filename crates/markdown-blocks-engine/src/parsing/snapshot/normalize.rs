use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    blocks::{BlockContent, BlockData},
    rope::{Span, preview},
};

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub lines: (usize, usize),
    pub malformed: bool,
    pub text: String,
}

impl Snap {
    /// One line per block: `Kind start..end text`, with `!` after the kind
    /// when the block is malformed and newlines shown as `⏎`.
    pub fn summary(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|b| {
                let flag = if b.malformed { "!" } else { "" };
                format!(
                    "{}{flag} {}..{} {}",
                    b.kind,
                    b.lines.0,
                    b.lines.1,
                    b.text.replace('\n', "⏎")
                )
            })
            .collect()
    }
}

pub fn normalize(blocks: &[BlockContent]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| {
            let kind = match &b.data {
                BlockData::Heading { level, .. } => format!("Heading({level})"),
                BlockData::Paragraph { .. } => "Paragraph".to_string(),
                BlockData::Code(code) if code.language.is_empty() => "Code".to_string(),
                BlockData::Code(code) => format!("Code({})", code.language),
                BlockData::Blockquote(q) => format!("Quote({})", q.depth),
                BlockData::List(l) if l.ordered => format!("OrderedList({})", l.items.len()),
                BlockData::List(l) => format!("List({})", l.items.len()),
                BlockData::Table(t) => format!("Table({})", t.rows.len()),
                BlockData::ThematicBreak => "Rule".to_string(),
                BlockData::ComponentEmbed(e) => format!("Embed({})", e.name),
            };

            BlockSnap {
                kind,
                lines: (b.source_range.start, b.source_range.end),
                malformed: b.malformed,
                text: preview_text(&b.display_text()),
            }
        })
        .collect();

    Snap { blocks }
}

/// Display text capped at 60 bytes.
fn preview_text(text: &str) -> String {
    let rope = Rope::from(text);
    preview(&rope, Span { start: 0, end: rope.len() }, 60)
}
