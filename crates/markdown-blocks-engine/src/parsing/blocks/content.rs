//! Structured block content produced by the classifier.
//!
//! A [`BlockContent`] is everything a block is except its identity; the block
//! model assigns ids when content enters a document.

use serde::Serialize;

use crate::parsing::rope::span::LineRange;

use super::kinds::{ComponentEmbed, FenceKind, List, Table};
use super::types::BlockKind;

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// First word of the opening fence's info string, empty if absent.
    pub language: String,
    pub fence: FenceKind,
    /// Lines between the fences, verbatim.
    pub body: String,
    /// False when the fence ran to end of document.
    pub closed: bool,
}

/// A blockquote with prefixes stripped per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Deepest `>` nesting seen on any line.
    pub depth: u8,
    pub lines: Vec<String>,
}

/// Per-type structured data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockData {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Code(CodeBlock),
    Blockquote(Quote),
    List(List),
    Table(Table),
    ThematicBreak,
    ComponentEmbed(ComponentEmbed),
}

/// A classified block without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockContent {
    pub data: BlockData,
    /// Verbatim source lines, `\n`-separated, without the final terminator.
    pub raw_text: String,
    pub source_range: LineRange,
    pub trailing_blank_lines: usize,
    /// Structural expectation violated (table columns, fence pairing).
    pub malformed: bool,
}

impl BlockContent {
    /// A paragraph built from free text, e.g. the result of a merge.
    pub fn paragraph(raw_text: String, source_range: LineRange) -> Self {
        let text = super::kinds::Paragraph::text(raw_text.lines());
        Self {
            data: BlockData::Paragraph { text },
            raw_text,
            source_range,
            trailing_blank_lines: 0,
            malformed: false,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self.data {
            BlockData::Heading { .. } => BlockKind::Heading,
            BlockData::Paragraph { .. } => BlockKind::Paragraph,
            BlockData::Code(_) => BlockKind::Code,
            BlockData::Blockquote(_) => BlockKind::Blockquote,
            BlockData::List(_) => BlockKind::List,
            BlockData::Table(_) => BlockKind::Table,
            BlockData::ThematicBreak => BlockKind::ThematicBreak,
            BlockData::ComponentEmbed(_) => BlockKind::ComponentEmbed,
        }
    }

    /// Heading level; `None` for every other kind.
    pub fn level(&self) -> Option<u8> {
        match self.data {
            BlockData::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Human-readable text for display: heading/paragraph text, code body,
    /// quote lines, list item texts; raw text otherwise.
    pub fn display_text(&self) -> String {
        match &self.data {
            BlockData::Heading { text, .. } | BlockData::Paragraph { text } => text.clone(),
            BlockData::Code(code) => code.body.clone(),
            BlockData::Blockquote(quote) => quote.lines.join("\n"),
            BlockData::List(list) => list
                .items
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            BlockData::Table(_) | BlockData::ThematicBreak | BlockData::ComponentEmbed(_) => {
                self.raw_text.clone()
            }
        }
    }
}
