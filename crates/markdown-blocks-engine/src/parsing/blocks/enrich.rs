//! Phase 3: turn raw spans into typed blocks with structured data.

use xi_rope::Rope;

use crate::parsing::options::ParseOptions;
use crate::parsing::rope::slice::slice_block_text;

use super::content::{BlockContent, BlockData, CodeBlock, Quote};
use super::kinds::{BlockQuote, CodeFence, ComponentEmbed, FenceKind, Heading, List, Paragraph, Table};
use super::types::{BlockKind, RawSpan};

/// Enriches [`RawSpan`]s into [`BlockContent`].
///
/// Never fails: structural problems set `malformed` and the content is kept.
#[derive(Debug, Clone, Default)]
pub struct BlockClassifier {
    list_indent: Option<usize>,
}

impl BlockClassifier {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            list_indent: options.list_indent,
        }
    }

    pub fn classify(&self, rope: &Rope, raw: &RawSpan) -> BlockContent {
        let raw_text = slice_block_text(rope, raw.span);
        let lines: Vec<&str> = raw_text.split('\n').collect();
        let first = lines.first().copied().unwrap_or("");

        let (data, malformed) = match raw.kind {
            BlockKind::Heading => match Heading::parse(first) {
                Some((level, text)) => (
                    BlockData::Heading {
                        level,
                        text: text.to_string(),
                    },
                    false,
                ),
                None => (Self::paragraph(&lines), true),
            },
            BlockKind::Paragraph => (Self::paragraph(&lines), false),
            BlockKind::Code => {
                let code = Self::code(&lines, !raw.unterminated);
                let malformed = !code.closed;
                (BlockData::Code(code), malformed)
            }
            BlockKind::Blockquote => (BlockData::Blockquote(Self::quote(&lines)), false),
            BlockKind::List => (
                BlockData::List(List::from_lines(lines.iter().copied(), self.list_indent)),
                false,
            ),
            BlockKind::Table => {
                let table = Table::from_lines(lines.iter().copied());
                let malformed = table.is_malformed();
                (BlockData::Table(table), malformed)
            }
            BlockKind::ThematicBreak => (BlockData::ThematicBreak, false),
            BlockKind::ComponentEmbed => match ComponentEmbed::parse(first) {
                Some(embed) => (BlockData::ComponentEmbed(embed), false),
                None => (Self::paragraph(&lines), true),
            },
        };

        BlockContent {
            data,
            raw_text,
            source_range: raw.lines,
            trailing_blank_lines: raw.trailing_blank_lines,
            malformed,
        }
    }

    fn paragraph(lines: &[&str]) -> BlockData {
        BlockData::Paragraph {
            text: Paragraph::text(lines.iter().copied()),
        }
    }

    fn code(lines: &[&str], closed: bool) -> CodeBlock {
        let opener = lines.first().and_then(|l| CodeFence::sig(l));
        let body_end = if closed {
            lines.len().saturating_sub(1)
        } else {
            lines.len()
        };
        let body = lines.get(1..body_end.max(1)).unwrap_or_default().join("\n");

        CodeBlock {
            language: opener
                .as_ref()
                .map(|s| CodeFence::language(&s.info).to_string())
                .unwrap_or_default(),
            fence: opener.map_or(FenceKind::Backticks, |s| s.kind),
            body,
            closed,
        }
    }

    fn quote(lines: &[&str]) -> Quote {
        let mut depth = 0;
        let lines = lines
            .iter()
            .map(|line| {
                let (d, offset) = BlockQuote::strip_prefixes(line);
                depth = depth.max(d);
                line[offset..].to_string()
            })
            .collect();
        Quote { depth, lines }
    }
}
