use serde::Serialize;

use crate::parsing::rope::span::{LineRange, Span};

/// The type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Code,
    Blockquote,
    List,
    Table,
    ThematicBreak,
    ComponentEmbed,
}

/// A raw block span produced by the segmenter: line boundaries plus the
/// kind decided by the line-priority rules. No structured data yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    pub kind: BlockKind,
    /// Lines covered by the block itself.
    pub lines: LineRange,
    /// Byte span of those lines in the rope, terminators included.
    pub span: Span,
    /// Blank lines that followed the block in the source.
    pub trailing_blank_lines: usize,
    /// Set on a code block whose fence never closed.
    pub unterminated: bool,
}
