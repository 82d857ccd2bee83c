use std::collections::VecDeque;

use crate::parsing::options::QuoteContinuation;
use crate::parsing::rope::span::{LineRange, Span};

use super::{
    classify::{LineClass, LineKind},
    kinds::{CodeFence, FenceSig},
    types::{BlockKind, RawSpan},
};

/// Lines and bytes covered by an open block so far.
#[derive(Debug, Clone, Copy)]
struct Extent {
    first_line: usize,
    end_line: usize,
    start: usize,
    end: usize,
}

impl Extent {
    fn new(c: &LineClass) -> Self {
        Self {
            first_line: c.index,
            end_line: c.index + 1,
            start: c.line.start,
            end: c.line.end,
        }
    }

    fn extend(&mut self, c: &LineClass) {
        self.end_line = c.index + 1;
        self.end = c.line.end;
    }
}

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph(Extent),
    Fence { sig: FenceSig, extent: Extent },
    Quote(Extent),
    List(Extent),
    Table { extent: Extent, separator_seen: bool },
}

/// Line-at-a-time block segmentation state machine.
///
/// Each pushed line comes with one line of lookahead, which is all the
/// table-start and quote-continuation rules need. Closed blocks are held
/// back until the next block opens so that the blank lines following them
/// can be counted.
pub struct BlockBuilder {
    quote_continuation: QuoteContinuation,
    leaf: LeafState,
    pending: Option<RawSpan>,
    out: VecDeque<RawSpan>,
}

impl BlockBuilder {
    pub fn new(quote_continuation: QuoteContinuation) -> Self {
        Self {
            quote_continuation,
            leaf: LeafState::None,
            pending: None,
            out: VecDeque::new(),
        }
    }

    pub fn push(&mut self, c: &LineClass, next: Option<&LineClass>) {
        if matches!(self.leaf, LeafState::Fence { .. }) {
            self.consume_fence_line(c);
            return;
        }

        if c.is_blank() {
            self.push_blank(c, next);
            return;
        }

        if self.try_extend(c, next) {
            return;
        }

        self.close_leaf();
        self.open_leaf(c, next);
    }

    /// EOF flush. An open fence is closed as unterminated.
    pub fn finish(&mut self) {
        self.close_leaf();
        if let Some(p) = self.pending.take() {
            self.out.push_back(p);
        }
    }

    /// Next completed span, if any.
    pub fn pop(&mut self) -> Option<RawSpan> {
        self.out.pop_front()
    }

    fn starts_table(c: &LineClass, next: Option<&LineClass>) -> bool {
        c.table_row && !c.kind.outranks_table() && next.is_some_and(|n| n.table_separator)
    }

    fn try_extend(&mut self, c: &LineClass, next: Option<&LineClass>) -> bool {
        let starts_table = Self::starts_table(c, next);
        match &mut self.leaf {
            LeafState::Paragraph(extent) if c.kind == LineKind::Text && !starts_table => {
                extent.extend(c);
                true
            }
            LeafState::Quote(extent)
                if matches!(c.kind, LineKind::Quote { .. }) && !starts_table =>
            {
                extent.extend(c);
                true
            }
            LeafState::List(extent) if c.kind == LineKind::ListItem && !starts_table => {
                extent.extend(c);
                true
            }
            LeafState::Table {
                extent,
                separator_seen,
            } => {
                let accepts = if *separator_seen {
                    c.table_row && !c.kind.outranks_table()
                } else {
                    c.table_separator
                };
                if !accepts {
                    return false;
                }
                *separator_seen = true;
                extent.extend(c);
                true
            }
            _ => false,
        }
    }

    fn push_blank(&mut self, c: &LineClass, next: Option<&LineClass>) {
        if let LeafState::Quote(extent) = &mut self.leaf
            && self.quote_continuation == QuoteContinuation::BridgeBlank
            && next.is_some_and(|n| matches!(n.kind, LineKind::Quote { .. }))
        {
            extent.extend(c);
            return;
        }

        self.close_leaf();
        if let Some(p) = &mut self.pending {
            p.trailing_blank_lines += 1;
        }
    }

    fn open_leaf(&mut self, c: &LineClass, next: Option<&LineClass>) {
        let extent = Extent::new(c);
        let single_line = match c.kind {
            LineKind::Heading { .. } => Some(BlockKind::Heading),
            LineKind::ThematicBreak => Some(BlockKind::ThematicBreak),
            LineKind::ComponentEmbed => Some(BlockKind::ComponentEmbed),
            _ => None,
        };
        if let Some(kind) = single_line {
            self.emit(kind, extent, false);
            return;
        }

        self.leaf = match &c.kind {
            LineKind::Fence(sig) => LeafState::Fence {
                sig: sig.clone(),
                extent,
            },
            _ if Self::starts_table(c, next) => LeafState::Table {
                extent,
                separator_seen: false,
            },
            LineKind::Quote { .. } => LeafState::Quote(extent),
            LineKind::ListItem => LeafState::List(extent),
            _ => LeafState::Paragraph(extent),
        };
    }

    fn consume_fence_line(&mut self, c: &LineClass) {
        let LeafState::Fence { sig, extent } = &mut self.leaf else {
            return;
        };
        extent.extend(c);

        let line_sig = match &c.kind {
            LineKind::Fence(s) => Some(s),
            _ => None,
        };
        if CodeFence::closes(sig, line_sig) {
            let extent = *extent;
            self.leaf = LeafState::None;
            self.emit(BlockKind::Code, extent, false);
        }
    }

    fn close_leaf(&mut self) {
        let (kind, extent, unterminated) = match std::mem::replace(&mut self.leaf, LeafState::None)
        {
            LeafState::None => return,
            LeafState::Paragraph(e) => (BlockKind::Paragraph, e, false),
            LeafState::Quote(e) => (BlockKind::Blockquote, e, false),
            LeafState::List(e) => (BlockKind::List, e, false),
            LeafState::Table { extent, .. } => (BlockKind::Table, extent, false),
            // Only reached at EOF: a fence still open here never closed.
            LeafState::Fence { extent, .. } => (BlockKind::Code, extent, true),
        };
        self.emit(kind, extent, unterminated);
    }

    fn emit(&mut self, kind: BlockKind, extent: Extent, unterminated: bool) {
        let span = RawSpan {
            kind,
            lines: LineRange {
                start: extent.first_line,
                end: extent.end_line,
            },
            span: Span {
                start: extent.start,
                end: extent.end,
            },
            trailing_blank_lines: 0,
            unterminated,
        };
        log::trace!("segment {:?} lines {:?}", span.kind, span.lines);
        if let Some(p) = self.pending.replace(span) {
            self.out.push_back(p);
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new(QuoteContinuation::default())
    }
}
