use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{BlockQuote, CodeFence, ComponentEmbed, FenceSig, Heading, List, Table, ThematicBreak};

/// What a line looks like on its own, in priority order.
///
/// Table rows are not part of this ordering: whether a candidate row opens a
/// table depends on the next line, so the builder consults
/// [`LineClass::table_row`] and [`LineClass::table_separator`] separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Fence(FenceSig),
    Heading { level: u8 },
    ThematicBreak,
    ComponentEmbed,
    Quote { depth: u8 },
    ListItem,
    Text,
}

impl LineKind {
    /// Kinds that outrank a table row.
    pub fn outranks_table(&self) -> bool {
        matches!(
            self,
            LineKind::Fence(_)
                | LineKind::Heading { .. }
                | LineKind::ThematicBreak
                | LineKind::ComponentEmbed
        )
    }
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// 0-based line number.
    pub index: usize,
    /// Full byte span of this line in the rope.
    pub line: Span,
    /// Line text without its terminator.
    pub text: String,
    pub kind: LineKind,
    /// Candidate table row: has a pipe and 3+ fields or pipe wrapping.
    pub table_row: bool,
    /// Table header separator (`|---|:--:|`).
    pub table_separator: bool,
}

impl LineClass {
    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    ///
    /// Priority: fence > heading > horizontal rule > component embed >
    /// blockquote > list > text.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.content();

        let kind = if text.trim().is_empty() {
            LineKind::Blank
        } else if let Some(sig) = CodeFence::sig(text) {
            LineKind::Fence(sig)
        } else if let Some((level, _)) = Heading::parse(text) {
            LineKind::Heading { level }
        } else if ThematicBreak::matches(text) {
            LineKind::ThematicBreak
        } else if ComponentEmbed::parse(text).is_some() {
            LineKind::ComponentEmbed
        } else if BlockQuote::depth(text) > 0 {
            LineKind::Quote {
                depth: BlockQuote::depth(text),
            }
        } else if List::item(text).is_some() {
            LineKind::ListItem
        } else {
            LineKind::Text
        };

        let blank = kind == LineKind::Blank;
        LineClass {
            index: lr.index,
            line: lr.span,
            table_row: !blank && Table::is_candidate_row(text),
            table_separator: !blank && Table::is_separator(text),
            text: text.to_string(),
            kind,
        }
    }

    /// Classifies a standalone line of text.
    pub fn classify_text(&self, text: &str) -> LineClass {
        self.classify(&LineRef {
            index: 0,
            span: Span {
                start: 0,
                end: text.len(),
            },
            text: text.to_string(),
        })
    }
}
