use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 0-based line number.
    pub index: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text as a string, terminator included.
    pub text: String,
}

impl LineRef {
    /// The line text without its `\n` / `\r\n` terminator.
    #[must_use]
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking during block parsing.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    rope.lines_raw(..).enumerate().scan(0usize, |offset, (index, line)| {
        let start = *offset;
        *offset += line.len();
        Some(LineRef {
            index,
            span: Span {
                start,
                end: *offset,
            },
            text: line.into_owned(),
        })
    })
}
