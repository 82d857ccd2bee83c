use std::borrow::Cow;

use crate::parsing::blocks::classify::{LineKind, MarkdownLineClassifier};

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the fallback leaf block
/// when no other block opener matches.
pub struct Paragraph;

impl Paragraph {
    pub const ESCAPE: char = '\\';

    /// Paragraph text: each line with its leading indent removed, joined by `\n`.
    pub fn text<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
        lines
            .into_iter()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lines that read as paragraph text wherever they land.
    ///
    /// Blank lines are dropped. A line that would open another block, or a
    /// table separator that would turn the line above into a header, gets a
    /// backslash before its first non-space character.
    pub fn paragraph_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Cow<'a, str>> {
        lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .map(Self::escape_opener)
            .collect()
    }

    fn escape_opener(line: &str) -> Cow<'_, str> {
        let class = MarkdownLineClassifier.classify_text(line);
        if class.kind == LineKind::Text && !class.table_separator {
            return Cow::Borrowed(line);
        }
        let indent = line.len() - line.trim_start().len();
        let (lead, rest) = line.split_at(indent);
        Cow::Owned(format!("{lead}{}{rest}", Self::ESCAPE))
    }
}
