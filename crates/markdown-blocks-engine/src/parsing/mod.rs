pub mod blocks;
pub mod options;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockClassifier, BlockContent, Segmenter};
pub use options::{ParseOptions, QuoteContinuation};

/// Input rejected at the parse boundary.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("input looks binary: NUL byte at offset {offset}")]
    BinaryContent { offset: usize },
}

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockContent>,
}

pub fn parse_document(rope: &Rope) -> ParsedDoc {
    parse_document_with(rope, &ParseOptions::default())
}

pub fn parse_document_with(rope: &Rope, options: &ParseOptions) -> ParsedDoc {
    let classifier = BlockClassifier::new(options);
    let blocks = Segmenter::new(rope, *options)
        .spans()
        .map(|raw| classifier.classify(rope, &raw))
        .collect();

    ParsedDoc { blocks }
}

/// Convenience: parse a string with the given options.
pub fn parse_text(text: &str, options: &ParseOptions) -> ParsedDoc {
    parse_document_with(&Rope::from(text), options)
}

/// Parse boundary for untrusted buffers: rejects anything that is not text.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<ParsedDoc, ParseError> {
    let text = validate_text(bytes)?;
    Ok(parse_text(text, options))
}

/// Checks that a buffer is UTF-8 text without NUL bytes.
pub fn validate_text(bytes: &[u8]) -> Result<&str, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    if let Some(offset) = bytes.iter().position(|&b| b == 0) {
        return Err(ParseError::BinaryContent { offset });
    }
    Ok(text)
}

/// Line-ending normalisation used by round-trip comparisons: `\r\n` becomes
/// `\n`, whitespace-only lines become empty, leading blank lines are dropped
/// and non-empty output ends with exactly one newline.
pub fn normalize_line_endings(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .map(|l| if l.trim().is_empty() { "" } else { l })
        .skip_while(|l| l.is_empty())
        .collect();
    let mut out = lines.join("\n");
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
