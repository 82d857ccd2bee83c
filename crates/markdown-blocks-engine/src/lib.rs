pub mod editing;
pub mod io;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::*;
pub use io::{IoError, read_bytes, scan_markdown_files, validate_notes_dir, write_file};
pub use parsing::{
    ParseError, ParseOptions, ParsedDoc, QuoteContinuation, parse_bytes, parse_document,
    parse_document_with, parse_text,
};
