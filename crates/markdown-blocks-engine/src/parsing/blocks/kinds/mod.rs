pub mod block_quote;
pub mod code_fence;
pub mod embed;
pub mod heading;
pub mod list;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use embed::ComponentEmbed;
pub use heading::Heading;
pub use list::{IndentStyle, List, ListItem, Marker};
pub use paragraph::Paragraph;
pub use table::{Alignment, Table, TableRow};
pub use thematic_break::ThematicBreak;

/// Strips up to three leading spaces; `None` when the line is indented further.
pub(crate) fn strip_indent(line: &str) -> Option<&str> {
    let n = line.bytes().take_while(|&b| b == b' ').count();
    if n > 3 { None } else { Some(&line[n..]) }
}
