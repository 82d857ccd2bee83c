/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles various forms: `> text`, `>> nested`, `> > spaced nested`.
    ///
    /// # Returns
    /// - `depth`: Number of `>` prefixes found (0 if not a blockquote)
    /// - `byte_offset`: Index into `s` where content begins after prefixes
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0u8;

        loop {
            while i < b.len() && b[i] == b' ' {
                i += 1;
            }
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                depth = depth.saturating_add(1);
                i += 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        if depth == 0 {
            return (0, 0);
        }
        (depth, i)
    }

    /// Quote depth of a line whose marker sits within the allowed indent.
    pub fn depth(line: &str) -> u8 {
        match super::strip_indent(line) {
            Some(t) if t.starts_with(Self::PREFIX) => Self::strip_prefixes(line).0,
            _ => 0,
        }
    }
}
