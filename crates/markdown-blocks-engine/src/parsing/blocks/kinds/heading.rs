/// ATX heading: 1-6 `#` markers followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns `(level, text)` for a heading line.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let t = super::strip_indent(line)?;
        let level = t.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = t[level..].strip_prefix(' ')?;
        Some((level as u8, Self::strip_closing(rest.trim())))
    }

    /// Drops a closing `#` run when it is preceded by a space (or is the whole text).
    fn strip_closing(text: &str) -> &str {
        let without = text.trim_end_matches(Self::MARKER);
        if without.len() == text.len() {
            return text;
        }
        if without.is_empty() {
            return "";
        }
        if without.ends_with(' ') {
            without.trim_end()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, "Title")))]
    #[case("### Deep  ", Some((3, "Deep")))]
    #[case("###### Six", Some((6, "Six")))]
    #[case("####### Seven", None)]
    #[case("#NoSpace", None)]
    #[case("## Closed ##", Some((2, "Closed")))]
    #[case("# C#", Some((1, "C#")))]
    #[case("   # indented", Some((1, "indented")))]
    #[case("    # code-indented", None)]
    fn parses_headings(#[case] line: &str, #[case] expected: Option<(u8, &str)>) {
        assert_eq!(Heading::parse(line), expected);
    }
}
