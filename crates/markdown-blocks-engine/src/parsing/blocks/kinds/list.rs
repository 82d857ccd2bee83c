//! List markers, item extraction and nesting depth.

use serde::Serialize;

/// Marker types for list items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Marker {
    Dash,          // "-"
    Asterisk,      // "*"
    Plus,          // "+"
    Numbered(u64), // "1.", "2)", etc.
}

impl Marker {
    pub fn is_ordered(&self) -> bool {
        matches!(self, Marker::Numbered(_))
    }
}

/// Indentation style detected in a list block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize), // Number of spaces per indent level
    Tabs,          // Tab characters
}

impl IndentStyle {
    /// Convert an indentation string to depth level
    pub fn calculate_depth(&self, indent_str: &str) -> usize {
        match self {
            IndentStyle::Tabs => indent_str.chars().take_while(|&c| c == '\t').count(),
            IndentStyle::Spaces(spaces_per_level) => {
                let space_count = indent_str.chars().take_while(|&c| c == ' ').count();
                if space_count == 0 || *spaces_per_level == 0 {
                    0
                } else {
                    space_count / spaces_per_level
                }
            }
        }
    }

    /// Detects the indent unit from the first indented line; 2 spaces if none is.
    pub fn detect<'a>(indents: impl IntoIterator<Item = &'a str>) -> Self {
        for indent in indents {
            if indent.starts_with('\t') {
                return IndentStyle::Tabs;
            }
            let spaces = indent.chars().take_while(|&c| c == ' ').count();
            if spaces > 0 {
                return IndentStyle::Spaces(spaces);
            }
        }
        IndentStyle::Spaces(2)
    }
}

/// A list item line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLine<'a> {
    pub indent: &'a str,
    pub marker: Marker,
    pub checked: Option<bool>,
    pub text: &'a str,
}

/// One item of a list block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub marker: Marker,
    pub depth: usize,
    pub text: String,
    pub checked: Option<bool>,
}

/// Structured list data; `ordered` follows the first item's marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

impl List {
    pub const MAX_ORDINAL_DIGITS: usize = 9;

    /// Parses a list item line: unordered `-`/`*`/`+` or ordered `N.`/`N)`,
    /// followed by whitespace or end of line.
    pub fn item(line: &str) -> Option<ItemLine<'_>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let rest = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - rest.len()];

        let (marker, after) = match rest.chars().next()? {
            '-' => (Marker::Dash, &rest[1..]),
            '*' => (Marker::Asterisk, &rest[1..]),
            '+' => (Marker::Plus, &rest[1..]),
            c if c.is_ascii_digit() => {
                let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
                if digits > Self::MAX_ORDINAL_DIGITS {
                    return None;
                }
                let delim = rest[digits..].chars().next()?;
                if delim != '.' && delim != ')' {
                    return None;
                }
                let n = rest[..digits].parse().ok()?;
                (Marker::Numbered(n), &rest[digits + 1..])
            }
            _ => return None,
        };

        if !after.is_empty() && !after.starts_with([' ', '\t']) {
            return None;
        }
        let text = after.trim();
        let (checked, text) = Self::task(text);
        Some(ItemLine {
            indent,
            marker,
            checked,
            text,
        })
    }

    /// Builds the list from its lines. `indent_unit` overrides detection.
    pub fn from_lines<'a>(
        lines: impl IntoIterator<Item = &'a str>,
        indent_unit: Option<usize>,
    ) -> Self {
        let parsed: Vec<ItemLine<'a>> = lines.into_iter().filter_map(Self::item).collect();
        let style = match indent_unit {
            Some(n) => IndentStyle::Spaces(n),
            None => IndentStyle::detect(parsed.iter().map(|l| l.indent)),
        };

        let items: Vec<ListItem> = parsed
            .into_iter()
            .map(|l| ListItem {
                depth: style.calculate_depth(l.indent),
                marker: l.marker,
                text: l.text.to_string(),
                checked: l.checked,
            })
            .collect();

        List {
            ordered: items.first().is_some_and(|i| i.marker.is_ordered()),
            items,
        }
    }

    fn task(text: &str) -> (Option<bool>, &str) {
        for (box_, state) in [("[ ]", false), ("[x]", true), ("[X]", true)] {
            if let Some(rest) = text.strip_prefix(box_)
                && (rest.is_empty() || rest.starts_with(' '))
            {
                return (Some(state), rest.trim_start());
            }
        }
        (None, text)
    }
}
