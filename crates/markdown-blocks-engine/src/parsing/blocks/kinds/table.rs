//! Pipe tables: candidate rows, the header separator and cell splitting.

use serde::Serialize;

/// Column alignment read from the separator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// One table row. `malformed` is set when its column count differs from the header's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub column_count: usize,
    pub malformed: bool,
}

/// Structured table data. `rows[0]` is the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub alignments: Vec<Alignment>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub const PIPE: char = '|';

    /// A candidate row holds a pipe and either splits into 3+ fields or is wrapped in pipes.
    pub fn is_candidate_row(line: &str) -> bool {
        let t = line.trim();
        if !t.contains(Self::PIPE) {
            return false;
        }
        let wrapped = t.len() >= 2 && t.starts_with(Self::PIPE) && Self::ends_with_pipe(t);
        wrapped || Self::split_raw(t).len() >= 3
    }

    /// Header separator: pipes, colons, dashes and whitespace, with a dash in every cell.
    pub fn is_separator(line: &str) -> bool {
        let t = line.trim();
        if !t.contains(Self::PIPE) || !t.contains('-') {
            return false;
        }
        if !t
            .chars()
            .all(|c| c == Self::PIPE || c == ':' || c == '-' || c.is_whitespace())
        {
            return false;
        }
        Self::split_cells(t).iter().all(|cell| cell.contains('-'))
    }

    /// Splits on unescaped pipes, trims cells and drops the empty edge cells
    /// produced by leading/trailing pipe wrapping. `\|` becomes a literal pipe.
    pub fn split_cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let mut fields = Self::split_raw(t);
        if t.starts_with(Self::PIPE) && fields.first().is_some_and(|f| f.trim().is_empty()) {
            fields.remove(0);
        }
        if Self::ends_with_pipe(t) && fields.last().is_some_and(|f| f.trim().is_empty()) {
            fields.pop();
        }
        fields
            .into_iter()
            .map(|f| f.trim().replace("\\|", "|"))
            .collect()
    }

    pub fn alignments(separator: &str) -> Vec<Alignment> {
        Self::split_cells(separator)
            .iter()
            .map(|cell| match (cell.starts_with(':'), cell.ends_with(':')) {
                (true, true) => Alignment::Center,
                (true, false) => Alignment::Left,
                (false, true) => Alignment::Right,
                (false, false) => Alignment::None,
            })
            .collect()
    }

    /// Builds the table from its lines: header, separator, then body rows.
    ///
    /// Rows whose column count differs from the header are kept and flagged.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut lines = lines.into_iter();
        let mut rows = Vec::new();
        let mut alignments = Vec::new();

        if let Some(header) = lines.next() {
            let cells = Self::split_cells(header);
            rows.push(TableRow {
                column_count: cells.len(),
                cells,
                malformed: false,
            });
        }
        if let Some(separator) = lines.next() {
            alignments = Self::alignments(separator);
        }

        let expected = rows.first().map_or(0, |r| r.column_count);
        for line in lines {
            let cells = Self::split_cells(line);
            rows.push(TableRow {
                column_count: cells.len(),
                malformed: cells.len() != expected,
                cells,
            });
        }

        Table { alignments, rows }
    }

    pub fn is_malformed(&self) -> bool {
        self.rows.iter().any(|r| r.malformed)
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    fn ends_with_pipe(t: &str) -> bool {
        t.ends_with(Self::PIPE) && !t.ends_with("\\|")
    }

    /// Raw fields between unescaped pipes, untrimmed.
    fn split_raw(t: &str) -> Vec<&str> {
        let mut fields = Vec::new();
        let mut start = 0;
        let mut escaped = false;
        for (i, c) in t.char_indices() {
            match c {
                '\\' if !escaped => {
                    escaped = true;
                    continue;
                }
                Self::PIPE if !escaped => {
                    fields.push(&t[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
            escaped = false;
        }
        fields.push(&t[start..]);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", true)]
    #[case("a | b | c", true)]
    #[case("a | b", false)]
    #[case("no pipes here", false)]
    #[case("|", false)]
    #[case("| only |", true)]
    fn candidate_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Table::is_candidate_row(line), expected);
    }

    #[rstest]
    #[case("|---|---|", true)]
    #[case("| :--- | ---: |", true)]
    #[case("--- | :-:", true)]
    #[case("---", false)]
    #[case("| --- | |", false)]
    #[case("| a | b |", false)]
    fn separators(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Table::is_separator(line), expected);
    }

    #[test]
    fn split_drops_wrapping_cells_and_trims() {
        assert_eq!(Table::split_cells("|  a | b  |"), vec!["a", "b"]);
        assert_eq!(Table::split_cells("a | b | c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_keeps_interior_empty_cells() {
        assert_eq!(Table::split_cells("| a || c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn split_honours_escaped_pipes() {
        assert_eq!(Table::split_cells(r"| a \| b | c |"), vec!["a | b", "c"]);
    }

    #[test]
    fn alignments_from_separator() {
        assert_eq!(
            Table::alignments("| :-- | :-: | --: | --- |"),
            vec![
                Alignment::Left,
                Alignment::Center,
                Alignment::Right,
                Alignment::None
            ]
        );
    }

    #[test]
    fn mismatched_rows_are_kept_and_flagged() {
        let table = Table::from_lines(["| a | b |", "|---|---|", "| 1 | 2 | 3 |", "| x |"]);

        assert_eq!(table.rows.len(), 3);
        assert!(!table.rows[0].malformed);
        assert_eq!(table.rows[1].cells, vec!["1", "2", "3"]);
        assert!(table.rows[1].malformed);
        assert_eq!(table.rows[2].column_count, 1);
        assert!(table.rows[2].malformed);
        assert!(table.is_malformed());
    }
}
