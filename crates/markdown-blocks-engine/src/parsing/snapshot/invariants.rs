use xi_rope::Rope;

use crate::parsing::blocks::{BlockContent, BlockData};

/// Validates parser output invariants.
///
/// Asserts that:
/// - Line ranges are non-empty, in bounds, ordered and non-overlapping
/// - Every table row matches the header's column count or is flagged
/// - A code block is malformed exactly when its fence never closed
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[BlockContent]) {
    let line_count = rope.lines_raw(..).count();
    let mut prev_end = 0;

    for b in blocks {
        let r = b.source_range;
        assert!(
            r.start < r.end && r.end <= line_count,
            "line range out of bounds: {r:?} (line count: {line_count})"
        );
        assert!(
            r.start >= prev_end,
            "line range overlaps previous block: {r:?} starts before {prev_end}"
        );
        prev_end = r.end;

        match &b.data {
            BlockData::Table(table) => {
                let expected = table.header().map_or(0, |h| h.column_count);
                for row in &table.rows {
                    assert_eq!(row.column_count, row.cells.len(), "column count drifted");
                    assert!(
                        row.column_count == expected || row.malformed,
                        "row {:?} has {} columns, header has {expected}, and is not flagged",
                        row.cells,
                        row.column_count
                    );
                }
                assert_eq!(b.malformed, table.is_malformed(), "table flag mismatch");
            }
            BlockData::Code(code) => {
                assert_eq!(b.malformed, !code.closed, "fence pairing flag mismatch");
            }
            _ => {}
        }
    }
}
