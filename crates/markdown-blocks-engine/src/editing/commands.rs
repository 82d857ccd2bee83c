use std::collections::HashSet;

use crate::editing::{BlockId, Document, Patch, SelectionSnapshot};
use crate::parsing::{
    blocks::{BlockContent, kinds::Paragraph},
    rope::LineRange,
};

/// Operations applied to every block in a selection snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BulkAction {
    Delete,
    Duplicate,
    Merge,
}

/// Rejection from the versioned dispatch path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BulkError {
    #[error("selection taken at revision {snapshot} but document is at revision {current}")]
    StaleSnapshot { snapshot: u64, current: u64 },
}

impl BulkAction {
    /// Applies the action to the snapshot's ids.
    ///
    /// Ids that have left the document are skipped and the action proceeds
    /// on the rest.
    pub fn apply(self, doc: &mut Document, snapshot: &SelectionSnapshot) -> Patch {
        let live = live_ids(doc, snapshot);
        if live.len() < snapshot.ids.len() {
            log::debug!(
                "{self:?}: skipping {} stale ids",
                snapshot.ids.len() - live.len()
            );
        }
        log::debug!("{self:?} on {} blocks", live.len());

        match self {
            BulkAction::Delete => {
                let ids: HashSet<BlockId> = live.into_iter().collect();
                doc.remove(&ids)
            }
            BulkAction::Duplicate => duplicate(doc, &live),
            BulkAction::Merge => merge(doc, &live),
        }
    }

    /// Like [`BulkAction::apply`], but refuses a snapshot taken at an older
    /// document revision and leaves the document untouched.
    pub fn apply_versioned(
        self,
        doc: &mut Document,
        snapshot: &SelectionSnapshot,
    ) -> Result<Patch, BulkError> {
        if snapshot.revision != doc.revision() {
            return Err(BulkError::StaleSnapshot {
                snapshot: snapshot.revision,
                current: doc.revision(),
            });
        }
        Ok(self.apply(doc, snapshot))
    }
}

/// Snapshot ids still present, in current document order.
fn live_ids(doc: &Document, snapshot: &SelectionSnapshot) -> Vec<BlockId> {
    let wanted: HashSet<BlockId> = snapshot.ids.iter().copied().collect();
    doc.ids().filter(|id| wanted.contains(id)).collect()
}

fn duplicate(doc: &mut Document, ids: &[BlockId]) -> Patch {
    let mut patch = empty_patch(doc);
    for &id in ids {
        let Ok(block) = doc.get(id) else {
            continue;
        };
        let copy = block.content().clone();
        if let Ok((_, p)) = doc.insert_after(id, copy) {
            patch.extend(p);
        }
    }
    patch
}

/// Joins raw text into one paragraph kept under the first block's id.
///
/// Lines that would re-parse as another block are escaped and blank lines
/// dropped, so the saved result reads back as this one paragraph. Blank
/// lines after the merged block are those that followed the last block.
fn merge(doc: &mut Document, ids: &[BlockId]) -> Patch {
    let Some((&first, rest)) = ids.split_first() else {
        return empty_patch(doc);
    };

    let blocks: Vec<&BlockContent> = ids
        .iter()
        .filter_map(|&id| doc.get(id).ok())
        .map(|block| block.content())
        .collect();
    let (Some(head), Some(tail)) = (blocks.first(), blocks.last()) else {
        return empty_patch(doc);
    };

    let start = head.source_range.start;
    let end = blocks
        .iter()
        .map(|b| b.source_range.end)
        .max()
        .unwrap_or(start);
    let trailing = tail.trailing_blank_lines;
    let raw = Paragraph::paragraph_lines(blocks.iter().flat_map(|b| b.raw_text.lines())).join("\n");

    let mut merged = BlockContent::paragraph(raw, LineRange { start, end });
    merged.trailing_blank_lines = trailing;

    let mut patch = empty_patch(doc);
    if let Ok(p) = doc.replace(first, merged) {
        patch.extend(p);
    }
    let rest: HashSet<BlockId> = rest.iter().copied().collect();
    patch.extend(doc.remove(&rest));
    patch
}

fn empty_patch(doc: &Document) -> Patch {
    Patch {
        changes: Vec::new(),
        revision: doc.revision(),
    }
}
