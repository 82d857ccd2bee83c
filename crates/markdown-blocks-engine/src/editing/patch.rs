use serde::Serialize;

use super::BlockId;

/// One block-level change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Change {
    Added { id: BlockId, index: usize },
    Removed { id: BlockId },
    Replaced { id: BlockId },
}

/// Result of a document mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub changes: Vec<Change>,
    /// Document revision after the mutation
    pub revision: u64,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Appends a later patch, keeping its revision.
    pub fn extend(&mut self, later: Patch) {
        self.changes.extend(later.changes);
        self.revision = self.revision.max(later.revision);
    }

    pub fn added(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Added { id, .. } => Some(*id),
            _ => None,
        })
    }

    pub fn removed(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Removed { id } => Some(*id),
            _ => None,
        })
    }

    pub fn replaced(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.changes.iter().filter_map(|c| match c {
            Change::Replaced { id } => Some(*id),
            _ => None,
        })
    }
}
