use serde::Serialize;

use crate::editing::{BlockId, Document, Selection};
use crate::parsing::blocks::BlockKind;

/// One block as the UI should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderBlock {
    pub id: BlockId,
    pub kind: BlockKind,
    pub level: Option<u8>,
    pub text: String,
    pub selected: bool,
    pub malformed: bool,
}

/// Immutable render view of a document and its selection.
///
/// Front ends draw from snapshots and never touch the document directly;
/// `revision` tells them when to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub blocks: Vec<RenderBlock>,
    pub revision: u64,
    pub focus: Option<BlockId>,
}

impl Snapshot {
    pub fn build(doc: &Document, selection: &Selection) -> Self {
        let blocks = doc
            .all()
            .iter()
            .map(|b| RenderBlock {
                id: b.id(),
                kind: b.kind(),
                level: b.level(),
                text: b.content().display_text(),
                selected: selection.contains(b.id()),
                malformed: b.is_malformed(),
            })
            .collect();

        Snapshot {
            blocks,
            revision: doc.revision(),
            focus: selection.focus(),
        }
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().filter(|b| b.selected).map(|b| b.id)
    }
}
