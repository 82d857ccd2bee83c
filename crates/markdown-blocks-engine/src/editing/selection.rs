use std::collections::HashSet;

use serde::Serialize;

use crate::editing::{BlockId, BulkAction, Document, InputEvent, Patch};

/// Which blocks are selected.
///
/// `selected` is membership only; [`Selection::ids_in`] gives document
/// order. `anchor` is the fixed end of a range and `focus` the most
/// recently touched id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Single(BlockId),
    Multi {
        selected: HashSet<BlockId>,
        anchor: BlockId,
        focus: BlockId,
    },
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        match self {
            Selection::Empty => false,
            Selection::Single(s) => *s == id,
            Selection::Multi { selected, .. } => selected.contains(&id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::Single(_) => 1,
            Selection::Multi { selected, .. } => selected.len(),
        }
    }

    pub fn anchor(&self) -> Option<BlockId> {
        match self {
            Selection::Empty => None,
            Selection::Single(id) => Some(*id),
            Selection::Multi { anchor, .. } => Some(*anchor),
        }
    }

    pub fn focus(&self) -> Option<BlockId> {
        match self {
            Selection::Empty => None,
            Selection::Single(id) => Some(*id),
            Selection::Multi { focus, .. } => Some(*focus),
        }
    }

    /// Selected ids in the order given by `order`.
    pub fn ids_in(&self, order: impl IntoIterator<Item = BlockId>) -> Vec<BlockId> {
        order.into_iter().filter(|id| self.contains(*id)).collect()
    }
}

/// Immutable capture of a selection, taken before a bulk action mutates
/// the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    /// Selected ids in document order
    pub ids: Vec<BlockId>,
    /// Document revision the snapshot was taken at
    pub revision: u64,
}

/// Selection state machine over block ids.
///
/// Transitions that name an id missing from the document are dropped.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: Selection,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.state
    }

    /// Applies one input event. Only `Delete` mutates the document.
    pub fn handle(&mut self, doc: &mut Document, event: InputEvent) -> Patch {
        match event {
            InputEvent::PlainClick(id) => self.plain_click(doc, id),
            InputEvent::ToggleClick(id) => self.toggle_click(doc, id),
            InputEvent::RangeClick(id) => self.range_click(doc, id),
            InputEvent::SelectAll => self.select_all(doc),
            InputEvent::Escape => self.escape(),
            InputEvent::Delete => return self.delete_selected(doc),
        }
        Patch {
            changes: Vec::new(),
            revision: doc.revision(),
        }
    }

    pub fn plain_click(&mut self, doc: &Document, id: BlockId) {
        if !doc.contains(id) {
            log::debug!("plain click on unknown block {id} dropped");
            return;
        }
        self.state = Selection::Single(id);
    }

    pub fn toggle_click(&mut self, doc: &Document, id: BlockId) {
        if !doc.contains(id) {
            log::debug!("toggle click on unknown block {id} dropped");
            return;
        }

        self.state = match std::mem::take(&mut self.state) {
            Selection::Empty => Selection::Multi {
                selected: HashSet::from([id]),
                anchor: id,
                focus: id,
            },
            Selection::Single(current) if current == id => Selection::Empty,
            Selection::Single(current) => Selection::Multi {
                selected: HashSet::from([current, id]),
                anchor: current,
                focus: id,
            },
            Selection::Multi {
                mut selected,
                anchor,
                ..
            } => {
                if !selected.remove(&id) {
                    selected.insert(id);
                }
                if selected.is_empty() {
                    Selection::Empty
                } else {
                    Selection::Multi {
                        selected,
                        anchor,
                        focus: id,
                    }
                }
            }
        };
    }

    /// Selects everything between the anchor and `id` inclusive.
    pub fn range_click(&mut self, doc: &Document, id: BlockId) {
        let Some(to) = doc.position(id) else {
            log::debug!("range click on unknown block {id} dropped");
            return;
        };
        let Some((anchor, from)) = self
            .state
            .anchor()
            .and_then(|a| doc.position(a).map(|p| (a, p)))
        else {
            self.plain_click(doc, id);
            return;
        };

        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let selected: HashSet<BlockId> = doc.all()[lo..=hi].iter().map(|b| b.id()).collect();
        self.state = if selected.len() == 1 {
            Selection::Single(id)
        } else {
            Selection::Multi {
                selected,
                anchor,
                focus: id,
            }
        };
    }

    pub fn select_all(&mut self, doc: &Document) {
        let (Some(first), Some(last)) = (doc.all().first(), doc.all().last()) else {
            self.state = Selection::Empty;
            return;
        };
        self.state = Selection::Multi {
            selected: doc.ids().collect(),
            anchor: first.id(),
            focus: last.id(),
        };
    }

    pub fn escape(&mut self) {
        self.state = Selection::Empty;
    }

    /// Deletes the selected blocks and clears the selection.
    pub fn delete_selected(&mut self, doc: &mut Document) -> Patch {
        if self.state.is_empty() {
            return Patch {
                changes: Vec::new(),
                revision: doc.revision(),
            };
        }
        let snapshot = self.snapshot(doc);
        let patch = BulkAction::Delete.apply(doc, &snapshot);
        self.state = Selection::Empty;
        patch
    }

    /// Drops selected ids that left the document.
    ///
    /// A departed anchor moves to the first surviving selected id and a
    /// departed focus to the last one.
    pub fn prune(&mut self, doc: &Document) {
        self.state = match std::mem::take(&mut self.state) {
            Selection::Single(id) if !doc.contains(id) => Selection::Empty,
            Selection::Multi {
                mut selected,
                anchor,
                focus,
            } => {
                selected.retain(|id| doc.contains(*id));
                let ordered: Vec<BlockId> = doc.ids().filter(|id| selected.contains(id)).collect();
                match (ordered.first(), ordered.last()) {
                    (Some(&first), Some(&last)) => Selection::Multi {
                        selected,
                        anchor: if doc.contains(anchor) { anchor } else { first },
                        focus: if doc.contains(focus) { focus } else { last },
                    },
                    _ => Selection::Empty,
                }
            }
            other => other,
        };
    }

    pub fn snapshot(&self, doc: &Document) -> SelectionSnapshot {
        SelectionSnapshot {
            ids: self.state.ids_in(doc.ids()),
            revision: doc.revision(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParseOptions, parse_text};
    use pretty_assertions::assert_eq;

    const A: BlockId = BlockId(1);
    const B: BlockId = BlockId(2);
    const C: BlockId = BlockId(3);
    const D: BlockId = BlockId(4);

    fn four_blocks() -> Document {
        Document::from_parsed(parse_text("a\n\nb\n\nc\n\nd\n", &ParseOptions::default()))
    }

    fn multi(ids: &[BlockId], anchor: BlockId, focus: BlockId) -> Selection {
        Selection::Multi {
            selected: ids.iter().copied().collect(),
            anchor,
            focus,
        }
    }

    #[test]
    fn toggle_twice_returns_to_empty() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.toggle_click(&doc, B);
        assert_eq!(engine.selection(), &multi(&[B], B, B));
        engine.toggle_click(&doc, B);
        assert_eq!(engine.selection(), &Selection::Empty);
    }

    #[test]
    fn delete_selected_removes_blocks_and_clears() {
        let mut doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.toggle_click(&doc, B);
        engine.toggle_click(&doc, C);
        engine.delete_selected(&mut doc);
        assert_eq!(doc.ids().collect::<Vec<_>>(), vec![A, D]);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn range_from_first_to_last_keeps_anchor() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.range_click(&doc, A);
        assert_eq!(engine.selection(), &Selection::Single(A));
        engine.range_click(&doc, D);
        assert_eq!(engine.selection(), &multi(&[A, B, C, D], A, D));
        engine.range_click(&doc, B);
        assert_eq!(engine.selection(), &multi(&[A, B], A, B));
    }

    #[test]
    fn range_works_backwards() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.plain_click(&doc, C);
        engine.range_click(&doc, A);
        assert_eq!(engine.selection(), &multi(&[A, B, C], C, A));
    }

    #[test]
    fn plain_click_discards_prior_selection() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.select_all(&doc);
        engine.plain_click(&doc, C);
        assert_eq!(engine.selection(), &Selection::Single(C));
    }

    #[test]
    fn toggle_keeps_anchor_and_moves_focus() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.plain_click(&doc, A);
        engine.toggle_click(&doc, C);
        assert_eq!(engine.selection(), &multi(&[A, C], A, C));
        engine.toggle_click(&doc, A);
        assert_eq!(engine.selection(), &multi(&[C], A, A));
        engine.range_click(&doc, B);
        assert_eq!(engine.selection(), &multi(&[A, B], A, B));
    }

    #[test]
    fn select_all_and_escape() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.select_all(&doc);
        assert_eq!(engine.selection(), &multi(&[A, B, C, D], A, D));
        engine.escape();
        engine.escape();
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn select_all_on_empty_document() {
        let mut engine = SelectionEngine::new();
        engine.select_all(&Document::new());
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.plain_click(&doc, B);
        engine.plain_click(&doc, BlockId(99));
        engine.toggle_click(&doc, BlockId(99));
        engine.range_click(&doc, BlockId(99));
        assert_eq!(engine.selection(), &Selection::Single(B));
    }

    #[test]
    fn delete_on_empty_is_noop() {
        let mut doc = four_blocks();
        let rev = doc.revision();
        let mut engine = SelectionEngine::new();
        assert!(engine.delete_selected(&mut doc).is_empty());
        assert_eq!(doc.revision(), rev);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn prune_moves_departed_anchor_and_focus() {
        let mut doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.plain_click(&doc, A);
        engine.range_click(&doc, D);
        doc.remove(&HashSet::from([A, D]));
        engine.prune(&doc);
        assert_eq!(engine.selection(), &multi(&[B, C], B, C));

        doc.remove(&HashSet::from([B, C]));
        engine.prune(&doc);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn snapshot_lists_ids_in_document_order() {
        let doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.toggle_click(&doc, D);
        engine.toggle_click(&doc, A);
        engine.toggle_click(&doc, C);
        let snap = engine.snapshot(&doc);
        assert_eq!(snap.ids, vec![A, C, D]);
        assert_eq!(snap.revision, doc.revision());
    }

    #[test]
    fn handle_maps_events() {
        let mut doc = four_blocks();
        let mut engine = SelectionEngine::new();
        engine.handle(&mut doc, InputEvent::PlainClick(B));
        engine.handle(&mut doc, InputEvent::RangeClick(C));
        let patch = engine.handle(&mut doc, InputEvent::Delete);
        assert_eq!(patch.removed().count(), 2);
        assert_eq!(doc.ids().collect::<Vec<_>>(), vec![A, D]);
    }
}
