use std::path::Path;

use relative_path::RelativePath;

use crate::editing::{
    BlockId, BulkAction, Document, InputEvent, Patch, Selection, SelectionEngine, Snapshot,
};
use crate::io::{self, IoError};
use crate::parsing::{ParseError, ParseOptions, parse_bytes};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Owns one document and the selection over it.
///
/// Every call runs to completion against the current document; a reload
/// parses first and only then swaps the document and clears the selection.
#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    selection: SelectionEngine,
    options: ParseOptions,
}

impl Editor {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Replaces the document with a parse of `bytes`.
    ///
    /// Input that is not text is rejected and the current document and
    /// selection stay as they were.
    pub fn load(&mut self, bytes: &[u8]) -> Result<Patch, EditorError> {
        let parsed = parse_bytes(bytes, &self.options)?;
        let patch = self.document.replace_all(parsed.blocks);
        self.selection.escape();
        log::debug!(
            "loaded {} blocks at revision {}",
            self.document.len(),
            patch.revision
        );
        Ok(patch)
    }

    pub fn load_file(
        &mut self,
        relative_path: &RelativePath,
        notes_root: &Path,
    ) -> Result<Patch, EditorError> {
        let bytes = io::read_bytes(relative_path, notes_root)?;
        self.load(&bytes)
    }

    pub fn save_file(&self, relative_path: &RelativePath, notes_root: &Path) -> Result<(), EditorError> {
        io::write_file(relative_path, notes_root, &self.to_markdown())?;
        Ok(())
    }

    pub fn handle(&mut self, event: InputEvent) -> Patch {
        self.selection.handle(&mut self.document, event)
    }

    /// Duplicates the selected blocks; the originals stay selected.
    pub fn duplicate_selected(&mut self) -> Patch {
        let snapshot = self.selection.snapshot(&self.document);
        BulkAction::Duplicate.apply(&mut self.document, &snapshot)
    }

    /// Merges the selected blocks and selects the merged block.
    pub fn merge_selected(&mut self) -> Patch {
        let snapshot = self.selection.snapshot(&self.document);
        let patch = BulkAction::Merge.apply(&mut self.document, &snapshot);
        match patch.replaced().next() {
            Some(merged) => self.selection.plain_click(&self.document, merged),
            None => self.selection.prune(&self.document),
        }
        patch
    }

    pub fn to_markdown(&self) -> String {
        self.document.to_markdown(&self.options)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::build(&self.document, self.selection.selection())
    }

    /// Block ids in reading order.
    pub fn ids(&self) -> Vec<BlockId> {
        self.document.ids().collect()
    }
}
