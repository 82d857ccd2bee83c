use std::collections::HashSet;

use serde::Serialize;
use xi_rope::Rope;

use crate::editing::{BlockId, Change, Patch};
use crate::parsing::{
    ParseOptions, ParsedDoc,
    blocks::{BlockContent, BlockKind, Segmenter},
};

/// Upper bound on separating blank lines; two end even a bridged quote.
const MAX_SEPARATOR_LINES: usize = 2;

/// Failure of a block model lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("block {0} not found")]
    NotFound(BlockId),
}

/// A classified block with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub(crate) id: BlockId,
    /// Document revision at which this block was created or last replaced
    pub(crate) revision: u64,
    pub(crate) content: BlockContent,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn level(&self) -> Option<u8> {
        self.content.level()
    }

    pub fn raw_text(&self) -> &str {
        &self.content.raw_text
    }

    pub fn is_malformed(&self) -> bool {
        self.content.malformed
    }
}

/// The ordered document of blocks.
///
/// Owns id assignment: ids increase monotonically and are never reused,
/// even across [`Document::replace_all`]. Every mutation that changes
/// something bumps the revision and reports what changed as a [`Patch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    next_id: u64,
    revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from a parse result, assigning fresh ids.
    pub fn from_parsed(parsed: ParsedDoc) -> Self {
        let mut doc = Self::new();
        doc.replace_all(parsed.blocks);
        doc
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Result<&Block, ModelError> {
        self.position(id)
            .map(|i| &self.blocks[i])
            .ok_or(ModelError::NotFound(id))
    }

    /// All blocks in reading order.
    pub fn all(&self) -> &[Block] {
        &self.blocks
    }

    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts content directly after `after` under a fresh id.
    pub fn insert_after(
        &mut self,
        after: BlockId,
        content: BlockContent,
    ) -> Result<(BlockId, Patch), ModelError> {
        let index = self.position(after).ok_or(ModelError::NotFound(after))? + 1;
        Ok(self.insert_at(index, content))
    }

    /// Appends content under a fresh id.
    pub fn push(&mut self, content: BlockContent) -> (BlockId, Patch) {
        self.insert_at(self.blocks.len(), content)
    }

    /// Removes every listed block in one step. Ids not present are ignored.
    pub fn remove(&mut self, ids: &HashSet<BlockId>) -> Patch {
        let mut changes = Vec::new();
        self.blocks.retain(|b| {
            let keep = !ids.contains(&b.id);
            if !keep {
                changes.push(Change::Removed { id: b.id });
            }
            keep
        });
        if changes.is_empty() {
            return self.patch(changes);
        }

        self.revision += 1;
        log::debug!("removed {} blocks, revision {}", changes.len(), self.revision);
        self.patch(changes)
    }

    /// Swaps a block's content in place, keeping its id and position.
    pub fn replace(&mut self, id: BlockId, content: BlockContent) -> Result<Patch, ModelError> {
        let index = self.position(id).ok_or(ModelError::NotFound(id))?;
        self.revision += 1;
        let block = &mut self.blocks[index];
        block.content = content;
        block.revision = self.revision;
        log::debug!("replaced block {id}, revision {}", self.revision);
        Ok(self.patch(vec![Change::Replaced { id }]))
    }

    /// Replaces the whole document with a fresh parse result.
    ///
    /// Every old id is reported removed and every new block gets a new id,
    /// so selections held against the old blocks no longer resolve.
    pub fn replace_all(&mut self, contents: impl IntoIterator<Item = BlockContent>) -> Patch {
        self.revision += 1;
        let mut changes: Vec<Change> = self
            .blocks
            .drain(..)
            .map(|b| Change::Removed { id: b.id })
            .collect();

        for content in contents {
            let id = self.allocate_id();
            changes.push(Change::Added {
                id,
                index: self.blocks.len(),
            });
            self.blocks.push(Block {
                id,
                revision: self.revision,
                content,
            });
        }

        log::debug!(
            "document replaced: {} blocks, revision {}",
            self.blocks.len(),
            self.revision
        );
        self.patch(changes)
    }

    /// Reconstructs markdown from raw block text and the blank lines that
    /// followed each block.
    ///
    /// Neighbours that were never adjacent in the source (after a delete or
    /// duplicate) get extra blank lines where re-parsing under `options`
    /// would otherwise fuse them.
    pub fn to_markdown(&self, options: &ParseOptions) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            let written = block.content.trailing_blank_lines;
            let blanks = match self.blocks.get(i + 1) {
                Some(next) => separator_lines(&block.content, &next.content, written, options),
                None => written,
            };
            out.push_str(&block.content.raw_text);
            out.push('\n');
            for _ in 0..blanks {
                out.push('\n');
            }
        }
        out
    }

    fn insert_at(&mut self, index: usize, content: BlockContent) -> (BlockId, Patch) {
        let id = self.allocate_id();
        self.revision += 1;
        self.blocks.insert(
            index,
            Block {
                id,
                revision: self.revision,
                content,
            },
        );
        log::debug!("inserted block {id} at {index}, revision {}", self.revision);
        (id, self.patch(vec![Change::Added { id, index }]))
    }

    fn allocate_id(&mut self) -> BlockId {
        self.next_id += 1;
        BlockId(self.next_id)
    }

    fn patch(&self, changes: Vec<Change>) -> Patch {
        Patch {
            changes,
            revision: self.revision,
        }
    }
}

/// Fewest blank lines, at least `written`, that keep `prev` and `next`
/// apart when the pair is segmented again.
fn separator_lines(
    prev: &BlockContent,
    next: &BlockContent,
    written: usize,
    options: &ParseOptions,
) -> usize {
    let prev_lines = prev.raw_text.split('\n').count();
    (written..MAX_SEPARATOR_LINES)
        .find(|&blanks| {
            let text = format!("{}\n{}{}\n", prev.raw_text, "\n".repeat(blanks), next.raw_text);
            let rope = Rope::from(text.as_str());
            Segmenter::new(&rope, *options)
                .spans()
                .next()
                .is_some_and(|first| first.lines.end == prev_lines)
        })
        .unwrap_or(written.max(MAX_SEPARATOR_LINES))
}
