/*!
 * # Editing Core Module
 *
 * Block model, selection and bulk actions over a parsed document.
 *
 * ## Architecture Overview
 *
 * ### 1. Block Model (`document`)
 * - A `Document` is the ordered list of `Block`s produced by a parse
 * - Ids are assigned by the document, increase monotonically and are never reused
 * - Every mutation bumps the document revision and returns a `Patch` of
 *   `Added` / `Removed` / `Replaced` changes for the front end
 *
 * ### 2. Selection (`selection`, `events`)
 * - `SelectionEngine` is an explicitly owned state machine: `Empty`, `Single`, `Multi`
 * - Input arrives as `InputEvent`s; pointer clicks map through `InputEvent::from_pointer`
 * - Events naming blocks that are not in the document are dropped
 *
 * ### 3. Bulk Actions (`commands`)
 * - `BulkAction::{Delete, Duplicate, Merge}` act on a `SelectionSnapshot`
 *   captured before anything mutates
 * - Stale ids are skipped; `apply_versioned` rejects a snapshot from an older revision
 *
 * ### 4. Read API (`snapshot`, `editor`)
 * - `Editor` owns one document and one selection engine and handles reloads
 * - UI renders from immutable `Snapshot`s and never touches the document directly
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_blocks_engine::editing::*;
 *
 * let mut editor = Editor::default();
 * editor.load(b"# Hello\n\npara one\n\npara two").unwrap();
 *
 * let ids = editor.ids();
 * editor.handle(InputEvent::PlainClick(ids[1]));
 * editor.handle(InputEvent::RangeClick(ids[2]));
 * editor.merge_selected();
 *
 * let snapshot = editor.snapshot();
 * assert_eq!(snapshot.blocks.len(), 2);
 * assert_eq!(editor.to_markdown(), "# Hello\n\npara one\npara two\n");
 * ```
 */

pub mod commands;
pub mod document;
pub mod editor;
pub mod events;
pub mod ids;
pub mod patch;
pub mod selection;
pub mod snapshot;

pub use commands::{BulkAction, BulkError};
pub use document::{Block, Document, ModelError};
pub use editor::{Editor, EditorError};
pub use events::{InputEvent, Modifiers};
pub use ids::BlockId;
pub use patch::{Change, Patch};
pub use selection::{Selection, SelectionEngine, SelectionSnapshot};
pub use snapshot::{RenderBlock, Snapshot};
