//! # Block Parsing
//!
//! Three-phase, line-oriented block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts only: its priority-ordered `LineKind`
//!    plus the table-row and table-separator flags.
//!
//! 2. **Segmentation** (`builder`, `segmenter`): a `BlockBuilder` state
//!    machine with one line of lookahead turns classified lines into
//!    `RawSpan`s (line ranges plus a kind). `Segmenter` drives it lazily.
//!
//! 3. **Enrichment** (`enrich`): `BlockClassifier` turns each `RawSpan` into
//!    a `BlockContent` with structured data (table cells, code language,
//!    list items, heading level).
//!
//! ## Modules
//!
//! - **`types`**: `BlockKind`, `RawSpan`
//! - **`kinds`**: per-syntax knowledge (fences, headings, rules, tables, quotes, lists, embeds)
//! - **`content`**: `BlockContent` and its per-kind `BlockData`
//!
//! ## Key Invariants
//!
//! - Priority: fence > heading > rule > embed > table (with separator) > quote > list > paragraph
//! - Fenced code blocks are raw zones: nothing inside is classified
//! - Content is never dropped; structural problems only set `malformed`

pub mod builder;
pub mod classify;
pub mod content;
pub mod enrich;
pub mod kinds;
pub mod segmenter;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineKind, MarkdownLineClassifier};
pub use content::{BlockContent, BlockData, CodeBlock, Quote};
pub use enrich::BlockClassifier;
pub use segmenter::{Segmenter, Segments};
pub use types::{BlockKind, RawSpan};
