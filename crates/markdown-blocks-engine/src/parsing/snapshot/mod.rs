//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: converts parsed blocks to a stable, serializable `Snap`
//!   with a one-line-per-block summary for inline `insta` snapshots
//! - **`invariants`**: runtime checks for parser correctness (line ranges in
//!   bounds and ordered, table rows checked against the header, fence pairing
//!   reflected in the malformed flag)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, Snap, normalize};
