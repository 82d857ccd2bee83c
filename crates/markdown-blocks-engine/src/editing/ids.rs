use std::fmt;

use serde::Serialize;

/// Stable identifier for a block.
///
/// Assigned once when content enters a [`Document`](super::Document) and
/// never reused within it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
