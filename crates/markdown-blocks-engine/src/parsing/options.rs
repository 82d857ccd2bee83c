use serde::{Deserialize, Serialize};

/// What a blank line does inside a blockquote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteContinuation {
    /// A single blank line followed by another quote line continues the quote.
    #[default]
    BridgeBlank,
    /// Any blank line ends the quote.
    StopAtBlank,
}

/// Parser settings, loadable from the `[parser]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub quote_continuation: QuoteContinuation,
    /// Spaces per list nesting level; detected per list when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_indent: Option<usize>,
}
