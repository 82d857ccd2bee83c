use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// What a fence-looking line carries: delimiter kind, run length and info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
    pub info: String,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Detects a fence delimiter line (opener or closer).
    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = super::strip_indent(line.trim_end_matches(['\r', '\n']))?;
        let kind = match t.chars().next()? {
            '`' => FenceKind::Backticks,
            '~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.chars().take_while(|&c| c == kind.marker()).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = t[len..].trim();
        // Backtick info strings may not contain backticks.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            len,
            info: info.to_string(),
        })
    }

    /// A closer uses the opener's character, is at least as long and has no info string.
    pub fn closes(open: &FenceSig, sig: Option<&FenceSig>) -> bool {
        matches!(sig, Some(s) if s.kind == open.kind && s.len >= open.len && s.info.is_empty())
    }

    /// The language token: first word of the info string, empty if absent.
    pub fn language(info: &str) -> &str {
        info.split_whitespace().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        let sig = CodeFence::sig("```rust").unwrap();
        assert_eq!(sig.kind, FenceKind::Backticks);
        assert_eq!(sig.len, 3);
        assert_eq!(sig.info, "rust");
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::sig("~~~~").unwrap().kind, FenceKind::Tildes);
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("``not enough"), None);
        assert_eq!(CodeFence::sig("    ```"), None);
    }

    #[test]
    fn backtick_info_cannot_hold_backticks() {
        assert_eq!(CodeFence::sig("``` a`b"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let open = CodeFence::sig("````").unwrap();
        assert!(CodeFence::closes(&open, CodeFence::sig("````").as_ref()));
        assert!(CodeFence::closes(&open, CodeFence::sig("`````").as_ref()));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let open = CodeFence::sig("````").unwrap();
        assert!(!CodeFence::closes(&open, CodeFence::sig("```").as_ref()));
        assert!(!CodeFence::closes(&open, CodeFence::sig("~~~~").as_ref()));
        assert!(!CodeFence::closes(&open, CodeFence::sig("````js").as_ref()));
        assert!(!CodeFence::closes(&open, None));
    }

    #[test]
    fn language_is_first_info_word() {
        assert_eq!(CodeFence::language("rust ignore"), "rust");
        assert_eq!(CodeFence::language(""), "");
    }
}
