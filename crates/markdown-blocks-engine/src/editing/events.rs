use serde::Serialize;

use super::BlockId;

/// The input events the selection engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputEvent {
    PlainClick(BlockId),
    /// Click with the toggle modifier (Ctrl/Cmd) held
    ToggleClick(BlockId),
    /// Click with Shift held
    RangeClick(BlockId),
    SelectAll,
    Escape,
    Delete,
}

/// Modifier keys held during a pointer click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub toggle: bool,
}

impl InputEvent {
    /// Maps a click on `id` to a click event. Shift wins over toggle.
    pub fn from_pointer(id: BlockId, modifiers: Modifiers) -> Self {
        if modifiers.shift {
            InputEvent::RangeClick(id)
        } else if modifiers.toggle {
            InputEvent::ToggleClick(id)
        } else {
            InputEvent::PlainClick(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, InputEvent::PlainClick(BlockId(7)))]
    #[case(false, true, InputEvent::ToggleClick(BlockId(7)))]
    #[case(true, false, InputEvent::RangeClick(BlockId(7)))]
    #[case(true, true, InputEvent::RangeClick(BlockId(7)))]
    fn pointer_modifiers(#[case] shift: bool, #[case] toggle: bool, #[case] expected: InputEvent) {
        let event = InputEvent::from_pointer(BlockId(7), Modifiers { shift, toggle });
        assert_eq!(event, expected);
    }
}
