use anyhow::Result;
use markdown_blocks_config::Config;
use markdown_blocks_engine::{
    BlockId, Editor, InputEvent, Modifiers, Patch, io, parsing::blocks::BlockKind,
};
use ratatui::{layout::Rect, widgets::ListState};
use relative_path::RelativePathBuf;

use crate::keys::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Files,
    Blocks,
}

pub struct App {
    pub config: Config,
    pub files: Vec<RelativePathBuf>,
    pub file_list_state: ListState,
    pub open_file: Option<RelativePathBuf>,
    pub editor: Editor,
    /// Cursor over the blocks pane; independent of the selection
    pub block_list_state: ListState,
    pub pane: Pane,
    pub status: String,
    pub dirty: bool,
    /// Where the blocks list was last drawn, for mouse hit testing
    pub blocks_area: Rect,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let files: Vec<RelativePathBuf> = io::scan_markdown_files(&config.notes_path)?
            .into_iter()
            .filter(|f| !config.is_excluded(f.as_str()))
            .collect();

        let mut app = Self {
            editor: Editor::new(config.parser),
            config,
            files,
            file_list_state: ListState::default(),
            open_file: None,
            block_list_state: ListState::default(),
            pane: Pane::Files,
            status: String::new(),
            dirty: false,
            blocks_area: Rect::default(),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.open_selected_file();
        }

        Ok(app)
    }

    /// Applies one action. Returns false when the app should exit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::SwitchPane => {
                self.pane = match self.pane {
                    Pane::Files => Pane::Blocks,
                    Pane::Blocks => Pane::Files,
                };
            }
            Action::Save => self.save(),
            Action::Reload => self.reload(),
            _ if self.pane == Pane::Files => self.apply_files(action),
            _ => self.apply_blocks(action),
        }
        true
    }

    fn apply_files(&mut self, action: Action) {
        match action {
            Action::Up => self.step_file(false),
            Action::Down => self.step_file(true),
            Action::Activate => {
                self.open_selected_file();
                self.pane = Pane::Blocks;
            }
            _ => {}
        }
    }

    fn apply_blocks(&mut self, action: Action) {
        match action {
            Action::Up => self.step_cursor(false),
            Action::Down => self.step_cursor(true),
            Action::ExtendUp => {
                self.step_cursor(false);
                self.send_at_cursor(InputEvent::RangeClick);
            }
            Action::ExtendDown => {
                self.step_cursor(true);
                self.send_at_cursor(InputEvent::RangeClick);
            }
            Action::Activate => self.send_at_cursor(InputEvent::PlainClick),
            Action::Toggle => self.send_at_cursor(InputEvent::ToggleClick),
            Action::SelectAll => {
                self.editor.handle(InputEvent::SelectAll);
            }
            Action::Escape => {
                self.editor.handle(InputEvent::Escape);
            }
            Action::Delete => {
                let patch = self.editor.handle(InputEvent::Delete);
                self.after_mutation("deleted", &patch);
            }
            Action::Duplicate => {
                let patch = self.editor.duplicate_selected();
                self.after_mutation("duplicated", &patch);
            }
            Action::Merge => {
                let patch = self.editor.merge_selected();
                self.after_mutation("merged", &patch);
            }
            Action::Quit | Action::SwitchPane | Action::Save | Action::Reload => {}
        }
    }

    /// Mouse click at a terminal cell; clicks outside the blocks list are ignored.
    pub fn click(&mut self, column: u16, row: u16, modifiers: Modifiers) {
        let area = self.blocks_area;
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row > area.y
            && row < area.y + area.height.saturating_sub(1);
        if !inside {
            return;
        }

        let index = self.block_list_state.offset() + usize::from(row - area.y - 1);
        if let Some(id) = self.editor.ids().get(index).copied() {
            self.pane = Pane::Blocks;
            self.block_list_state.select(Some(index));
            self.editor.handle(InputEvent::from_pointer(id, modifiers));
        }
    }

    pub fn open_selected_file(&mut self) {
        let Some(path) = self
            .file_list_state
            .selected()
            .and_then(|i| self.files.get(i))
            .cloned()
        else {
            return;
        };
        self.load(path);
    }

    fn reload(&mut self) {
        if let Some(path) = self.open_file.clone() {
            self.load(path);
        }
    }

    fn load(&mut self, path: RelativePathBuf) {
        match self.editor.load_file(&path, &self.config.notes_path) {
            Ok(_) => {
                self.status = format!("{path}: {} blocks", self.editor.document().len());
                self.block_list_state
                    .select((!self.editor.document().is_empty()).then_some(0));
                self.open_file = Some(path);
                self.dirty = false;
            }
            Err(e) => {
                log::warn!("failed to load {path}: {e}");
                self.status = format!("Error loading {path}: {e}");
            }
        }
    }

    fn save(&mut self) {
        let Some(path) = self.open_file.as_ref() else {
            return;
        };
        match self.editor.save_file(path, &self.config.notes_path) {
            Ok(()) => {
                self.status = format!("saved {path}");
                self.dirty = false;
            }
            Err(e) => {
                log::warn!("failed to save {path}: {e}");
                self.status = format!("Error saving {path}: {e}");
            }
        }
    }

    fn step_file(&mut self, forward: bool) {
        if self.files.is_empty() {
            return;
        }
        let i = step(self.file_list_state.selected(), self.files.len(), forward);
        self.file_list_state.select(Some(i));
    }

    fn step_cursor(&mut self, forward: bool) {
        let len = self.editor.document().len();
        if len == 0 {
            return;
        }
        let i = step(self.block_list_state.selected(), len, forward);
        self.block_list_state.select(Some(i));
    }

    fn cursor_id(&self) -> Option<BlockId> {
        let i = self.block_list_state.selected()?;
        self.editor.ids().get(i).copied()
    }

    fn send_at_cursor(&mut self, event: fn(BlockId) -> InputEvent) {
        if let Some(id) = self.cursor_id() {
            self.editor.handle(event(id));
        }
    }

    fn after_mutation(&mut self, verb: &str, patch: &Patch) {
        if patch.is_empty() {
            return;
        }
        self.dirty = true;
        self.status = format!("{verb}: {} changes", patch.changes.len());

        let len = self.editor.document().len();
        let cursor = self.block_list_state.selected().unwrap_or(0);
        self.block_list_state
            .select((len > 0).then(|| cursor.min(len - 1)));
    }

    /// One-line label for a block in the blocks list.
    pub fn label(kind: BlockKind, level: Option<u8>, text: &str) -> String {
        let tag = match (kind, level) {
            (BlockKind::Heading, Some(level)) => format!("h{level}"),
            (BlockKind::Heading, None) => "h".to_string(),
            (BlockKind::Paragraph, _) => "p".to_string(),
            (BlockKind::Code, _) => "code".to_string(),
            (BlockKind::Blockquote, _) => ">".to_string(),
            (BlockKind::List, _) => "list".to_string(),
            (BlockKind::Table, _) => "table".to_string(),
            (BlockKind::ThematicBreak, _) => "hr".to_string(),
            (BlockKind::ComponentEmbed, _) => "embed".to_string(),
        };
        let first_line = text.lines().next().unwrap_or("");
        format!("{tag:>5} {first_line}")
    }
}

/// Next index in a wrapping list of `len` items.
fn step(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn app_with(files: &[(&str, &str)]) -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let app = App::new(Config::new(dir.path())).unwrap();
        (dir, app)
    }

    #[test]
    fn opens_first_file_on_start() {
        let (_dir, app) = app_with(&[("a.md", "# A\n\nbody\n"), ("b.md", "b\n")]);
        assert_eq!(app.open_file, Some(RelativePathBuf::from("a.md")));
        assert_eq!(app.editor.document().len(), 2);
        assert_eq!(app.block_list_state.selected(), Some(0));
    }

    #[test]
    fn extend_down_selects_range_from_cursor() {
        let (_dir, mut app) = app_with(&[("a.md", "one\n\ntwo\n\nthree\n")]);
        app.apply(Action::SwitchPane);
        app.apply(Action::Activate);
        app.apply(Action::ExtendDown);
        app.apply(Action::ExtendDown);
        assert_eq!(app.editor.selection().len(), 3);
    }

    #[test]
    fn delete_then_save_writes_file() {
        let (dir, mut app) = app_with(&[("a.md", "one\n\ntwo\n")]);
        app.apply(Action::SwitchPane);
        app.apply(Action::Activate);
        app.apply(Action::Delete);
        assert!(app.dirty);
        app.apply(Action::Save);
        assert!(!app.dirty);
        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), "two\n");
    }

    #[test]
    fn reload_discards_unsaved_changes() {
        let (_dir, mut app) = app_with(&[("a.md", "one\n\ntwo\n")]);
        app.apply(Action::SwitchPane);
        app.apply(Action::SelectAll);
        app.apply(Action::Duplicate);
        assert_eq!(app.editor.document().len(), 4);
        app.apply(Action::Reload);
        assert_eq!(app.editor.document().len(), 2);
        assert!(app.editor.selection().is_empty());
    }

    #[test]
    fn excluded_files_are_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.md"), "k\n").unwrap();
        fs::write(dir.path().join("skip.draft.md"), "s\n").unwrap();
        let mut config = Config::new(dir.path());
        config.exclude = vec!["*.draft.md".to_string()];

        let app = App::new(config).unwrap();
        assert_eq!(app.files, vec![RelativePathBuf::from("keep.md")]);
    }

    #[test]
    fn label_shows_kind_and_first_line() {
        assert_eq!(App::label(BlockKind::Heading, Some(2), "Intro"), "   h2 Intro");
        assert_eq!(App::label(BlockKind::Code, None, "fn a()\nfn b()"), " code fn a()");
    }
}
