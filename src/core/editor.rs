//! Line editor
//!
//! Holds the line being typed and the history cursor, and turns key events
//! into buffer changes and terminal output. Editing is append-only: there is
//! no cursor movement inside the line.

use std::io::{self, Write};

use super::key::{is_valid_char, Key};
use crate::history::CommandHistory;
use crate::ui::LineRenderer;

/// What the input loop should do after a key was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Keep reading keys
    Continue,
    /// Enter was pressed; carries the raw line as typed
    Submit(String),
    /// An exit key was pressed
    Exit,
}

/// Input buffer plus history browsing position
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
    /// Index into history; `history.len()` means live input
    history_index: usize,
}

impl LineEditor {
    /// Create an editor positioned after the last history entry
    pub fn new(history_len: usize) -> Self {
        Self {
            buffer: String::new(),
            history_index: history_len,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Apply one key to the buffer and render the result
    pub fn handle_key<W: Write>(
        &mut self,
        key: Key,
        history: &CommandHistory,
        renderer: &mut LineRenderer<W>,
    ) -> io::Result<EditAction> {
        match key {
            key if key.is_exit() => return Ok(EditAction::Exit),
            Key::Char(ch) => {
                if self.insert(ch) {
                    renderer.echo(ch)?;
                }
            }
            Key::Space => {
                self.buffer.push(' ');
                renderer.echo(' ')?;
            }
            Key::Backspace => {
                self.backspace();
                renderer.redraw(&self.buffer)?;
            }
            Key::Up => {
                self.history_up(history);
                renderer.redraw(&self.buffer)?;
            }
            Key::Down => {
                self.history_down(history);
                renderer.redraw(&self.buffer)?;
            }
            Key::Enter => {
                renderer.newline()?;
                return Ok(EditAction::Submit(std::mem::take(&mut self.buffer)));
            }
            // Left/Right editing is not supported
            _ => {}
        }
        Ok(EditAction::Continue)
    }

    /// Append a character if it is in the valid set
    pub fn insert(&mut self, ch: char) -> bool {
        if !is_valid_char(ch) {
            return false;
        }
        self.buffer.push(ch);
        true
    }

    /// Remove the last character; no-op on an empty buffer
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Step to an older history entry
    pub fn history_up(&mut self, history: &CommandHistory) {
        self.history_index = self.history_index.min(history.len()).saturating_sub(1);
        self.load_history_entry(history);
    }

    /// Step to a newer history entry, ending on an empty live line
    pub fn history_down(&mut self, history: &CommandHistory) {
        if self.history_index < history.len() {
            self.history_index += 1;
        }
        self.load_history_entry(history);
    }

    fn load_history_entry(&mut self, history: &CommandHistory) {
        self.buffer.clear();
        if let Some(entry) = history.get(self.history_index) {
            self.buffer.push_str(entry);
        }
    }

    /// Empty the buffer and stop browsing history
    pub fn reset(&mut self, history_len: usize) {
        self.buffer.clear();
        self.history_index = history_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_LIMIT;

    fn history_of(entries: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::in_memory(HISTORY_LIMIT);
        for entry in entries {
            history.save(entry);
        }
        history
    }

    fn press(
        editor: &mut LineEditor,
        history: &CommandHistory,
        renderer: &mut LineRenderer<Vec<u8>>,
        keys: &[Key],
    ) -> Vec<EditAction> {
        keys.iter()
            .map(|key| editor.handle_key(*key, history, renderer).unwrap())
            .collect()
    }

    #[test]
    fn test_typing_builds_buffer_and_echoes() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(history.len());
        let mut renderer = LineRenderer::new(Vec::new());

        let keys = [Key::Char('g'), Key::Char('e'), Key::Char('t'), Key::Space, Key::Char('x')];
        let actions = press(&mut editor, &history, &mut renderer, &keys);

        assert!(actions.iter().all(|a| *a == EditAction::Continue));
        assert_eq!(editor.buffer(), "get x");
        assert_eq!(renderer.into_inner(), b"get x");
        assert!(history.is_empty());
    }

    #[test]
    fn test_invalid_chars_are_ignored() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(0);
        let mut renderer = LineRenderer::new(Vec::new());

        let keys = [Key::Char('a'), Key::Char('~'), Key::Char('\u{e9}'), Key::Other, Key::Left];
        press(&mut editor, &history, &mut renderer, &keys);

        assert_eq!(editor.buffer(), "a");
        assert_eq!(renderer.into_inner(), b"a");
    }

    #[test]
    fn test_backspace_on_empty_buffer() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(0);
        let mut renderer = LineRenderer::new(Vec::new());

        press(&mut editor, &history, &mut renderer, &[Key::Char('a'), Key::Backspace, Key::Backspace]);
        assert_eq!(editor.buffer(), "");

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.ends_with("\x1b[2K\x1b[1G> "));
    }

    #[test]
    fn test_history_navigation() {
        let history = history_of(&["a", "b", "c"]);
        let mut editor = LineEditor::new(history.len());
        let mut renderer = LineRenderer::new(Vec::new());

        editor.handle_key(Key::Up, &history, &mut renderer).unwrap();
        assert_eq!(editor.buffer(), "c");
        editor.handle_key(Key::Up, &history, &mut renderer).unwrap();
        assert_eq!(editor.buffer(), "b");
        editor.handle_key(Key::Down, &history, &mut renderer).unwrap();
        assert_eq!(editor.buffer(), "c");
        editor.handle_key(Key::Down, &history, &mut renderer).unwrap();
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.history_index(), 3);

        // Ceiling holds
        editor.handle_key(Key::Down, &history, &mut renderer).unwrap();
        assert_eq!(editor.history_index(), 3);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("> c"));
        assert!(out.contains("> b"));
    }

    #[test]
    fn test_history_up_floors_at_oldest() {
        let history = history_of(&["a", "b"]);
        let mut editor = LineEditor::new(history.len());

        for _ in 0..5 {
            editor.history_up(&history);
        }
        assert_eq!(editor.history_index(), 0);
        assert_eq!(editor.buffer(), "a");
    }

    #[test]
    fn test_history_up_with_empty_history() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(0);
        editor.history_up(&history);
        assert_eq!(editor.history_index(), 0);
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn test_enter_takes_buffer() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(0);
        let mut renderer = LineRenderer::new(Vec::new());

        press(&mut editor, &history, &mut renderer, &[Key::Char('h'), Key::Char('i')]);
        let action = editor.handle_key(Key::Enter, &history, &mut renderer).unwrap();

        assert_eq!(action, EditAction::Submit("hi".to_string()));
        assert_eq!(editor.buffer(), "");
        assert_eq!(renderer.into_inner(), b"hi\r\n");
    }

    #[test]
    fn test_exit_keys() {
        let history = history_of(&[]);
        let mut editor = LineEditor::new(0);
        let mut renderer = LineRenderer::new(Vec::new());

        for key in [Key::Esc, Key::CtrlC, Key::CtrlD] {
            assert_eq!(
                editor.handle_key(key, &history, &mut renderer).unwrap(),
                EditAction::Exit
            );
        }
    }
}
