use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys the typing editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorKey {
    Char(char),
    Space,
    /// Erase the character before the cursor.
    Backspace,
    /// Erase the whole buffer.
    ClearLine,
    Left,
    Right,
    #[default]
    Other,
}

impl From<KeyEvent> for EditorKey {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Backspace if ctrl || alt => EditorKey::ClearLine,
            KeyCode::Backspace => EditorKey::Backspace,
            // Some terminals deliver the secondary backspace as ^H
            KeyCode::Char('h') | KeyCode::Char('u') if ctrl => EditorKey::ClearLine,
            KeyCode::Char(_) if ctrl || alt => EditorKey::Other,
            KeyCode::Char(' ') => EditorKey::Space,
            KeyCode::Char(c) => EditorKey::Char(c),
            KeyCode::Left => EditorKey::Left,
            KeyCode::Right => EditorKey::Right,
            _ => EditorKey::Other,
        }
    }
}

/// Event sent from the editor to the prompt renderer for every keystroke.
/// `buffer` is the input as it stood right after the local edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyStroke {
    pub key: EditorKey,
    pub buffer: String,
}

/// Single-line editable input with a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Text in front of the cursor, used to place the terminal caret.
    pub fn before_cursor(&self) -> String {
        self.chars[..self.cursor].iter().collect()
    }

    /// Apply the local effect of a key. Returns `true` if the buffer changed.
    pub fn apply(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Char(c) => {
                self.insert(c);
                true
            }
            EditorKey::Space => {
                self.insert(' ');
                true
            }
            EditorKey::Backspace => self.backspace(),
            EditorKey::ClearLine => {
                let changed = !self.chars.is_empty();
                self.clear();
                changed
            }
            EditorKey::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            EditorKey::Right => {
                if self.cursor < self.chars.len() {
                    self.cursor += 1;
                }
                false
            }
            EditorKey::Other => false,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.chars.remove(self.cursor - 1);
        self.cursor -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Drop a word the prompt renderer confirmed. `confirmed` is the buffer
    /// snapshot carried by the accepted Space keystroke; anything typed after
    /// it stays in the buffer. If the buffer no longer starts with the
    /// snapshot it is cleared.
    pub fn consume_confirmed(&mut self, confirmed: &str) {
        let confirmed: Vec<char> = confirmed.chars().collect();
        if self.chars.starts_with(&confirmed) {
            self.chars.drain(..confirmed.len());
            self.cursor = self.cursor.saturating_sub(confirmed.len());
        } else {
            self.clear();
        }
    }
}
