/// Single-line text field with a character cursor.
#[derive(Debug, Default)]
pub struct InputField {
    value: String,
    cursor_col: usize,
    masked: bool,
}

impl InputField {
    pub fn new(value: &str) -> Self {
        let mut field = Self {
            value: value.to_string(),
            cursor_col: 0,
            masked: false,
        };
        field.move_end();
        field
    }

    /// Displays every character as `•`.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.len())
        } else {
            self.value.clone()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor_col
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let idx = self.byte_index(self.cursor_col);
        self.value.insert(idx, ch);
        self.cursor_col += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col == 0 {
            return;
        }
        let end = self.byte_index(self.cursor_col);
        let start = self.byte_index(self.cursor_col - 1);
        self.value.drain(start..end);
        self.cursor_col -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor_col >= self.len() {
            return;
        }
        let start = self.byte_index(self.cursor_col);
        let end = self.byte_index(self.cursor_col + 1);
        self.value.drain(start..end);
    }

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, column: usize) -> usize {
        self.value
            .char_indices()
            .nth(column)
            .map(|(idx, _)| idx)
            .unwrap_or_else(|| self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor_with_multibyte_text() {
        let mut field = InputField::new("Fotossíntese");
        assert_eq!(field.cursor(), 12);

        field.move_left();
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "Fotossíntse");
        field.insert_char('é');
        assert_eq!(field.value(), "Fotossíntése");

        field.move_home();
        field.delete();
        assert_eq!(field.value(), "otossíntése");
        field.backspace();
        assert_eq!(field.value(), "otossíntése");
    }

    #[test]
    fn ignores_control_characters() {
        let mut field = InputField::default();
        field.insert_char('\u{1b}');
        field.insert_char('a');
        assert_eq!(field.value(), "a");
    }

    #[test]
    fn masked_display_hides_value() {
        let field = InputField::new("AIza123").masked();
        assert_eq!(field.display(), "•••••••");
        assert_eq!(field.value(), "AIza123");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = InputField::new("ab");
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.delete();
        assert_eq!(field.value(), "ab");
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.backspace();
        assert_eq!(field.value(), "ab");
    }
}
