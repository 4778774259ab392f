use std::borrow::Cow;

use ropey::Rope;

/// Line and column of the caret. Both are zero-based; `col` counts chars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
///
/// The buffer, the highlighter and the record counters all split lines on
/// `\n` alone, so text is normalized before it enters the buffer.
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Rope-backed text with a single caret.
///
/// The caret is a char index into the rope; line and column are derived from
/// it. Every text mutation bumps [`TextBuffer::revision`], which the surface
/// uses to decide whether a change event is due.
pub struct TextBuffer {
    rope: Rope,
    caret: usize,
    /// Column kept across vertical moves through shorter lines
    goal_col: Option<usize>,
    revision: u64,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_breaks(text)),
            caret: 0,
            goal_col: None,
            revision: 0,
        }
    }

    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.caret);
        Cursor {
            line,
            col: self.caret - self.rope.line_to_char(line),
        }
    }

    /// Number of text mutations applied so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut line = self.rope.line(line_idx).to_string();
        if line.ends_with('\n') {
            line.pop();
        }
        Some(line)
    }

    /// Length of a line in chars, without its line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole text, keeping the caret's line and column where they
    /// still fit.
    ///
    /// Returns `false` without touching anything when `text` is already the
    /// buffer's content.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = normalize_line_breaks(text);
        if self.rope == text {
            return false;
        }
        let Cursor { line, col } = self.cursor();
        self.rope = Rope::from_str(&text);
        self.revision += 1;
        self.move_to(line, col);
        true
    }

    pub fn insert_char(&mut self, ch: char) {
        let ch = if ch == '\r' { '\n' } else { ch };
        self.rope.insert_char(self.caret, ch);
        self.caret += 1;
        self.edited();
    }

    /// Insert `text` at the caret, leaving the caret after it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = normalize_line_breaks(text);
        self.rope.insert(self.caret, &text);
        self.caret += text.chars().count();
        self.edited();
    }

    /// Insert spaces up to the next multiple of `tab_size` columns.
    pub fn insert_tab(&mut self, tab_size: usize) {
        let tab_size = tab_size.max(1);
        let pad = tab_size - self.cursor().col % tab_size;
        self.insert_str(&" ".repeat(pad));
    }

    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the char before the caret. Returns `true` if one was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.rope.remove(self.caret - 1..self.caret);
        self.caret -= 1;
        self.edited();
        true
    }

    /// Delete the char under the caret. Returns `true` if one was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.caret..=self.caret);
        self.edited();
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.jump(self.caret.saturating_sub(1)),
            Direction::Right => self.jump(self.caret + 1),
            Direction::Up => {
                let line = self.cursor().line;
                if line > 0 {
                    self.move_vertically(line - 1);
                }
            }
            Direction::Down => {
                let line = self.cursor().line;
                if line + 1 < self.line_count() {
                    self.move_vertically(line + 1);
                }
            }
        }
    }

    pub fn move_home(&mut self) {
        let line = self.cursor().line;
        self.jump(self.rope.line_to_char(line));
    }

    pub fn move_end(&mut self) {
        let line = self.cursor().line;
        self.jump(self.rope.line_to_char(line) + self.line_len(line));
    }

    /// Move to the start of the previous word. At a line start this steps to
    /// the end of the line above.
    pub fn move_word_left(&mut self) {
        let Cursor { line, col } = self.cursor();
        if col == 0 {
            self.move_cursor(Direction::Left);
            return;
        }
        let chars: Vec<char> = self.rope.line(line).chars().take(col).collect();
        let mut i = chars.len();
        while i > 0 && chars[i - 1].is_whitespace() {
            i -= 1;
        }
        let word_end = i;
        while i > 0 && is_word_char(chars[i - 1]) {
            i -= 1;
        }
        // A run of punctuation counts as a word of its own.
        if i == word_end {
            while i > 0 && !is_word_char(chars[i - 1]) && !chars[i - 1].is_whitespace() {
                i -= 1;
            }
        }
        self.jump(self.caret - (col - i));
    }

    /// Move past the current word and the gap after it. At a line end this
    /// steps to the start of the next line.
    pub fn move_word_right(&mut self) {
        let Cursor { line, col } = self.cursor();
        let len = self.line_len(line);
        if col >= len {
            self.move_cursor(Direction::Right);
            return;
        }
        let rest: Vec<char> = self.rope.line(line).chars().skip(col).take(len - col).collect();
        let mut i = 0;
        while i < rest.len() && is_word_char(rest[i]) {
            i += 1;
        }
        while i < rest.len() && !is_word_char(rest[i]) {
            i += 1;
        }
        self.jump(self.caret + i);
    }

    /// Move to `line` and `col`, both clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let col = col.min(self.line_len(line));
        self.jump(self.rope.line_to_char(line) + col);
    }

    pub fn move_to_start(&mut self) {
        self.jump(0);
    }

    pub fn move_to_end(&mut self) {
        self.jump(self.rope.len_chars());
    }

    fn jump(&mut self, caret: usize) {
        self.caret = caret.min(self.rope.len_chars());
        self.goal_col = None;
    }

    fn move_vertically(&mut self, target_line: usize) {
        let goal = self.goal_col.unwrap_or_else(|| self.cursor().col);
        let col = goal.min(self.line_len(target_line));
        self.caret = self.rope.line_to_char(target_line) + col;
        self.goal_col = Some(goal);
    }

    fn edited(&mut self) {
        self.goal_col = None;
        self.revision += 1;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn at(line: usize, col: usize) -> Cursor {
        Cursor { line, col }
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let buf = TextBuffer::default();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), at(0, 0));
    }

    #[test]
    fn test_trailing_newline_counts_extra_line() {
        let buf = TextBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1).as_deref(), Some(""));
        assert_eq!(buf.line_at(2), None);
    }

    #[test]
    fn test_carriage_returns_become_newlines() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize_line_breaks("plain"), Cow::Borrowed(_)));

        let buf = TextBuffer::from_text("one\r\ntwo\rthree");
        assert_eq!(buf.text(), "one\ntwo\nthree");
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_insert_bumps_revision() {
        let mut buf = TextBuffer::default();
        buf.insert_char('a');
        buf.insert_str("bc");
        assert_eq!(buf.revision(), 2);
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = TextBuffer::from_text("hllo");
        buf.move_to(0, 1);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), at(0, 2));
    }

    #[test]
    fn test_split_line() {
        let mut buf = TextBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.split_line();
        assert_eq!(buf.text(), "a\nb");
        assert_eq!(buf.cursor(), at(1, 0));
    }

    #[test]
    fn test_columns_count_chars() {
        let mut buf = TextBuffer::default();
        buf.insert_str("é😀");
        assert_eq!(buf.cursor(), at(0, 2));
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "é");
        assert_eq!(buf.cursor(), at(0, 1));
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor() {
        let mut buf = TextBuffer::default();
        buf.insert_str("hello\nworld");
        assert_eq!(buf.cursor(), at(1, 5));
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_insert_str_with_lone_carriage_return() {
        let mut buf = TextBuffer::default();
        buf.insert_str("a\rb");
        assert_eq!(buf.text(), "a\nb");
        assert_eq!(buf.cursor(), at(1, 1));
        assert!(buf.delete_back());
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.cursor(), at(0, 1));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = TextBuffer::from_text("x");
        buf.insert_str("");
        assert_eq!(buf.revision(), 0);
    }

    #[test]
    fn test_insert_tab_pads_to_next_stop() {
        let mut buf = TextBuffer::default();
        buf.insert_tab(2);
        assert_eq!(buf.text(), "  ");
        buf.insert_char('x');
        buf.insert_tab(2);
        assert_eq!(buf.text(), "  x ");
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = TextBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.revision(), 0);
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), at(0, 5));
    }

    #[test]
    fn test_delete_forward() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_set_text_same_content_is_noop() {
        let mut buf = TextBuffer::from_text("same");
        assert!(!buf.set_text("same"));
        assert_eq!(buf.revision(), 0);
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(1, 4);
        assert!(buf.set_text("hi"));
        assert_eq!(buf.cursor(), at(0, 2));
        assert_eq!(buf.revision(), 1);
    }

    #[test]
    fn test_move_wraps_between_lines() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), at(0, 5));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), at(1, 0));
    }

    #[test]
    fn test_goal_column_across_short_line() {
        let mut buf = TextBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), at(1, 2));
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), at(2, 4));
    }

    #[test]
    fn test_goal_column_reset_by_edit() {
        let mut buf = TextBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        buf.insert_char('!');
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), at(2, 3));
    }

    #[test]
    fn test_word_motion() {
        let mut buf = TextBuffer::from_text("let value = 1;");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 4);
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 13);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 12);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 10);
    }

    #[test]
    fn test_word_motion_crosses_lines() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_end();
        buf.move_word_right();
        assert_eq!(buf.cursor(), at(1, 0));
        buf.move_word_left();
        assert_eq!(buf.cursor(), at(0, 2));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = TextBuffer::from_text("one\ntwo\nthree");
        buf.move_to_end();
        assert_eq!(buf.cursor(), at(2, 5));
        buf.move_home();
        assert_eq!(buf.cursor(), at(2, 0));
        buf.move_to_start();
        assert_eq!(buf.cursor(), at(0, 0));
    }
}
