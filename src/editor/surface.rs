use super::buffer::{Direction, TextBuffer};
use super::options::SurfaceOptions;

/// Whether the surface can accept input yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Still loading; a placeholder is shown and input is dropped.
    Loading,
    Ready,
}

/// An editing action performed on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEdit {
    InsertChar(char),
    InsertText(String),
    InsertTab,
    SplitLine,
    DeleteBack,
    DeleteForward,
    Move(Direction),
    Home,
    End,
    WordLeft,
    WordRight,
    ToStart,
    ToEnd,
}

/// Change notification emitted by the surface.
///
/// Carries the complete text. `None` is emitted while the surface is being
/// torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceChange(pub Option<String>);

/// The editing surface embedded in the panel.
///
/// The surface owns its own buffer; the panel pushes a value in with
/// [`EditorSurface::set_value`] and receives the full text back as a
/// [`SurfaceChange`] after every edit.
#[derive(Debug)]
pub struct EditorSurface {
    buffer: TextBuffer,
    state: SurfaceState,
    options: SurfaceOptions,
    scroll_offset: usize,
}

impl EditorSurface {
    pub fn new(value: &str, options: SurfaceOptions) -> Self {
        Self {
            buffer: TextBuffer::from_text(value),
            state: SurfaceState::Loading,
            options,
            scroll_offset: 0,
        }
    }

    pub const fn state(&self) -> SurfaceState {
        self.state
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.state, SurfaceState::Ready)
    }

    /// Signal that loading finished and input is accepted.
    pub fn mark_ready(&mut self) {
        if !self.is_ready() {
            tracing::debug!("editor surface ready");
        }
        self.state = SurfaceState::Ready;
    }

    pub const fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current text of the surface.
    pub fn value(&self) -> String {
        self.buffer.text()
    }

    /// Make the surface show `value`. Does not emit a change.
    pub fn set_value(&mut self, value: &str) {
        self.buffer.set_text(value);
    }

    /// First visible screen row. With word wrap on, one line can span
    /// several rows.
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Apply `edit`, returning the change event when the text changed.
    ///
    /// Edits are dropped while the surface is loading.
    pub fn apply(&mut self, edit: SurfaceEdit) -> Option<SurfaceChange> {
        if !self.is_ready() {
            return None;
        }
        let before = self.buffer.revision();
        let buf = &mut self.buffer;
        match edit {
            SurfaceEdit::InsertChar(ch) => buf.insert_char(ch),
            SurfaceEdit::InsertText(text) => buf.insert_str(&text),
            SurfaceEdit::InsertTab => buf.insert_tab(self.options.tab_size),
            SurfaceEdit::SplitLine => buf.split_line(),
            SurfaceEdit::DeleteBack => {
                buf.delete_back();
            }
            SurfaceEdit::DeleteForward => {
                buf.delete_forward();
            }
            SurfaceEdit::Move(direction) => buf.move_cursor(direction),
            SurfaceEdit::Home => buf.move_home(),
            SurfaceEdit::End => buf.move_end(),
            SurfaceEdit::WordLeft => buf.move_word_left(),
            SurfaceEdit::WordRight => buf.move_word_right(),
            SurfaceEdit::ToStart => buf.move_to_start(),
            SurfaceEdit::ToEnd => buf.move_to_end(),
        }
        (self.buffer.revision() != before).then(|| SurfaceChange(Some(self.buffer.text())))
    }

    /// Scroll so screen row `row` is inside a viewport of `height` rows.
    pub fn ensure_row_visible(&mut self, row: usize, height: usize) {
        if height == 0 {
            return;
        }
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
    }

    /// Tear the surface down, back to the loading state.
    pub fn teardown(&mut self) -> SurfaceChange {
        self.state = SurfaceState::Loading;
        SurfaceChange(None)
    }
}
