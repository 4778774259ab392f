use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::{Direction, SurfaceEdit, normalize_line_breaks};

use super::model::PanelModel;
use super::update::Message;

/// Where a terminal event is routed inside the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelInput {
    /// Toolbar or selector action
    Panel(Message),
    /// Editing action forwarded to the surface
    Surface(SurfaceEdit),
}

/// Translate a terminal event into a panel input.
pub fn map_event(event: &Event, model: &PanelModel) -> Option<PanelInput> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(*key, model),
        Event::Paste(text) if !model.picker_open() => {
            let text = normalize_line_breaks(text).into_owned();
            Some(PanelInput::Surface(SurfaceEdit::InsertText(text)))
        }
        _ => None,
    }
}

fn map_key(key: KeyEvent, model: &PanelModel) -> Option<PanelInput> {
    if model.picker_open() {
        let msg = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Message::PickerUp,
            KeyCode::Down | KeyCode::Char('j') => Message::PickerDown,
            KeyCode::Enter => Message::PickerCommit,
            KeyCode::Esc => Message::PickerCancel,
            _ => return None,
        };
        return Some(PanelInput::Panel(msg));
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        return match key.code {
            KeyCode::Char('n') => Some(PanelInput::Panel(Message::NewFile)),
            KeyCode::Char('l') => Some(PanelInput::Panel(Message::OpenLanguagePicker)),
            KeyCode::Left => Some(PanelInput::Surface(SurfaceEdit::WordLeft)),
            KeyCode::Right => Some(PanelInput::Surface(SurfaceEdit::WordRight)),
            KeyCode::Home => Some(PanelInput::Surface(SurfaceEdit::ToStart)),
            KeyCode::End => Some(PanelInput::Surface(SurfaceEdit::ToEnd)),
            _ => None,
        };
    }

    let edit = match key.code {
        KeyCode::Char(ch) => SurfaceEdit::InsertChar(ch),
        KeyCode::Enter => SurfaceEdit::SplitLine,
        KeyCode::Tab => SurfaceEdit::InsertTab,
        KeyCode::Backspace => SurfaceEdit::DeleteBack,
        KeyCode::Delete => SurfaceEdit::DeleteForward,
        KeyCode::Left => SurfaceEdit::Move(Direction::Left),
        KeyCode::Right => SurfaceEdit::Move(Direction::Right),
        KeyCode::Up => SurfaceEdit::Move(Direction::Up),
        KeyCode::Down => SurfaceEdit::Move(Direction::Down),
        KeyCode::Home => SurfaceEdit::Home,
        KeyCode::End => SurfaceEdit::End,
        _ => return None,
    };
    Some(PanelInput::Surface(edit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_printable_char_inserts() {
        let model = PanelModel::default();
        assert_eq!(
            map_event(&key(KeyCode::Char('a')), &model),
            Some(PanelInput::Surface(SurfaceEdit::InsertChar('a')))
        );
    }

    #[test]
    fn test_ctrl_n_is_new_file() {
        let model = PanelModel::default();
        assert_eq!(
            map_event(&ctrl('n'), &model),
            Some(PanelInput::Panel(Message::NewFile))
        );
    }

    #[test]
    fn test_ctrl_l_opens_picker() {
        let model = PanelModel::default();
        assert_eq!(
            map_event(&ctrl('l'), &model),
            Some(PanelInput::Panel(Message::OpenLanguagePicker))
        );
    }

    #[test]
    fn test_unbound_ctrl_char_is_ignored() {
        let model = PanelModel::default();
        assert_eq!(map_event(&ctrl('q'), &model), None);
    }

    #[test]
    fn test_picker_captures_navigation() {
        let model = PanelModel {
            picker: Some(0),
            ..PanelModel::default()
        };
        assert_eq!(
            map_event(&key(KeyCode::Down), &model),
            Some(PanelInput::Panel(Message::PickerDown))
        );
        assert_eq!(
            map_event(&key(KeyCode::Enter), &model),
            Some(PanelInput::Panel(Message::PickerCommit))
        );
        assert_eq!(map_event(&key(KeyCode::Char('x')), &model), None);
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let model = PanelModel::default();
        assert_eq!(
            map_event(&Event::Paste("a\r\nb".to_string()), &model),
            Some(PanelInput::Surface(SurfaceEdit::InsertText("a\nb".to_string())))
        );
        assert_eq!(
            map_event(&Event::Paste("a\rb\r".to_string()), &model),
            Some(PanelInput::Surface(SurfaceEdit::InsertText("a\nb\n".to_string())))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let model = PanelModel::default();
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_event(&Event::Key(release), &model), None);
    }
}
