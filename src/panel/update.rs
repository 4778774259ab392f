use crate::file::{FileRecord, Language};

use super::model::PanelModel;

/// Everything that can change the panel's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // File record
    /// The surface reported new text. `None` arrives during teardown.
    ContentChanged(Option<String>),
    /// Language chosen in the selector
    ChangeLanguage(Language),
    /// Replace the record with a fresh untitled file
    NewFile,

    // Language selector
    /// Open the language list, highlighting the current language
    OpenLanguagePicker,
    /// Move the highlight up
    PickerUp,
    /// Move the highlight down
    PickerDown,
    /// Commit the highlighted language
    PickerCommit,
    /// Close without changing the language
    PickerCancel,
}

impl Message {
    /// Whether this message replaces or mutates the file record.
    ///
    /// Such messages are followed by a settings write.
    pub const fn mutates_file(&self) -> bool {
        matches!(
            self,
            Self::ContentChanged(Some(_))
                | Self::ChangeLanguage(_)
                | Self::NewFile
                | Self::PickerCommit
        )
    }
}

/// Pure state transition for the panel.
pub fn update(mut model: PanelModel, msg: Message) -> PanelModel {
    match msg {
        Message::ContentChanged(Some(content)) => {
            model.file.content = content;
        }
        Message::ContentChanged(None) => {}
        Message::ChangeLanguage(language) => {
            model.file.language = language.id().to_string();
        }
        Message::NewFile => {
            model.file = FileRecord::default();
        }
        Message::OpenLanguagePicker => {
            let current = model.file.known_language().unwrap_or(Language::PlainText);
            model.picker = Some(current.index());
        }
        Message::PickerUp => {
            if let Some(idx) = model.picker.as_mut() {
                *idx = idx.saturating_sub(1);
            }
        }
        Message::PickerDown => {
            if let Some(idx) = model.picker.as_mut() {
                *idx = (*idx + 1).min(Language::ALL.len() - 1);
            }
        }
        Message::PickerCommit => {
            if let Some(language) = model.picker.take().and_then(|idx| Language::ALL.get(idx)) {
                model.file.language = language.id().to_string();
            }
        }
        Message::PickerCancel => {
            model.picker = None;
        }
    }
    model
}
