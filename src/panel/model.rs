use crate::file::FileRecord;

/// State owned by one editor panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelModel {
    /// The open file
    pub file: FileRecord,
    /// Highlighted row of the language selector while it is open
    pub picker: Option<usize>,
}

impl PanelModel {
    pub fn new(file: FileRecord) -> Self {
        Self { file, picker: None }
    }

    pub const fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    /// Snapshot of what the toolbar shows.
    pub fn toolbar(&self) -> ToolbarView {
        ToolbarView {
            name: self.file.name.clone(),
            saved: self.file.is_saved(),
            language_label: self
                .file
                .known_language()
                .map_or_else(|| self.file.language.clone(), |lang| lang.label().to_string()),
            char_count: self.file.char_count(),
            line_count: self.file.line_count(),
        }
    }
}

/// Toolbar contents derived from the file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub name: String,
    /// The host has persisted the file
    pub saved: bool,
    pub language_label: String,
    pub char_count: usize,
    pub line_count: usize,
}

impl ToolbarView {
    /// Counter text, e.g. `11 chars • 2 lines`.
    pub fn counters(&self) -> String {
        format!("{} chars • {} lines", self.char_count, self.line_count)
    }
}

