//! The file record edited by the panel and the languages it can select.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display name given to a fresh, unsaved file.
pub const DEFAULT_FILE_NAME: &str = "untitled.txt";

/// The single file open in an editor panel.
///
/// `content` is always the complete text; there is no diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Host-assigned identifier, present once the host has persisted the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub content: String,
    /// Language identifier. Values outside [`Language::ALL`] are kept as-is
    /// and rendered as plain text.
    pub language: String,
    /// Keys the host stored alongside the record. Kept across writes so the
    /// panel never strips fields it does not understand.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    /// Whether the host has persisted this file.
    pub const fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Length of the content in UTF-16 code units, the unit the toolbar
    /// counter has always reported.
    pub fn char_count(&self) -> usize {
        self.content.encode_utf16().count()
    }

    /// Number of lines. Empty content still has one line.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// The selector entry matching `language`, if it is a known one.
    pub fn known_language(&self) -> Option<Language> {
        Language::from_id(&self.language)
    }
}

impl Default for FileRecord {
    fn default() -> Self {
        Self {
            id: None,
            name: DEFAULT_FILE_NAME.to_string(),
            content: String::new(),
            language: Language::PlainText.id().to_string(),
            extra: Map::new(),
        }
    }
}

/// Languages offered by the language selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    PlainText,
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Html,
    Css,
    Json,
    Markdown,
    Yaml,
    Xml,
    Sql,
    Shell,
    Go,
    Rust,
    Php,
    Ruby,
}

impl Language {
    pub const ALL: [Self; 19] = [
        Self::PlainText,
        Self::JavaScript,
        Self::TypeScript,
        Self::Python,
        Self::Java,
        Self::CSharp,
        Self::Cpp,
        Self::Html,
        Self::Css,
        Self::Json,
        Self::Markdown,
        Self::Yaml,
        Self::Xml,
        Self::Sql,
        Self::Shell,
        Self::Go,
        Self::Rust,
        Self::Php,
        Self::Ruby,
    ];

    /// Identifier stored in [`FileRecord::language`].
    pub const fn id(self) -> &'static str {
        match self {
            Self::PlainText => "plaintext",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::CSharp => "csharp",
            Self::Cpp => "cpp",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Sql => "sql",
            Self::Shell => "shell",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Ruby => "ruby",
        }
    }

    /// Human-readable label shown in the selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlainText => "Plain Text",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::CSharp => "C#",
            Self::Cpp => "C++",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::Sql => "SQL",
            Self::Shell => "Shell",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.id() == id)
    }

    /// Position of this language in [`Language::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|lang| *lang == self)
            .unwrap_or_default()
    }
}
