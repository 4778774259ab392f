//! Syntax highlighting for the editor surface.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.
//! Language identifiers come from the panel's selector; anything syntect
//! cannot resolve is rendered as plain text.

use std::sync::OnceLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::file::Language;
use crate::theme::EditorTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

/// Highlight `code` as `language` for the given surface theme.
///
/// Returns one [`Line`] per source line. Unknown languages and `plaintext`
/// produce uncolored spans.
pub fn highlight_code(language: &str, code: &str, theme: EditorTheme) -> Vec<Line<'static>> {
    let syntax_set = syntax_set();
    let Some(syntax) = find_syntax(syntax_set, language) else {
        return code.split('\n').map(|line| Line::raw(line.to_string())).collect();
    };

    let mut highlighter = HighlightLines::new(syntax, syntect_theme(theme));
    code.split('\n')
        .map(|line| {
            // Newline-aware syntaxes need the terminator to track state across lines.
            let with_newline = format!("{line}\n");
            let ranges = highlighter
                .highlight_line(&with_newline, syntax_set)
                .unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches('\n');
                    if text.is_empty() {
                        return None;
                    }
                    let fg = adjust_fg_for_theme(
                        Rgb {
                            r: style.foreground.r,
                            g: style.foreground.g,
                            b: style.foreground.b,
                        },
                        theme,
                    );
                    Some(Span::styled(
                        text.to_string(),
                        Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                    ))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Whether `language` gets colored output.
pub fn is_highlighted(language: &str) -> bool {
    find_syntax(syntax_set(), language).is_some()
}

/// Load syntax definitions and both themes ahead of first use.
pub fn warm_up() {
    let _ = syntax_set();
    let _ = syntect_theme(EditorTheme::Light);
    let _ = syntect_theme(EditorTheme::Dark);
}

/// Syntect token for a selector language. `None` means plain text.
const fn syntax_token(language: Language) -> Option<&'static str> {
    match language {
        Language::PlainText => None,
        // The bundled syntaxes have no TypeScript; JavaScript is the closest.
        Language::JavaScript | Language::TypeScript => Some("js"),
        Language::Python => Some("py"),
        Language::Java => Some("java"),
        Language::CSharp => Some("cs"),
        Language::Cpp => Some("cpp"),
        Language::Html => Some("html"),
        Language::Css => Some("css"),
        Language::Json => Some("json"),
        Language::Markdown => Some("md"),
        Language::Yaml => Some("yaml"),
        Language::Xml => Some("xml"),
        Language::Sql => Some("sql"),
        Language::Shell => Some("sh"),
        Language::Go => Some("go"),
        Language::Rust => Some("rs"),
        Language::Php => Some("php"),
        Language::Ruby => Some("rb"),
    }
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, language: &str) -> Option<&'a SyntaxReference> {
    let token = syntax_token(Language::from_id(language)?)?;
    syntax_set.find_syntax_by_token(token)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("loading default syntax set");
        SyntaxSet::load_defaults_newlines()
    })
}

fn syntect_theme(theme: EditorTheme) -> &'static Theme {
    static LIGHT: OnceLock<Theme> = OnceLock::new();
    static DARK: OnceLock<Theme> = OnceLock::new();
    let cell = match theme {
        EditorTheme::Light => &LIGHT,
        EditorTheme::Dark => &DARK,
    };
    cell.get_or_init(|| load_theme(theme))
}

fn load_theme(theme: EditorTheme) -> Theme {
    let theme_set = ThemeSet::load_defaults();
    let preferred = match theme {
        EditorTheme::Dark => [
            "base16-ocean.dark",
            "base16-eighties.dark",
            "base16-mocha.dark",
        ]
        .as_slice(),
        EditorTheme::Light => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"].as_slice(),
    };

    for name in preferred {
        if let Some(found) = theme_set.themes.get(*name) {
            tracing::debug!(theme = *name, "loaded highlight theme");
            return found.clone();
        }
    }

    theme_set
        .themes
        .values()
        .next()
        .cloned()
        .unwrap_or_default()
}

fn adjust_fg_for_theme(color: Rgb, theme: EditorTheme) -> Rgb {
    match theme {
        EditorTheme::Dark => color,
        EditorTheme::Light => {
            let luma = 0.0722f32.mul_add(
                f32::from(color.b),
                0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
            );
            if luma < 155.0 {
                return color;
            }

            let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
            Rgb {
                r: darken(color.r),
                g: darken(color.g),
                b: darken(color.b),
            }
        }
    }
}
