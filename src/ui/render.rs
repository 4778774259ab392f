use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::highlight::highlight_code;
use crate::panel::EditorPanel;

use super::style::Palette;
use super::{overlays, toolbar};

/// Text shown until the surface finishes loading.
pub const LOADING_TEXT: &str = "Loading editor...";

/// Render the complete panel: toolbar, surface and selector overlay.
pub fn render(panel: &mut EditorPanel, frame: &mut Frame, area: Rect) {
    let palette = Palette::for_theme(panel.theme());
    let [toolbar_area, editor_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    toolbar::render_toolbar(&panel.toolbar(), palette, frame, toolbar_area);

    if panel.surface().is_ready() {
        render_surface(panel, palette, frame, editor_area);
    } else {
        render_loading(palette, frame, editor_area);
    }

    if let Some(selected) = panel.model().picker {
        overlays::render_language_picker(selected, palette, frame, area);
    }
}

fn render_loading(palette: Palette, frame: &mut Frame, area: Rect) {
    let top_pad = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::raw("")).collect();
    lines.push(Line::styled(
        format!("◌ {LOADING_TEXT}"),
        Style::default().fg(palette.muted),
    ));
    let placeholder = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(palette.surface());
    frame.render_widget(placeholder, area);
}

fn render_surface(panel: &mut EditorPanel, palette: Palette, frame: &mut Frame, area: Rect) {
    let theme = panel.theme();
    let language = panel.file().language.clone();
    let visible_height = area.height as usize;

    let surface = panel.surface_mut();
    let buffer = surface.buffer();
    let cursor = buffer.cursor();
    let line_numbers = surface.options().line_numbers;
    let word_wrap = surface.options().word_wrap;
    let gutter_width = if line_numbers {
        line_number_width(buffer.line_count()) as usize
    } else {
        0
    };
    let text_width = if line_numbers {
        (area.width as usize).saturating_sub(gutter_width + 1)
    } else {
        area.width as usize
    };

    let highlighted = highlight_code(&language, &buffer.text(), theme);
    let mut rows: Vec<Line<'static>> = Vec::with_capacity(highlighted.len());
    let mut cursor_row = 0;
    for (idx, line) in highlighted.into_iter().enumerate() {
        let on_cursor_line = idx == cursor.line;
        let spans = if on_cursor_line {
            with_cursor(line.spans, cursor.col, palette.cursor())
        } else {
            line.spans
        };
        let (chunks, mark_row) = if word_wrap {
            wrap_spans(spans, text_width, on_cursor_line.then_some(cursor.col))
        } else {
            (vec![spans], 0)
        };
        if on_cursor_line {
            cursor_row = rows.len() + mark_row;
        }

        for (n, chunk) in chunks.into_iter().enumerate() {
            let mut row = Vec::with_capacity(chunk.len() + 1);
            if line_numbers {
                let label = if n == 0 {
                    format!("{:>gutter_width$} ", idx + 1)
                } else {
                    " ".repeat(gutter_width + 1)
                };
                row.push(Span::styled(label, Style::default().fg(palette.gutter)));
            }
            row.extend(chunk);
            rows.push(Line::from(row));
        }
    }

    surface.ensure_row_visible(cursor_row, visible_height);
    let content: Vec<Line> = rows
        .into_iter()
        .skip(surface.scroll_offset())
        .take(visible_height)
        .collect();
    frame.render_widget(Paragraph::new(content).style(palette.surface()), area);
}

/// Break `spans` into rows at most `width` cells wide.
///
/// Returns the rows and the row holding char `mark` (0 when `mark` is
/// `None`).
fn wrap_spans(
    spans: Vec<Span<'static>>,
    width: usize,
    mark: Option<usize>,
) -> (Vec<Vec<Span<'static>>>, usize) {
    let width = width.max(1);
    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut row_width = 0;
    let mut char_pos = 0;
    let mut mark_row = 0;

    for span in spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if row_width + ch_width > width && row_width > 0 {
                if !chunk.is_empty() {
                    let last = rows.len() - 1;
                    rows[last].push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Vec::new());
                row_width = 0;
            }
            if mark == Some(char_pos) {
                mark_row = rows.len() - 1;
            }
            chunk.push(ch);
            row_width += ch_width;
            char_pos += 1;
        }
        if !chunk.is_empty() {
            let last = rows.len() - 1;
            rows[last].push(Span::styled(chunk, span.style));
        }
    }
    (rows, mark_row)
}

/// Split `spans` so the character at `cursor_char` is drawn with
/// `cursor_style`. A cursor past the end of the line gets a trailing cell.
fn with_cursor(
    spans: Vec<Span<'static>>,
    cursor_char: usize,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len() + 2);
    let mut pos = 0usize;
    let mut placed = false;

    for span in spans {
        let len = span.content.chars().count();
        if placed || cursor_char >= pos + len {
            pos += len;
            out.push(span);
            continue;
        }

        let offset = cursor_char - pos;
        let before: String = span.content.chars().take(offset).collect();
        let at: String = span.content.chars().skip(offset).take(1).collect();
        let after: String = span.content.chars().skip(offset + 1).collect();
        if !before.is_empty() {
            out.push(Span::styled(before, span.style));
        }
        out.push(Span::styled(at, cursor_style));
        if !after.is_empty() {
            out.push(Span::styled(after, span.style));
        }
        placed = true;
        pos += len;
    }

    if !placed {
        out.push(Span::styled(" ", cursor_style));
    }
    out
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
