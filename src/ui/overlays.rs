use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::file::Language;

use super::style::Palette;

pub fn language_picker_rect(area: Rect) -> Rect {
    // 2 rows of border + 1 hint row
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = Language::ALL.len() as u16 + 3;
    centered_popup_rect(28, needed_rows, area)
}

pub fn render_language_picker(selected: usize, palette: Palette, frame: &mut Frame, area: Rect) {
    let popup = language_picker_rect(area);
    let visible_rows = popup.height.saturating_sub(3).max(1) as usize;
    let start = selected.saturating_sub(visible_rows - 1);

    let mut lines: Vec<Line> = Language::ALL
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows)
        .map(|(idx, lang)| {
            if idx == selected {
                Line::styled(
                    format!("> {}", lang.label()),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                )
            } else {
                Line::raw(format!("  {}", lang.label()))
            }
        })
        .collect();
    lines.push(Line::styled(
        "Enter select · Esc cancel",
        Style::default().fg(palette.muted),
    ));

    let block = Block::default()
        .title("Language")
        .borders(Borders::ALL)
        .style(palette.toolbar());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
