use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::panel::ToolbarView;

use super::style::Palette;

/// Label of the new-file button.
pub const NEW_FILE_BUTTON: &str = "[+] New";

pub fn render_toolbar(view: &ToolbarView, palette: Palette, frame: &mut Frame, area: Rect) {
    let bar = palette.toolbar();

    let mut left = vec![Span::styled(
        format!(" {}", view.name),
        bar.add_modifier(Modifier::BOLD),
    )];
    if view.saved {
        left.push(Span::styled("  ● Saved", bar.fg(palette.saved)));
    }
    left.push(Span::styled(" │ ", bar.fg(palette.muted)));
    left.push(Span::styled(
        format!("[{} ▾]", view.language_label),
        bar.fg(palette.accent),
    ));

    let counters = view.counters();
    let right = Line::from(vec![
        Span::styled(NEW_FILE_BUTTON, bar),
        Span::styled(format!("  {counters} "), bar.fg(palette.muted)),
    ]);
    #[allow(clippy::cast_possible_truncation)]
    let right_width = (NEW_FILE_BUTTON.width() + counters.width() + 3) as u16;

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);
    frame.render_widget(Paragraph::new(Line::from(left)).style(bar), left_area);
    frame.render_widget(
        Paragraph::new(right).style(bar).alignment(Alignment::Right),
        right_area,
    );
}
