use serde::{Deserialize, Serialize};

/// Rendering and behavior options for the editor surface.
///
/// The terminal surface honors `line_numbers`, `tab_size` and `word_wrap`.
/// The remaining fields travel with the panel for hosts that render the
/// surface some other way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOptions {
    pub minimap: bool,
    pub font_size: u16,
    pub font_family: String,
    pub line_numbers: bool,
    pub rounded_selection: bool,
    pub scroll_beyond_last_line: bool,
    pub automatic_layout: bool,
    pub tab_size: usize,
    pub word_wrap: bool,
    pub bracket_pair_colorization: bool,
    pub render_whitespace: WhitespaceRendering,
    pub smooth_scrolling: bool,
    pub context_menu: bool,
    pub mouse_wheel_zoom: bool,
    pub quick_suggestions: bool,
    pub format_on_paste: bool,
    pub format_on_type: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WhitespaceRendering {
    None,
    Selection,
    All,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            minimap: true,
            font_size: 14,
            font_family: "Consolas, \"Courier New\", monospace".to_string(),
            line_numbers: true,
            rounded_selection: true,
            scroll_beyond_last_line: false,
            automatic_layout: true,
            tab_size: 2,
            word_wrap: true,
            bracket_pair_colorization: true,
            render_whitespace: WhitespaceRendering::Selection,
            smooth_scrolling: true,
            context_menu: true,
            mouse_wheel_zoom: true,
            quick_suggestions: true,
            format_on_paste: true,
            format_on_type: true,
        }
    }
}
