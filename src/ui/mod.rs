//! Terminal rendering of the editor panel.
//!
//! - [`render`]: toolbar, surface (or loading placeholder) and the language
//!   selector overlay
//! - [`style`]: light and dark palettes

pub mod style;

mod overlays;
mod render;
mod toolbar;

pub use overlays::language_picker_rect;
pub use render::{LOADING_TEXT, line_number_width, render};
pub use toolbar::NEW_FILE_BUTTON;
