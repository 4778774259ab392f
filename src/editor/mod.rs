//! The editing surface embedded in the panel.
//!
//! Provides a rope-backed text buffer with cursor management, wrapped in a
//! surface that tracks loading state and reports full-text change events.

mod buffer;
mod options;
mod surface;

pub use buffer::{Cursor, Direction, TextBuffer, normalize_line_breaks};
pub use options::{SurfaceOptions, WhitespaceRendering};
pub use surface::{EditorSurface, SurfaceChange, SurfaceEdit, SurfaceState};
