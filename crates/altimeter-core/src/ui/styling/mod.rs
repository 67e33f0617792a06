//! Styling system for UI elements
//!
//! - [`colors`] - Color constants and palette management
//! - [`style`] - Style configuration and button variants

pub mod colors;
pub mod style;

pub use colors::ColorPalette;
pub use style::{ButtonVariant, Style};
