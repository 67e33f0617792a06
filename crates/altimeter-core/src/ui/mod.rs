//! Altimeter UI toolkit - a small retained-mode UI for embedded displays
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - Styled components (buttons, text)
//! - Colour palette and button variants
//! - Page events and user actions

pub mod components;
pub mod core;
pub mod styling;

pub use components::{Button, TextComponent, TextSize};
pub use core::{Action, Drawable, PageEvent, TouchEvent, TouchPoint, TouchResult, Touchable};
pub use styling::{ButtonVariant, ColorPalette, Style};

/// Display width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 240;

#[cfg(test)]
pub(crate) mod test_display;
