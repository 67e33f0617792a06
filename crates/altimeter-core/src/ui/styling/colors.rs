//! Color definitions and palette management
//!
//! Colors are RGB565, the native format of 16-bit embedded displays.
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Button fill - muted blue
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(70 >> 3, 110 >> 2, 180 >> 3);

/// Secondary button fill - slate
pub const COLOR_ACCENT_SECONDARY: Rgb565 = Rgb565::new(90 >> 3, 100 >> 2, 120 >> 3);

/// Surface for disabled elements - dark gray-blue
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

// ============================================================================
// Notice Colors
// ============================================================================

/// Missing-hardware notice
pub const COLOR_NOTICE: Rgb565 = Rgb565::new(31, 63, 0);

/// Simulation-active notice and destructive actions
pub const COLOR_ALERT: Rgb565 = Rgb565::new(31, 0, 0);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

// ============================================================================
// Color Palette
// ============================================================================

/// Colors shared by every element on the altimeter screen.
///
/// The screen background is not part of the palette; it follows altitude
/// (see [`crate::display::background_color`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Primary accent color - simulate buttons
    pub primary: Rgb565,

    /// Secondary accent color
    pub secondary: Rgb565,

    /// Surface color for disabled elements
    pub surface: Rgb565,

    /// Missing-sensor notice
    pub notice: Rgb565,

    /// Simulation notice and the stop button
    pub alert: Rgb565,

    /// Primary text color
    pub text_primary: Rgb565,

    /// Secondary text color
    pub text_secondary: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_SECONDARY,
            surface: COLOR_SURFACE,
            notice: COLOR_NOTICE,
            alert: COLOR_ALERT,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
        }
    }
}
