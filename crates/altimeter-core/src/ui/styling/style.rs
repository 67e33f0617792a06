//! Style configuration for UI elements
//!
//! Provides the core `Style` struct and builder methods for defining the
//! visual appearance of UI components.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use super::colors::{ColorPalette, WHITE};

// ============================================================================
// Style
// ============================================================================

/// Visual style configuration for a UI element
///
/// ```ignore
/// let notice = Style::new().with_foreground(palette.notice);
/// let button = Style::new()
///     .with_background(palette.primary)
///     .with_foreground(WHITE);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb565>,

    /// Foreground/text color (if any)
    pub foreground_color: Option<Rgb565>,
}

impl Default for Style {
    /// White text with no background
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(WHITE),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Converts this style to a `PrimitiveStyle` for embedded-graphics drawing
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        builder.build()
    }
}

// ============================================================================
// Button Variants
// ============================================================================

/// Predefined button styles derived from a [`ColorPalette`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    /// Main actions
    Primary,

    /// Less prominent actions
    Secondary,

    /// Actions that leave a mode, drawn in the alert color
    Alert,
}

impl ButtonVariant {
    pub fn to_style(&self, palette: &ColorPalette) -> Style {
        match self {
            ButtonVariant::Primary => Style::new()
                .with_background(palette.primary)
                .with_foreground(WHITE),

            ButtonVariant::Secondary => Style::new()
                .with_background(palette.secondary)
                .with_foreground(WHITE),

            ButtonVariant::Alert => Style::new()
                .with_background(palette.alert)
                .with_foreground(WHITE),
        }
    }
}
