//! Text component for displaying styled single-line text

use crate::ui::core::Drawable;
use crate::ui::styling::Style;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{
    MonoFont, MonoTextStyle,
    ascii::{FONT_6X10, FONT_10X20},
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

/// Text size variants
///
/// - `Medium`: 6x10 font
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }
}

/// Single line of styled text, centred in its bounds.
///
/// Holds up to 64 bytes; longer text is dropped by [`set_text`](Self::set_text).
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<64>,
    size: TextSize,
    style: Style,
    visible: bool,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut text_string = heapless::String::new();
        text_string.push_str(text).ok();

        Self {
            bounds,
            text: text_string,
            size,
            style: Style::default(),
            visible: true,
            dirty: true,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Update the displayed text, marking the component dirty if it changed.
    pub fn set_text(&mut self, text: &str) {
        let mut new_text = heapless::String::new();
        new_text.push_str(text).ok();

        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.dirty = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }

        if self.style.background_color.is_some() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        EgText::with_text_style(&self.text, self.bounds.center(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
