//! Button component with variants and press feedback

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{ButtonVariant, ColorPalette, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Baseline, Text, TextStyleBuilder};

/// Corner radius of every button, in pixels
const CORNER_RADIUS_PX: u32 = 8;

/// Button state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
    Disabled,
}

/// Button component with label and action
///
/// Triggers its [`Action`] on press and darkens while held. A disabled
/// button is drawn dimmed and ignores touch.
///
/// # Examples
/// ```ignore
/// let button = Button::new(
///     Rectangle::new(Point::new(20, 170), Size::new(130, 36)),
///     "Sim +Altitude",
///     Action::Simulate { delta_hpa: -2.0 },
/// )
/// .with_variant(ButtonVariant::Primary);
/// ```
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<32>,
    action: Action,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    dirty: bool,
}

impl Button {
    /// Create a new button with the specified bounds, label, and action.
    ///
    /// Labels longer than 32 bytes are dropped.
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds,
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            dirty: true,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self.dirty = true;
        self
    }

    /// Enable or disable the button.
    pub fn set_enabled(&mut self, enabled: bool) {
        let new_state = if enabled {
            ButtonState::Normal
        } else {
            ButtonState::Disabled
        };

        if self.state != new_state {
            self.state = new_state;
            self.dirty = true;
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, ButtonState::Disabled)
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, ButtonState::Pressed)
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                let bg = base_style.background_color.unwrap_or(self.palette.primary);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
            ButtonState::Disabled => base_style
                .with_background(self.palette.surface)
                .with_foreground(self.palette.text_secondary),
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(CORNER_RADIUS_PX, CORNER_RADIUS_PX);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(TextAlignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
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

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if !self.is_enabled() {
            return TouchResult::NotHandled;
        }

        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.state = ButtonState::Pressed;
                self.dirty = true;

                // Trigger action immediately on press
                TouchResult::Action(self.action)
            }
            TouchEvent::Drag(point) if self.is_pressed() => {
                if !self.contains_point(point) {
                    self.state = ButtonState::Normal;
                    self.dirty = true;
                }
                TouchResult::Handled
            }
            TouchEvent::Release if self.is_pressed() => {
                self.state = ButtonState::Normal;
                self.dirty = true;
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}
