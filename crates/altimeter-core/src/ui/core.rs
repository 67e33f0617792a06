//! Core UI traits and types for the altimeter UI

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::reading::ReadingState;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events that can occur on the UI
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
    /// Touch released
    Release,
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

/// User intents emitted by the UI.
///
/// The UI never changes reading state itself; it hands these to the app,
/// which applies them to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Nudge the displayed pressure and enter simulation mode
    Simulate { delta_hpa: f64 },
    /// Return to live sensor readings
    StopSimulation,
}

/// Events that pages can subscribe to for updates
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Reading state changed
    ReadingUpdate(ReadingState),
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within its bounds
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
