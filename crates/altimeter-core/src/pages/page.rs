//! Core page abstraction for the UI page system.
//!
//! [`Page`] defines the lifecycle, rendering, and interaction contract for a
//! screen. Implementors handle their own layout, touch input, and dirty
//! tracking.

use crate::ui::core::{Action, PageEvent, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Trait that all UI pages must implement.
///
/// The owner calls these methods in a well-defined order:
///
/// 1. **`on_activate`**: when the page becomes visible.
/// 2. **`on_event`**: zero or more times per frame for incoming events.
/// 3. **`handle_touch`**: when a touch event targets this page.
/// 4. **`draw_page`**: when `is_dirty()` is true.
/// 5. **`on_deactivate`**: when the page is hidden.
pub trait Page {
    /// Human-readable title (may appear in headers or debug logs).
    fn title(&self) -> &str;

    /// Called when this page becomes visible.
    fn on_activate(&mut self) {}

    /// Called when this page is hidden.
    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return an [`Action`].
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event was consumed and the page needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}
