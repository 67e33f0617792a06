//! Altimeter page
//!
//! The only screen of the application. Shows pressure and altitude over a
//! background that darkens with altitude, notices for a missing sensor and
//! for simulation mode, and the buttons that drive the simulation.
//!
//! Layout (320x240):
//! - Title
//! - Missing-sensor notice (only without a barometer)
//! - Simulation notice (only while simulating)
//! - Pressure and altitude labels
//! - `Sim +Altitude` / `Sim -Altitude`
//! - `Stop Simulation` (only while simulating)

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use log::debug;

use crate::display::{DisplayModel, NO_SENSOR_NOTICE, SIMULATION_NOTICE};
use crate::pages::constants::*;
use crate::pages::page::Page;
use crate::reading::ReadingState;
use crate::ui::{
    Action, Button, ButtonVariant, ColorPalette, Drawable, PageEvent, Style, TextComponent,
    TextSize, TouchEvent, TouchResult, Touchable,
};

/// Pressure change applied by one simulate button press, in hPa
pub const SIMULATE_STEP_HPA: f64 = 2.0;

pub struct AltimeterPage {
    bounds: Rectangle,
    background: Rgb565,
    title: TextComponent,
    sensor_notice: TextComponent,
    simulation_notice: TextComponent,
    pressure: TextComponent,
    altitude: TextComponent,
    climb_button: Button,
    descend_button: Button,
    stop_button: Button,
    show_stop_button: bool,
    dirty: bool,
}

impl AltimeterPage {
    /// Build the page showing `state`.
    pub fn new(bounds: Rectangle, state: &ReadingState) -> Self {
        let palette = ColorPalette::default();
        let width = bounds.size.width;
        let row = |top: i32, height: u32| {
            Rectangle::new(
                Point::new(bounds.top_left.x, bounds.top_left.y + top),
                Size::new(width, height),
            )
        };

        // Narrow bounds shrink the buttons rather than underflow.
        let button_width = width.saturating_sub(2 * MARGIN_PX + BUTTON_GAP_PX) / 2;
        let button = |left: u32, top: i32, width: u32| {
            Rectangle::new(
                Point::new(bounds.top_left.x + left as i32, bounds.top_left.y + top),
                Size::new(width, BUTTON_HEIGHT_PX),
            )
        };

        // Lower pressure means higher altitude.
        let climb_button = Button::new(
            button(MARGIN_PX, SIMULATE_ROW_TOP_PX, button_width),
            "Sim +Altitude",
            Action::Simulate {
                delta_hpa: -SIMULATE_STEP_HPA,
            },
        )
        .with_palette(palette);

        let descend_button = Button::new(
            button(
                MARGIN_PX + button_width + BUTTON_GAP_PX,
                SIMULATE_ROW_TOP_PX,
                button_width,
            ),
            "Sim -Altitude",
            Action::Simulate {
                delta_hpa: SIMULATE_STEP_HPA,
            },
        )
        .with_palette(palette)
        .with_variant(ButtonVariant::Secondary);

        let mut stop_button = Button::new(
            button(
                width.saturating_sub(STOP_BUTTON_WIDTH_PX) / 2,
                STOP_ROW_TOP_PX,
                STOP_BUTTON_WIDTH_PX,
            ),
            "Stop Simulation",
            Action::StopSimulation,
        )
        .with_palette(palette)
        .with_variant(ButtonVariant::Alert);
        stop_button.set_enabled(false);

        let mut page = Self {
            bounds,
            background: Rgb565::BLACK,
            title: TextComponent::new(
                row(TITLE_TOP_PX, TITLE_HEIGHT_PX),
                "ALTIMETER",
                TextSize::Large,
            )
            .with_style(Style::new().with_foreground(palette.text_primary)),
            sensor_notice: TextComponent::new(
                row(NOTICE_SENSOR_TOP_PX, NOTICE_HEIGHT_PX),
                NO_SENSOR_NOTICE,
                TextSize::Medium,
            )
            .with_style(Style::new().with_foreground(palette.notice)),
            simulation_notice: TextComponent::new(
                row(NOTICE_SIMULATION_TOP_PX, NOTICE_HEIGHT_PX),
                SIMULATION_NOTICE,
                TextSize::Medium,
            )
            .with_style(Style::new().with_foreground(palette.alert)),
            pressure: TextComponent::new(
                row(PRESSURE_TOP_PX, PRESSURE_HEIGHT_PX),
                "",
                TextSize::Medium,
            ),
            altitude: TextComponent::new(
                row(ALTITUDE_TOP_PX, ALTITUDE_HEIGHT_PX),
                "",
                TextSize::Large,
            ),
            climb_button,
            descend_button,
            stop_button,
            show_stop_button: false,
            dirty: true,
        };
        page.apply(state);
        page
    }

    /// Refresh every element from `state`. Returns `true` if anything changed.
    pub fn apply(&mut self, state: &ReadingState) -> bool {
        let model = DisplayModel::from(state);

        self.pressure.set_text(&model.pressure);
        self.altitude.set_text(&model.altitude);
        self.sensor_notice.set_visible(model.show_no_sensor_notice);
        self.simulation_notice.set_visible(model.show_simulation_notice);

        if self.background != model.background {
            self.background = model.background;
            self.dirty = true;
        }
        if self.show_stop_button != model.show_stop_button {
            self.show_stop_button = model.show_stop_button;
            self.stop_button.set_enabled(model.show_stop_button);
            self.dirty = true;
        }

        let changed = Drawable::is_dirty(self);
        if changed {
            debug!("Altimeter page: {} / {}", model.pressure, model.altitude);
        }
        changed
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn pressure_text(&self) -> &str {
        self.pressure.text()
    }

    pub fn altitude_text(&self) -> &str {
        self.altitude.text()
    }

    pub fn shows_sensor_notice(&self) -> bool {
        self.sensor_notice.is_visible()
    }

    pub fn shows_simulation_notice(&self) -> bool {
        self.simulation_notice.is_visible()
    }

    pub fn shows_stop_button(&self) -> bool {
        self.show_stop_button
    }

    fn buttons_mut(&mut self) -> [&mut Button; 3] {
        [
            &mut self.climb_button,
            &mut self.descend_button,
            &mut self.stop_button,
        ]
    }
}

impl Page for AltimeterPage {
    fn title(&self) -> &str {
        "Altimeter"
    }

    fn on_activate(&mut self) {
        Drawable::mark_dirty(self);
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        let mut action = None;

        // The stop button is disabled while hidden, so it ignores touch then.
        for button in self.buttons_mut() {
            match button.handle_touch(event) {
                TouchResult::Action(a) => action = action.or(Some(a)),
                TouchResult::Handled | TouchResult::NotHandled => {}
            }
        }

        action
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::ReadingUpdate(state) => self.apply(state),
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Drawable::draw(self, display)
    }

    fn bounds(&self) -> Rectangle {
        Drawable::bounds(self)
    }

    fn is_dirty(&self) -> bool {
        Drawable::is_dirty(self)
    }

    fn mark_clean(&mut self) {
        Drawable::mark_clean(self)
    }

    fn mark_dirty(&mut self) {
        Drawable::mark_dirty(self)
    }
}

impl Drawable for AltimeterPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        // Background shade follows altitude, so every redraw repaints it.
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;

        self.title.draw(display)?;
        self.sensor_notice.draw(display)?;
        self.simulation_notice.draw(display)?;
        self.pressure.draw(display)?;
        self.altitude.draw(display)?;
        self.climb_button.draw(display)?;
        self.descend_button.draw(display)?;
        if self.show_stop_button {
            self.stop_button.draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title.is_dirty()
            || self.sensor_notice.is_dirty()
            || self.simulation_notice.is_dirty()
            || self.pressure.is_dirty()
            || self.altitude.is_dirty()
            || self.climb_button.is_dirty()
            || self.descend_button.is_dirty()
            || self.stop_button.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.sensor_notice.mark_clean();
        self.simulation_notice.mark_clean();
        self.pressure.mark_clean();
        self.altitude.mark_clean();
        for button in self.buttons_mut() {
            button.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::background_color;
    use crate::reading::ReadingController;
    use crate::ui::test_display::RecordingDisplay;
    use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint};

    fn screen() -> Rectangle {
        Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        )
    }

    fn press_at(rect: Rectangle) -> TouchEvent {
        let center = rect.center();
        TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16))
    }

    #[test]
    fn test_initial_page() {
        let controller = ReadingController::new(true);
        let page = AltimeterPage::new(screen(), &controller.state());

        assert_eq!(page.pressure_text(), "Pressure: 1013.25 hPa");
        assert_eq!(page.altitude_text(), "Altitude: 0.00 m");
        assert!(!page.shows_sensor_notice());
        assert!(!page.shows_simulation_notice());
        assert!(!page.shows_stop_button());
        assert_eq!(page.background(), background_color(0.0));
        assert!(Page::is_dirty(&page));
    }

    #[test]
    fn test_missing_sensor_notice() {
        let controller = ReadingController::new(false);
        let page = AltimeterPage::new(screen(), &controller.state());
        assert!(page.shows_sensor_notice());
    }

    #[test]
    fn test_simulate_buttons_emit_actions() {
        let controller = ReadingController::new(true);
        let mut page = AltimeterPage::new(screen(), &controller.state());

        let climb = Drawable::bounds(&page.climb_button);
        let descend = Drawable::bounds(&page.descend_button);

        assert_eq!(
            page.handle_touch(press_at(climb)),
            Some(Action::Simulate { delta_hpa: -2.0 })
        );
        assert_eq!(
            page.handle_touch(press_at(descend)),
            Some(Action::Simulate { delta_hpa: 2.0 })
        );
    }

    #[test]
    fn test_stop_button_only_while_simulating() {
        let mut controller = ReadingController::new(true);
        let mut page = AltimeterPage::new(screen(), &controller.state());
        let stop = Drawable::bounds(&page.stop_button);

        assert_eq!(page.handle_touch(press_at(stop)), None);

        controller.simulate(-2.0);
        assert!(page.on_event(&PageEvent::ReadingUpdate(controller.state())));
        assert!(page.shows_stop_button());
        assert!(page.shows_simulation_notice());
        assert_eq!(page.handle_touch(press_at(stop)), Some(Action::StopSimulation));

        controller.stop_simulation();
        page.on_event(&PageEvent::ReadingUpdate(controller.state()));
        assert!(!page.shows_stop_button());
        assert_eq!(page.handle_touch(press_at(stop)), None);
    }

    #[test]
    fn test_unchanged_state_is_not_dirty() {
        let controller = ReadingController::new(true);
        let mut page = AltimeterPage::new(screen(), &controller.state());
        Page::mark_clean(&mut page);

        assert!(!page.on_event(&PageEvent::ReadingUpdate(controller.state())));
        assert!(!Page::is_dirty(&page));
    }

    #[test]
    fn test_draw_fills_background() {
        let mut controller = ReadingController::new(true);
        controller.on_sensor_reading(700.0);
        let mut page = AltimeterPage::new(screen(), &controller.state());

        let mut display = RecordingDisplay::new();
        page.draw_page(&mut display).unwrap();
        Page::mark_clean(&mut page);

        let expected = background_color(controller.altitude_m());
        assert_eq!(display.pixel(0, 0), expected);
        assert_eq!(display.pixel(319, 239), expected);
        assert!(!Page::is_dirty(&page));
    }

    #[test]
    fn test_narrow_bounds_fit_buttons_inside() {
        let bounds = Rectangle::new(Point::zero(), Size::new(128, 64));
        let mut controller = ReadingController::new(true);
        let mut page = AltimeterPage::new(bounds, &controller.state());

        for button in [&page.climb_button, &page.descend_button, &page.stop_button] {
            let left = Drawable::bounds(button).top_left.x;
            assert!((0..=128).contains(&left));
        }

        controller.simulate(-2.0);
        page.apply(&controller.state());
        let mut display = RecordingDisplay::new();
        page.draw_page(&mut display).unwrap();
        assert_eq!(display.pixel(0, 0), background_color(controller.altitude_m()));
    }

    #[test]
    fn test_alert_elements_drawn_only_while_simulating() {
        let mut controller = ReadingController::new(true);
        let mut page = AltimeterPage::new(screen(), &controller.state());
        let alert = ColorPalette::default().alert;

        let mut display = RecordingDisplay::new();
        page.draw_page(&mut display).unwrap();
        assert_eq!(display.count(alert), 0);

        controller.simulate(2.0);
        page.apply(&controller.state());
        let mut display = RecordingDisplay::new();
        page.draw_page(&mut display).unwrap();
        assert!(display.count(alert) > 0);
    }
}
