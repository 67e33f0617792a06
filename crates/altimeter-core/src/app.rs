//! Application shell
//!
//! [`AltimeterApp`] wires the pieces together with a one-way data flow:
//!
//! ```text
//!  sensor ──on_sensor_reading──▶ ReadingController ──ReadingUpdate──▶ AltimeterPage
//!                                      ▲                                   │
//!                                      └──── action queue ◀── touch/keys ──┘
//! ```
//!
//! The page only ever sees snapshots of the reading state and emits
//! [`Action`]s into a bounded queue. The app drains that queue into the
//! controller and pushes the resulting state back to the page.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info, warn};

use crate::pages::{AltimeterPage, Page};
use crate::reading::{ReadingController, ReadingState};
use crate::sensors::{PressureSource, SensorError, SensorSubscription};
use crate::ui::{Action, PageEvent, TouchEvent};

/// Pending user actions before new ones are dropped
pub const ACTION_QUEUE_CAPACITY: usize = 8;

/// Upper bound on readings taken from a subscription per pump
pub const MAX_READINGS_PER_PUMP: usize = 16;

pub struct AltimeterApp {
    controller: ReadingController,
    page: AltimeterPage,
    actions: Channel<NoopRawMutex, Action, ACTION_QUEUE_CAPACITY>,
    visible: bool,
}

impl AltimeterApp {
    /// Create the app, asking `source` once whether a barometer exists.
    pub fn new<S: PressureSource>(source: &S, bounds: Rectangle) -> Self {
        let sensor_available = source.is_present();
        if sensor_available {
            info!("Pressure sensor '{}' detected", source.name());
        } else {
            warn!("No pressure sensor detected; simulation only");
        }

        Self::with_controller(ReadingController::new(sensor_available), bounds)
    }

    pub fn with_controller(controller: ReadingController, bounds: Rectangle) -> Self {
        let page = AltimeterPage::new(bounds, &controller.state());
        Self {
            controller,
            page,
            actions: Channel::new(),
            visible: false,
        }
    }

    pub fn state(&self) -> ReadingState {
        self.controller.state()
    }

    pub fn page(&self) -> &AltimeterPage {
        &self.page
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The view became visible. Acquire a [`SensorSubscription`] alongside;
    /// readings are accepted from now on.
    pub fn resume(&mut self) {
        self.visible = true;
        self.page.on_activate();
        info!("{} resumed", self.page.title());
    }

    /// The view was hidden. Drop the [`SensorSubscription`] alongside;
    /// readings are ignored until the next [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.visible = false;
        self.page.on_deactivate();
        info!("{} paused", self.page.title());
    }

    /// Route a touch event to the page and queue any resulting action.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        match self.page.handle_touch(event) {
            Some(action) => self.request(action),
            None => false,
        }
    }

    /// Queue an action. Returns `false` if the queue is full.
    pub fn request(&self, action: Action) -> bool {
        match self.actions.try_send(action) {
            Ok(()) => true,
            Err(_) => {
                warn!("Action queue full, dropping {:?}", action);
                false
            }
        }
    }

    /// Apply every queued action. Returns `true` if the page needs a redraw.
    pub fn process_actions(&mut self) -> bool {
        let mut changed = false;

        while let Ok(action) = self.actions.try_receive() {
            match action {
                Action::Simulate { delta_hpa } => {
                    self.controller.simulate(delta_hpa);
                    changed |= self.refresh_page();
                }
                Action::StopSimulation if self.controller.is_simulating() => {
                    self.controller.stop_simulation();
                    changed |= self.refresh_page();
                }
                Action::StopSimulation => debug!("Stop requested while live; ignoring"),
            }
        }

        changed
    }

    /// Deliver one sensor reading. Returns `true` if the page needs a redraw.
    ///
    /// Readings are ignored while paused.
    pub fn on_sensor_reading(&mut self, pressure_hpa: f64) -> bool {
        if !self.visible {
            debug!("Paused; ignoring reading {:.2} hPa", pressure_hpa);
            return false;
        }

        if self.controller.on_sensor_reading(pressure_hpa) {
            self.refresh_page()
        } else {
            false
        }
    }

    /// Drain pending readings from an active subscription.
    ///
    /// Invalid readings are skipped; a failed read ends this pump and is
    /// returned so the caller can decide whether to keep the subscription.
    /// While paused nothing is taken from the subscription.
    pub fn pump_sensor<S: PressureSource>(
        &mut self,
        subscription: &mut SensorSubscription<'_, S>,
    ) -> Result<usize, SensorError> {
        if !self.visible {
            warn!(
                "{}: pumped while paused; release the subscription on pause",
                subscription.source_name()
            );
            return Ok(0);
        }

        let mut accepted = 0;
        let mut result = Ok(());

        for _ in 0..MAX_READINGS_PER_PUMP {
            match subscription.next_reading() {
                Ok(Some(pressure_hpa)) => {
                    if self.controller.on_sensor_reading(pressure_hpa) {
                        accepted += 1;
                    }
                }
                Ok(None) => break,
                Err(SensorError::InvalidReading { .. }) => continue,
                Err(e) => {
                    warn!("{}: {}", subscription.source_name(), e);
                    result = Err(e);
                    break;
                }
            }
        }

        if accepted > 0 {
            self.refresh_page();
        }
        result.map(|()| accepted)
    }

    /// Redraw the page if anything changed. Returns `true` if it drew.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if !self.page.is_dirty() {
            return Ok(false);
        }

        self.page.draw_page(display)?;
        self.page.mark_clean();
        Ok(true)
    }

    fn refresh_page(&mut self) -> bool {
        let event = PageEvent::ReadingUpdate(self.controller.state());
        self.page.on_event(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::estimate_altitude;
    use crate::reading::ReadingMode;
    use crate::sensors::NoSensor;
    use crate::sensors::tests::ScriptedSource;
    use crate::ui::test_display::RecordingDisplay;
    use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint};
    use alloc::vec;

    fn screen() -> Rectangle {
        Rectangle::new(
            Point::zero(),
            Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
        )
    }

    #[test]
    fn test_sensor_presence_queried_at_startup() {
        let app = AltimeterApp::new(&NoSensor, screen());
        assert!(!app.state().sensor_available);
        assert!(app.page().shows_sensor_notice());

        let source = ScriptedSource::new(true, vec![]);
        let app = AltimeterApp::new(&source, screen());
        assert!(app.state().sensor_available);
    }

    #[test]
    fn test_actions_flow_through_queue() {
        let mut app = AltimeterApp::new(&NoSensor, screen());

        assert!(app.request(Action::Simulate { delta_hpa: -2.0 }));
        // Nothing changes until the queue is drained
        assert_eq!(app.state().mode, ReadingMode::Live);

        assert!(app.process_actions());
        assert_eq!(app.state().mode, ReadingMode::Simulated);
        assert_eq!(app.page().pressure_text(), "Pressure: 1011.25 hPa");
        assert!(app.page().shows_stop_button());
    }

    #[test]
    fn test_full_queue_drops_actions() {
        let mut app = AltimeterApp::new(&NoSensor, screen());
        for _ in 0..ACTION_QUEUE_CAPACITY {
            assert!(app.request(Action::Simulate { delta_hpa: 1.0 }));
        }
        assert!(!app.request(Action::Simulate { delta_hpa: 1.0 }));

        app.process_actions();
        assert_eq!(
            app.state().pressure_hpa,
            1013.25 + ACTION_QUEUE_CAPACITY as f64
        );
    }

    #[test]
    fn test_stop_ignored_while_live() {
        let mut app = AltimeterApp::new(&NoSensor, screen());
        app.request(Action::StopSimulation);
        assert!(!app.process_actions());
        assert_eq!(app.state().mode, ReadingMode::Live);
    }

    #[test]
    fn test_touch_queues_action() {
        let mut app = AltimeterApp::new(&NoSensor, screen());
        // Centre of the "Sim +Altitude" button
        let press = TouchEvent::Press(TouchPoint::new(80, 160));
        assert!(app.handle_touch(press));
        app.process_actions();
        assert_eq!(app.state().pressure_hpa, 1011.25);

        // Empty space
        assert!(!app.handle_touch(TouchEvent::Press(TouchPoint::new(5, 5))));
    }

    #[test]
    fn test_pump_skips_invalid_and_stops_on_failure() {
        let mut source = ScriptedSource::new(true, vec![1000.0, f64::INFINITY, 995.0]);
        source.readings.push_back(Err(SensorError::ReadFailed {
            sensor: "scripted",
            details: "bus error",
        }));
        let mut app = AltimeterApp::new(&source, screen());
        app.resume();

        let mut subscription = SensorSubscription::acquire(&mut source).unwrap();
        assert!(app.pump_sensor(&mut subscription).is_err());
        assert_eq!(app.state().pressure_hpa, 995.0);
        assert_eq!(app.page().pressure_text(), "Pressure: 995.00 hPa");
    }

    #[test]
    fn test_small_screen() {
        let bounds = Rectangle::new(Point::zero(), Size::new(128, 64));
        let mut app = AltimeterApp::new(&NoSensor, bounds);
        let mut display = RecordingDisplay::new();
        assert!(app.draw(&mut display).unwrap());
        assert!(app.page().shows_sensor_notice());
    }

    #[test]
    fn test_paused_app_ignores_sensor() {
        let mut source = ScriptedSource::new(true, vec![900.0]);
        let mut app = AltimeterApp::new(&source, screen());
        app.resume();
        app.pause();
        assert!(!app.is_visible());

        {
            let mut subscription = SensorSubscription::acquire(&mut source).unwrap();
            assert_eq!(app.pump_sensor(&mut subscription), Ok(0));
            assert!(!app.on_sensor_reading(950.0));
        }
        assert_eq!(app.state().pressure_hpa, 1013.25);
        // The reading was left in the source, not consumed
        assert_eq!(source.readings.len(), 1);

        app.resume();
        let mut subscription = SensorSubscription::acquire(&mut source).unwrap();
        assert_eq!(app.pump_sensor(&mut subscription), Ok(1));
        assert_eq!(app.state().pressure_hpa, 900.0);
    }

    #[test]
    fn test_visible_session_end_to_end() {
        let mut source = ScriptedSource::new(true, vec![1005.0]);
        let mut app = AltimeterApp::new(&source, screen());
        let mut display = RecordingDisplay::new();

        app.resume();
        {
            let mut subscription = SensorSubscription::acquire(&mut source).unwrap();
            assert_eq!(app.pump_sensor(&mut subscription), Ok(1));
            assert!(app.draw(&mut display).unwrap());
            assert!(!app.draw(&mut display).unwrap());

            app.request(Action::Simulate { delta_hpa: -2.0 });
            app.request(Action::Simulate { delta_hpa: -2.0 });
            app.process_actions();
            assert_eq!(app.state().pressure_hpa, 1001.0);
        }
        app.pause();
        assert!(!source.subscribed);

        source.readings.push_back(Ok(Some(1013.25)));
        app.resume();
        {
            // Sensor readings are discarded while simulating
            let mut subscription = SensorSubscription::acquire(&mut source).unwrap();
            assert_eq!(app.pump_sensor(&mut subscription), Ok(0));
            assert_eq!(app.state().pressure_hpa, 1001.0);

            app.request(Action::StopSimulation);
            app.process_actions();
            assert_eq!(app.state().mode, ReadingMode::Live);
            // Values stay stale until the next reading
            assert_eq!(app.state().pressure_hpa, 1001.0);

            assert!(app.on_sensor_reading(1013.25));
        }
        app.pause();

        let state = app.state();
        assert_eq!(state.pressure_hpa, 1013.25);
        assert_eq!(state.altitude_m, estimate_altitude(1013.25));
        assert!(app.draw(&mut display).unwrap());
        assert_eq!(display.pixel(0, 0), crate::display::background_color(state.altitude_m));
    }
}
