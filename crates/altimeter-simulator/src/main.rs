//! Desktop simulator for the altimeter-rs screen.
//!
//! Renders the altimeter page in an SDL2 window via
//! `embedded-graphics-simulator` and feeds it from a synthetic barometer, or
//! from no sensor at all when `ALTIMETER_NO_SENSOR` is set.
//!
//! # Key bindings
//!
//! | Key   | Action                                    |
//! |-------|-------------------------------------------|
//! | Up    | Simulate climbing (-2 hPa)                |
//! | Down  | Simulate descending (+2 hPa)              |
//! | S     | Stop simulation                           |
//! | P     | Pause / resume (releases the sensor)      |
//! | Q/Esc | Quit                                      |
//!
//! Mouse clicks are forwarded as touch events.

mod barometer;
mod config;

use std::time::{Duration, Instant};

use altimeter_core::app::AltimeterApp;
use altimeter_core::pages::altimeter::SIMULATE_STEP_HPA;
use altimeter_core::sensors::{NoSensor, PressureSource, SensorError, SensorSubscription};
use altimeter_core::ui::{Action, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchEvent, TouchPoint};
use anyhow::{Result, anyhow};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use crate::barometer::SyntheticBarometer;
use crate::config::SimulatorConfig;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// How a visible session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionEnd {
    Paused,
    Quit,
}

/// Input decoded from one SDL event.
enum Input {
    Action(Action),
    Touch(TouchEvent),
    TogglePause,
    Quit,
}

struct Simulator {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
}

impl Simulator {
    fn new(config: &SimulatorConfig) -> Self {
        let display = SimulatorDisplay::<Rgb565>::new(Size::new(
            DISPLAY_WIDTH_PX as u32,
            DISPLAY_HEIGHT_PX as u32,
        ));
        let output_settings = OutputSettingsBuilder::new()
            .scale(config.window_scale)
            .build();
        let window = Window::new("Altimeter Simulator", &output_settings);

        Self { display, window }
    }

    /// Draw if needed and push the frame to the window.
    fn render(&mut self, app: &mut AltimeterApp) {
        if let Err(e) = app.draw(&mut self.display) {
            error!("Draw error: {:?}", e);
        }
        self.window.update(&self.display);
    }

    fn poll_inputs(&mut self) -> Vec<Input> {
        self.window.events().filter_map(decode_event).collect()
    }
}

/// Full-screen bounding rectangle.
fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

fn decode_event(event: SimulatorEvent) -> Option<Input> {
    match event {
        SimulatorEvent::Quit => Some(Input::Quit),
        SimulatorEvent::KeyDown { keycode, .. } => decode_key(keycode),
        SimulatorEvent::MouseButtonDown { point, .. } => Some(Input::Touch(TouchEvent::Press(
            TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16),
        ))),
        SimulatorEvent::MouseButtonUp { .. } => Some(Input::Touch(TouchEvent::Release)),
        _ => None,
    }
}

fn decode_key(keycode: Keycode) -> Option<Input> {
    match keycode {
        Keycode::Q | Keycode::Escape => Some(Input::Quit),
        Keycode::P => Some(Input::TogglePause),
        // Up climbs, which means lower pressure
        Keycode::Up => Some(Input::Action(Action::Simulate {
            delta_hpa: -SIMULATE_STEP_HPA,
        })),
        Keycode::Down => Some(Input::Action(Action::Simulate {
            delta_hpa: SIMULATE_STEP_HPA,
        })),
        Keycode::S => Some(Input::Action(Action::StopSimulation)),
        _ => None,
    }
}

/// Sleep off the rest of the frame.
fn pace(frame_start: Instant) {
    let elapsed = frame_start.elapsed();
    if elapsed < FRAME_DURATION {
        std::thread::sleep(FRAME_DURATION - elapsed);
    }
}

/// Run while the view is visible. The sensor subscription lives exactly as
/// long as this call.
fn run_visible<S: PressureSource>(
    sim: &mut Simulator,
    app: &mut AltimeterApp,
    source: &mut S,
) -> Result<SessionEnd> {
    app.resume();

    let mut subscription = match SensorSubscription::acquire(source) {
        Ok(subscription) => Some(subscription),
        Err(SensorError::NotPresent) => None,
        Err(e) => return Err(anyhow!("sensor subscription failed: {e}")),
    };

    loop {
        let frame_start = Instant::now();

        for input in sim.poll_inputs() {
            match input {
                Input::Quit => return Ok(SessionEnd::Quit),
                Input::TogglePause => return Ok(SessionEnd::Paused),
                Input::Action(action) => {
                    app.request(action);
                }
                Input::Touch(touch) => {
                    app.handle_touch(touch);
                }
            }
        }

        app.process_actions();

        let failure = match subscription.as_mut() {
            Some(active) => app.pump_sensor(active).err(),
            None => None,
        };
        if let Some(e) = failure {
            warn!("Dropping sensor subscription after error: {e}");
            subscription = None;
        }

        sim.render(app);
        pace(frame_start);
    }
}

/// Idle while paused. Returns `false` if the window was closed instead of
/// resumed.
fn wait_paused(sim: &mut Simulator, app: &mut AltimeterApp) -> bool {
    loop {
        let frame_start = Instant::now();

        for input in sim.poll_inputs() {
            match input {
                Input::Quit => return false,
                Input::TogglePause => return true,
                Input::Action(_) | Input::Touch(_) => {}
            }
        }

        sim.render(app);
        pace(frame_start);
    }
}

fn run<S: PressureSource>(config: &SimulatorConfig, mut source: S) -> Result<()> {
    let mut app = AltimeterApp::new(&source, screen_bounds());
    let mut sim = Simulator::new(config);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    sim.render(&mut app);

    loop {
        let end = run_visible(&mut sim, &mut app, &mut source)?;
        app.pause();

        if end == SessionEnd::Quit || !wait_paused(&mut sim, &mut app) {
            break;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let config = SimulatorConfig::load()?;

    info!("Starting altimeter simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, config.window_scale
    );
    info!("Keys: Up=Climb  Down=Descend  S=Stop sim  P=Pause  Q=Quit");

    if config.no_sensor {
        run(&config, NoSensor)?;
    } else {
        let barometer = SyntheticBarometer::new(config.base_pressure_hpa, config.sample_interval);
        run(&config, barometer)?;
    }

    info!("Simulator exiting");
    Ok(())
}
