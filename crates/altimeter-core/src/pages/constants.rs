//! Layout constants for the altimeter screen
//!
//! The screen is laid out top to bottom in fixed rows on a
//! 320x240 display.

/// Outer horizontal margin in pixels
pub const MARGIN_PX: u32 = 12;

/// Gap between the two simulate buttons in pixels
pub const BUTTON_GAP_PX: u32 = 16;

/// Title row
pub const TITLE_TOP_PX: i32 = 4;
pub const TITLE_HEIGHT_PX: u32 = 28;

/// Missing-sensor and simulation notice rows
pub const NOTICE_SENSOR_TOP_PX: i32 = 36;
pub const NOTICE_SIMULATION_TOP_PX: i32 = 52;
pub const NOTICE_HEIGHT_PX: u32 = 14;

/// Pressure and altitude rows
pub const PRESSURE_TOP_PX: i32 = 72;
pub const PRESSURE_HEIGHT_PX: u32 = 20;
pub const ALTITUDE_TOP_PX: i32 = 96;
pub const ALTITUDE_HEIGHT_PX: u32 = 30;

/// Simulate buttons row
pub const SIMULATE_ROW_TOP_PX: i32 = 140;

/// Stop button row
pub const STOP_ROW_TOP_PX: i32 = 192;

/// Standard button height in pixels
pub const BUTTON_HEIGHT_PX: u32 = 40;

/// Stop button width in pixels
pub const STOP_BUTTON_WIDTH_PX: u32 = 160;
