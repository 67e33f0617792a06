//! Hardware-independent core library for altimeter-rs
//!
//! This crate contains all platform-agnostic logic for the altimeter: the
//! barometric altitude model, the live/simulated reading controller, sensor
//! collaborator traits, and the single altimeter screen rendered with
//! `embedded-graphics`.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod altitude;
pub mod app;
pub mod display;
pub mod pages;
pub mod reading;
pub mod sensors;
pub mod ui;
