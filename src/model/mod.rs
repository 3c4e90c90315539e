//! Electrical model of the bulb circuit.
//!
//! ## Model
//!
//! The loop is a single resistive bulb fed by ideal cells:
//!
//! ```text
//!   series:   V = n * V_cell        parallel:   V = V_cell
//!   I = V / R_bulb
//!   brightness = min(1.5, V / 3.0)
//! ```
//!
//! An open switch forces every quantity to zero before any of the above is
//! considered. Current is on an arbitrary linear scale used to pace the wire
//! animation; brightness is a rendering scalar, not a photometric unit.

mod electrical;

pub use electrical::{evaluate, ElectricalState};

/// Terminal voltage of a single ideal cell (volts).
pub const CELL_VOLTAGE: f64 = 1.5;

/// Fixed bulb resistance (ohms).
pub const BULB_RESISTANCE: f64 = 10.0;

/// Voltage that maps to brightness 1.0.
pub const BRIGHTNESS_REFERENCE_VOLTAGE: f64 = 3.0;

/// Upper clamp for the brightness scalar.
pub const MAX_BRIGHTNESS: f64 = 1.5;
