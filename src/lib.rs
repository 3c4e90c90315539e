//! # Bulb Lab Core
//!
//! The model behind an interactive battery-and-bulb experiment.
//!
//! This library provides:
//! - A circuit model mapping a battery/switch configuration to voltage,
//!   current and bulb brightness
//! - A deterministic layout engine producing render-agnostic diagram geometry
//! - An explanation service boundary with fixed fallbacks for every failure
//! - A session type that keeps displayed explanations in step with the circuit
//!
//! ## Architecture
//!
//! - [`circuit`] - Configuration types and validation
//! - [`model`] - Electrical quantities
//! - [`layout`] - Diagram geometry
//! - [`explain`] - Natural-language explanations
//! - [`session`] - Commands, frames and explanation invalidation
//! - [`config`] - Explanation service settings
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! API_KEY=... bulb-lab --batteries 2 --connection series --closed --explain
//! ```
//!
//! ### Library
//!
//! ```
//! use bulb_lab_core::{evaluate, layout, CircuitConfiguration, ConnectionType};
//!
//! let config = CircuitConfiguration::new(2, ConnectionType::Series, true).unwrap();
//! let electrical = evaluate(&config);
//! let geometry = layout(&config, &electrical);
//!
//! assert_eq!(electrical.voltage_label(), "3.0 V");
//! assert!(geometry.bulb.lit);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitLab } from 'bulb_lab_core';
//!
//! const lab = new WasmCircuitLab();
//! lab.toggle_switch();
//! const frame = JSON.parse(lab.frame_json());
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod explain;
pub mod layout;
pub mod model;
pub mod session;

// Re-export main types for convenience
pub use circuit::{CircuitConfiguration, ConnectionType};
pub use config::ExplainerConfig;
pub use error::{BulbLabError, Result};
pub use explain::{Explainer, Explanation, ExplanationSource};
pub use layout::{layout, GeometryDescription};
pub use model::{evaluate, ElectricalState};
pub use session::{LabCommand, LabFrame, LabSession};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitLab;
