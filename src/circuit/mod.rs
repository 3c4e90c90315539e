//! Circuit configuration and validation.
//!
//! The experiment has a single fixed topology: N identical cells, one switch
//! and one bulb in a loop. A [`CircuitConfiguration`] picks the only three
//! free parameters of that topology.

mod types;
mod validate;

pub use types::{CircuitConfiguration, ConnectionType};
pub use validate::{battery_count_from_f64, validate_battery_count, MAX_BATTERY_COUNT};
