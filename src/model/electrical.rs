//! Voltage, current and brightness derivation.

use log::debug;
use serde::Serialize;

use crate::circuit::{CircuitConfiguration, ConnectionType};

use super::{BRIGHTNESS_REFERENCE_VOLTAGE, BULB_RESISTANCE, CELL_VOLTAGE, MAX_BRIGHTNESS};

/// Electrical quantities for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElectricalState {
    /// Voltage across the bulb (volts).
    pub voltage: f64,
    /// Loop current (amperes, arbitrary scale).
    pub current: f64,
    /// Rendering brightness in `0.0..=1.5`.
    pub brightness: f64,
}

impl ElectricalState {
    /// The state of an open circuit.
    pub const OFF: ElectricalState = ElectricalState {
        voltage: 0.0,
        current: 0.0,
        brightness: 0.0,
    };

    /// Whether current is flowing at all.
    pub fn is_flowing(&self) -> bool {
        self.current > 0.0
    }

    /// Voltage readout with one decimal, e.g. `"4.5 V"`.
    pub fn voltage_label(&self) -> String {
        format!("{:.1} V", self.voltage)
    }

    /// Current readout with two decimals, e.g. `"0.45 A"`.
    pub fn current_label(&self) -> String {
        format!("{:.2} A", self.current)
    }
}

/// Evaluate the circuit.
///
/// Total and pure: every valid configuration maps to exactly one state.
pub fn evaluate(config: &CircuitConfiguration) -> ElectricalState {
    if !config.switch_closed() {
        return ElectricalState::OFF;
    }

    let voltage = match config.connection() {
        ConnectionType::Series => config.battery_count() as f64 * CELL_VOLTAGE,
        // Ideal equal cells in parallel do not raise the terminal voltage
        ConnectionType::Parallel => CELL_VOLTAGE,
    };

    let current = voltage / BULB_RESISTANCE;
    let brightness = (voltage / BRIGHTNESS_REFERENCE_VOLTAGE).min(MAX_BRIGHTNESS);

    debug!(
        "evaluated {}: {:.2} V, {:.3} A, brightness {:.2}",
        config, voltage, current, brightness
    );

    ElectricalState {
        voltage,
        current,
        brightness,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn config(n: u32, connection: ConnectionType, closed: bool) -> CircuitConfiguration {
        CircuitConfiguration::new(n, connection, closed).unwrap()
    }

    #[test]
    fn test_open_switch_is_zero() {
        for n in 1..=5 {
            for connection in [ConnectionType::Series, ConnectionType::Parallel] {
                let state = evaluate(&config(n, connection, false));
                assert_eq!(state, ElectricalState::OFF);
                assert!(!state.is_flowing());
            }
        }
    }

    #[test]
    fn test_series_adds_cells() {
        let expected = [(1, 1.5, 0.15, 0.5), (2, 3.0, 0.3, 1.0), (3, 4.5, 0.45, 1.5)];
        for (n, v, i, b) in expected {
            let state = evaluate(&config(n, ConnectionType::Series, true));
            assert_relative_eq!(state.voltage, v);
            assert_relative_eq!(state.current, i);
            assert_relative_eq!(state.brightness, b);
        }
    }

    #[test]
    fn test_parallel_keeps_single_cell_voltage() {
        for n in 1..=3 {
            let state = evaluate(&config(n, ConnectionType::Parallel, true));
            assert_relative_eq!(state.voltage, 1.5);
            assert_relative_eq!(state.current, 0.15);
            assert_relative_eq!(state.brightness, 0.5);
        }
    }

    #[test]
    fn test_brightness_clamps_for_long_series() {
        let state = evaluate(&config(8, ConnectionType::Series, true));
        assert_relative_eq!(state.voltage, 12.0);
        assert_relative_eq!(state.current, 1.2);
        assert_relative_eq!(state.brightness, MAX_BRIGHTNESS);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let c = config(2, ConnectionType::Series, true);
        let a = evaluate(&c);
        let b = evaluate(&c);
        assert_eq!(a.voltage.to_bits(), b.voltage.to_bits());
        assert_eq!(a.current.to_bits(), b.current.to_bits());
        assert_eq!(a.brightness.to_bits(), b.brightness.to_bits());
    }

    #[test]
    fn test_readout_labels() {
        let state = evaluate(&config(2, ConnectionType::Series, true));
        assert_eq!(state.voltage_label(), "3.0 V");
        assert_eq!(state.current_label(), "0.30 A");
        assert_eq!(ElectricalState::OFF.current_label(), "0.00 A");
    }
}
