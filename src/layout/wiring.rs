//! Wire routing.
//!
//! The loop is drawn as polylines with fixed detours so that the diagram
//! never changes shape except around the battery bank:
//!
//! ```text
//!          (50,95)+-----------o bulb -----------+(350,80)
//!                 |                             |
//!         switch  o_/ o                         |
//!                      |                        |
//!                      +---- [bank] ------------+
//! ```

use serde::Serialize;

use crate::circuit::{CircuitConfiguration, ConnectionType};

use super::bulb::{BULB_CENTER, BULB_NEGATIVE_TERMINAL, BULB_POSITIVE_TERMINAL};
use super::geometry::{Point, Polyline};
use super::placement::BatteryBank;
use super::switch;
use super::{NEGATIVE_BUS_X, POSITIVE_BUS_X, RIGHT_DETOUR_X};

/// What a wire segment connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "battery", rename_all = "snake_case")]
pub enum WireRole {
    /// Vertical bar joining all negative terminals (parallel only).
    NegativeBus,
    /// Vertical bar joining all positive terminals (parallel only).
    PositiveBus,
    /// Negative bus to one battery (parallel only).
    NegativeStub(usize),
    /// One battery to the positive bus (parallel only).
    PositiveStub(usize),
    /// Positive junction around the right side to the bulb tip.
    BankToBulb,
    /// Bulb casing down the left side to the switch.
    BulbToSwitch,
    /// Switch back to the negative junction.
    SwitchToBank,
}

impl WireRole {
    /// Stable key for renderers that need one per element.
    pub fn key(&self) -> String {
        match self {
            WireRole::NegativeBus => "neg-bus".to_string(),
            WireRole::PositiveBus => "pos-bus".to_string(),
            WireRole::NegativeStub(i) => format!("par-left-{i}"),
            WireRole::PositiveStub(i) => format!("par-right-{i}"),
            WireRole::BankToBulb => "main-pos".to_string(),
            WireRole::BulbToSwitch => "bulb-switch".to_string(),
            WireRole::SwitchToBank => "switch-bat".to_string(),
        }
    }
}

/// One drawn wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireSegment {
    pub role: WireRole,
    pub path: Polyline,
    /// Whether current is shown flowing through this wire.
    pub energized: bool,
    /// Seconds per cycle of the flow animation; `None` when not energized.
    pub flow_period: Option<f64>,
}

/// Animation state shared by every wire in the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowAnimation {
    pub energized: bool,
    pub period: Option<f64>,
}

impl FlowAnimation {
    /// Derive the animation from switch state and loop current.
    ///
    /// A closed switch with zero current stays frozen.
    pub fn new(switch_closed: bool, current: f64) -> Self {
        if switch_closed && current > 0.0 {
            Self {
                energized: true,
                period: Some(1.0 / current),
            }
        } else {
            Self {
                energized: false,
                period: None,
            }
        }
    }
}

/// Route every wire for the configuration.
pub fn route_wires(
    config: &CircuitConfiguration,
    bank: &BatteryBank,
    flow: FlowAnimation,
) -> Vec<WireSegment> {
    let mut paths: Vec<(WireRole, Vec<Point>)> = Vec::new();

    if config.connection() == ConnectionType::Parallel {
        let (top, bottom) = bank.vertical_extent();

        paths.push((
            WireRole::NegativeBus,
            vec![Point::new(NEGATIVE_BUS_X, top), Point::new(NEGATIVE_BUS_X, bottom)],
        ));
        paths.push((
            WireRole::PositiveBus,
            vec![Point::new(POSITIVE_BUS_X, top), Point::new(POSITIVE_BUS_X, bottom)],
        ));

        for (i, battery) in bank.batteries.iter().enumerate() {
            let y = battery.position.y;
            paths.push((
                WireRole::NegativeStub(i),
                vec![Point::new(NEGATIVE_BUS_X, y), battery.negative_edge()],
            ));
            paths.push((
                WireRole::PositiveStub(i),
                vec![battery.positive_edge(), Point::new(POSITIVE_BUS_X, y)],
            ));
        }
    }

    let pos = bank.positive_junction;
    let neg = bank.negative_junction;

    paths.push((
        WireRole::BankToBulb,
        vec![
            pos,
            Point::new(RIGHT_DETOUR_X, pos.y),
            Point::new(RIGHT_DETOUR_X, BULB_CENTER.y),
            BULB_POSITIVE_TERMINAL,
        ],
    ));

    let switch_left = switch::left_terminal();
    paths.push((
        WireRole::BulbToSwitch,
        vec![
            BULB_NEGATIVE_TERMINAL,
            Point::new(switch_left.x, BULB_NEGATIVE_TERMINAL.y),
            switch_left,
        ],
    ));

    let switch_right = switch::right_terminal();
    paths.push((
        WireRole::SwitchToBank,
        vec![switch_right, Point::new(switch_right.x, neg.y), neg],
    ));

    paths
        .into_iter()
        .map(|(role, points)| WireSegment {
            role,
            path: Polyline::new(points),
            energized: flow.energized,
            flow_period: flow.period,
        })
        .collect()
}
