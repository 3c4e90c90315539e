//! Deterministic diagram layout.
//!
//! Turns a configuration and its electrical state into render-agnostic
//! geometry on a fixed 400 x 350 logical canvas:
//!
//! ```text
//!   (0,0) +--------------------------------------+
//!         |              bulb (200,80)           |
//!         |   switch (50..100,150)               |
//!         |            battery bank, y = 250     |
//!         +--------------------------------------+ (400,350)
//! ```
//!
//! Placement depends only on the topology and battery count. The electrical
//! state feeds the flow animation and the bulb's appearance, nothing else.

mod bulb;
mod geometry;
mod placement;
mod switch;
mod wiring;

pub use bulb::{bulb_visual, filament_color, BulbVisual, FILAMENT_OFF};
pub use geometry::{Point, Polyline, Rgb};
pub use placement::{
    place_batteries, BatteryBank, BatteryPlacement, BATTERY_HALF_HEIGHT, BATTERY_HALF_WIDTH,
};
pub use switch::{layout_switch, SwitchArm, SwitchVisual};
pub use wiring::{route_wires, FlowAnimation, WireRole, WireSegment};

use log::debug;
use serde::Serialize;

use crate::circuit::CircuitConfiguration;
use crate::model::ElectricalState;

/// Logical canvas width.
pub const CANVAS_WIDTH: f64 = 400.0;

/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 350.0;

/// Horizontal centre line the bank is laid out around.
pub const CANVAS_CENTER_X: f64 = CANVAS_WIDTH / 2.0;

/// Vertical centre of the battery bank.
pub const BATTERY_ROW_Y: f64 = 250.0;

/// Spacing between series cells.
pub const SERIES_PITCH: f64 = 60.0;

/// Spacing between parallel cells.
pub const PARALLEL_PITCH: f64 = 40.0;

/// Negative bus bar x (parallel only).
pub const NEGATIVE_BUS_X: f64 = 160.0;

/// Positive bus bar x (parallel only).
pub const POSITIVE_BUS_X: f64 = 240.0;

/// The wire from the bank to the bulb runs down this line.
pub const RIGHT_DETOUR_X: f64 = 350.0;

/// Complete drawable description of the circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryDescription {
    pub width: f64,
    pub height: f64,
    pub batteries: Vec<BatteryPlacement>,
    pub wires: Vec<WireSegment>,
    pub switch: SwitchVisual,
    pub bulb: BulbVisual,
}

impl GeometryDescription {
    /// Wires currently showing flow.
    pub fn energized_wires(&self) -> impl Iterator<Item = &WireSegment> {
        self.wires.iter().filter(|w| w.energized)
    }
}

/// Lay out the circuit.
pub fn layout(config: &CircuitConfiguration, electrical: &ElectricalState) -> GeometryDescription {
    let bank = place_batteries(config);
    let flow = FlowAnimation::new(config.switch_closed(), electrical.current);
    let wires = route_wires(config, &bank, flow);

    debug!(
        "laid out {}: {} batteries, {} wires, energized={}",
        config,
        bank.batteries.len(),
        wires.len(),
        flow.energized
    );

    GeometryDescription {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        batteries: bank.batteries,
        wires,
        switch: layout_switch(config.switch_closed()),
        bulb: bulb_visual(electrical.brightness, flow.energized),
    }
}
