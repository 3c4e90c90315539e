//! Knife switch geometry.

use serde::Serialize;

use super::geometry::Point;

/// Pivot of the arm; also the left terminal.
pub const SWITCH_PIVOT: Point = Point::new(50.0, 150.0);

/// Distance between the two terminals.
pub const SWITCH_SPAN: f64 = 50.0;

/// Arm tip offset from the pivot when open.
const OPEN_TIP_OFFSET: (f64, f64) = (45.0, -25.0);

/// The two states the arm can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchArm {
    /// Arm lies flat across both terminals.
    Closed,
    /// Arm is lifted off the right terminal.
    Open,
}

impl SwitchArm {
    /// Arm state for a switch position.
    pub fn from_closed(closed: bool) -> Self {
        if closed {
            SwitchArm::Closed
        } else {
            SwitchArm::Open
        }
    }

    /// Tip offset from the pivot.
    fn tip_offset(&self) -> (f64, f64) {
        match self {
            SwitchArm::Closed => (SWITCH_SPAN, 0.0),
            SwitchArm::Open => OPEN_TIP_OFFSET,
        }
    }

    /// Arm angle in degrees, measured from the terminal axis (negative is up).
    pub fn angle_degrees(&self) -> f64 {
        let (dx, dy) = self.tip_offset();
        dy.atan2(dx).to_degrees()
    }
}

/// The switch as placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchVisual {
    pub pivot: Point,
    pub left_terminal: Point,
    pub right_terminal: Point,
    pub arm: SwitchArm,
    /// Where the arm's free end is drawn.
    pub arm_tip: Point,
    pub arm_angle_degrees: f64,
}

/// Lay out the switch for a given position.
pub fn layout_switch(closed: bool) -> SwitchVisual {
    let arm = SwitchArm::from_closed(closed);
    let (dx, dy) = arm.tip_offset();

    SwitchVisual {
        pivot: SWITCH_PIVOT,
        left_terminal: left_terminal(),
        right_terminal: right_terminal(),
        arm,
        arm_tip: SWITCH_PIVOT.offset(dx, dy),
        arm_angle_degrees: arm.angle_degrees(),
    }
}

/// Left terminal, wired towards the bulb.
pub fn left_terminal() -> Point {
    SWITCH_PIVOT
}

/// Right terminal, wired towards the battery bank.
pub fn right_terminal() -> Point {
    SWITCH_PIVOT.offset(SWITCH_SPAN, 0.0)
}
