//! Battery placement.
//!
//! Series cells sit in one horizontal row and touch end to end, so the outer
//! edges of the row are the loop's junctions. Parallel cells are stacked
//! vertically between two bus bars and the junctions sit on the bars at the
//! stack's centre line.

use serde::Serialize;

use crate::circuit::{CircuitConfiguration, ConnectionType};
use crate::model::CELL_VOLTAGE;

use super::geometry::Point;
use super::{
    BATTERY_ROW_Y, CANVAS_CENTER_X, NEGATIVE_BUS_X, PARALLEL_PITCH, POSITIVE_BUS_X, SERIES_PITCH,
};

/// Half-extent of the battery body along its axis.
pub const BATTERY_HALF_WIDTH: f64 = 25.0;

/// Half-extent of the battery body across its axis.
pub const BATTERY_HALF_HEIGHT: f64 = 15.0;

/// One cell on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryPlacement {
    /// Centre of the battery body.
    pub position: Point,
    /// Body extent along the cell axis.
    pub width: f64,
    /// Body extent across the cell axis.
    pub height: f64,
    /// Text printed on the body.
    pub label: String,
}

impl BatteryPlacement {
    fn new(position: Point) -> Self {
        Self {
            position,
            width: 2.0 * BATTERY_HALF_WIDTH,
            height: 2.0 * BATTERY_HALF_HEIGHT,
            label: cell_label(),
        }
    }

    /// Left (negative) edge of the body.
    pub fn negative_edge(&self) -> Point {
        self.position.offset(-BATTERY_HALF_WIDTH, 0.0)
    }

    /// Right (positive) edge of the body.
    pub fn positive_edge(&self) -> Point {
        self.position.offset(BATTERY_HALF_WIDTH, 0.0)
    }
}

fn cell_label() -> String {
    format!("{CELL_VOLTAGE:.1}V")
}

/// The placed battery bank and its connection points to the main loop.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryBank {
    pub batteries: Vec<BatteryPlacement>,
    /// Where the loop leaves the bank towards the switch.
    pub negative_junction: Point,
    /// Where the loop leaves the bank towards the bulb.
    pub positive_junction: Point,
}

impl BatteryBank {
    /// Top and bottom battery centres on the y axis.
    pub fn vertical_extent(&self) -> (f64, f64) {
        let top = self.batteries.first().map_or(BATTERY_ROW_Y, |b| b.position.y);
        let bottom = self.batteries.last().map_or(BATTERY_ROW_Y, |b| b.position.y);
        (top, bottom)
    }
}

/// Place every cell for the configuration.
pub fn place_batteries(config: &CircuitConfiguration) -> BatteryBank {
    let n = config.battery_count() as usize;

    match config.connection() {
        ConnectionType::Series => {
            let total_width = n as f64 * SERIES_PITCH;
            let start_x = CANVAS_CENTER_X - total_width / 2.0 + SERIES_PITCH / 2.0;

            let batteries = (0..n)
                .map(|i| {
                    let x = start_x + i as f64 * SERIES_PITCH;
                    BatteryPlacement::new(Point::new(x, BATTERY_ROW_Y))
                })
                .collect();

            BatteryBank {
                batteries,
                negative_junction: Point::new(CANVAS_CENTER_X - total_width / 2.0, BATTERY_ROW_Y),
                positive_junction: Point::new(CANVAS_CENTER_X + total_width / 2.0, BATTERY_ROW_Y),
            }
        }

        ConnectionType::Parallel => {
            let start_y = BATTERY_ROW_Y - (n.saturating_sub(1)) as f64 * PARALLEL_PITCH / 2.0;

            let batteries = (0..n)
                .map(|i| {
                    let y = start_y + i as f64 * PARALLEL_PITCH;
                    BatteryPlacement::new(Point::new(CANVAS_CENTER_X, y))
                })
                .collect();

            BatteryBank {
                batteries,
                negative_junction: Point::new(NEGATIVE_BUS_X, BATTERY_ROW_Y),
                positive_junction: Point::new(POSITIVE_BUS_X, BATTERY_ROW_Y),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn bank(n: u32, connection: ConnectionType) -> BatteryBank {
        place_batteries(&CircuitConfiguration::new(n, connection, true).unwrap())
    }

    #[test]
    fn test_series_row_is_centered() {
        let bank = bank(2, ConnectionType::Series);
        let xs: Vec<f64> = bank.batteries.iter().map(|b| b.position.x).collect();
        assert_eq!(xs, vec![170.0, 230.0]);
        assert!(bank.batteries.iter().all(|b| b.position.y == 250.0));
        assert_eq!(bank.negative_junction, Point::new(140.0, 250.0));
        assert_eq!(bank.positive_junction, Point::new(260.0, 250.0));
    }

    #[test]
    fn test_series_single_cell() {
        let bank = bank(1, ConnectionType::Series);
        assert_eq!(bank.batteries[0].position, Point::new(200.0, 250.0));
        assert_eq!(bank.negative_junction.x, 170.0);
        assert_eq!(bank.positive_junction.x, 230.0);
    }

    #[test]
    fn test_parallel_stack_is_centered() {
        let bank = bank(3, ConnectionType::Parallel);
        let ys: Vec<f64> = bank.batteries.iter().map(|b| b.position.y).collect();
        assert_eq!(ys, vec![210.0, 250.0, 290.0]);
        assert!(bank.batteries.iter().all(|b| b.position.x == 200.0));
        assert_eq!(bank.vertical_extent(), (210.0, 290.0));
        assert_eq!(bank.negative_junction, Point::new(160.0, 250.0));
        assert_eq!(bank.positive_junction, Point::new(240.0, 250.0));
    }

    #[test]
    fn test_placement_count_matches_configuration() {
        for n in 1..=6 {
            for connection in [ConnectionType::Series, ConnectionType::Parallel] {
                assert_eq!(bank(n, connection).batteries.len(), n as usize);
            }
        }
    }

    #[test]
    fn test_series_junctions_sit_past_cell_edges() {
        let bank = bank(3, ConnectionType::Series);
        let first = bank.batteries.first().unwrap();
        let last = bank.batteries.last().unwrap();
        // The body is narrower than the pitch; the gap is the terminal nub
        assert_relative_eq!(first.negative_edge().x - bank.negative_junction.x, 5.0);
        assert_relative_eq!(bank.positive_junction.x - last.positive_edge().x, 5.0);
    }

    #[test]
    fn test_labels() {
        let bank = bank(2, ConnectionType::Parallel);
        assert!(bank.batteries.iter().all(|b| b.label == "1.5V"));
    }

    #[test]
    fn test_body_extents() {
        for connection in [ConnectionType::Series, ConnectionType::Parallel] {
            for battery in &bank(2, connection).batteries {
                assert_relative_eq!(battery.width, 50.0);
                assert_relative_eq!(battery.height, 30.0);
                let span = battery.positive_edge().x - battery.negative_edge().x;
                assert_relative_eq!(span, battery.width);
            }
        }
    }
}
