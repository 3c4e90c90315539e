//! Bulb visual parameters.
//!
//! The filament colour runs through three bands as brightness rises:
//!
//! ```text
//!   b < 0.5        rgb(255, 100 + 200b, 0)     orange-red towards orange
//!   0.5 <= b < 1   rgb(255, 255, 100b)         yellow warming to pale
//!   b >= 1         white
//! ```
//!
//! An unlit bulb always has a dim grey filament regardless of brightness.

use serde::Serialize;

use super::geometry::{Point, Rgb};

/// Centre of the glass.
pub const BULB_CENTER: Point = Point::new(200.0, 80.0);

/// Side casing contact, wired towards the switch.
pub const BULB_NEGATIVE_TERMINAL: Point = Point::new(190.0, 95.0);

/// Tip contact, wired towards the positive junction.
pub const BULB_POSITIVE_TERMINAL: Point = Point::new(200.0, 105.0);

/// Filament colour of a dark bulb.
pub const FILAMENT_OFF: Rgb = Rgb::new(0x55, 0x55, 0x55);

const GLOW_BASE_RADIUS: f64 = 15.0;
const GLOW_RADIUS_PER_BRIGHTNESS: f64 = 40.0;
const GLOW_OPACITY_PER_BRIGHTNESS: f64 = 0.6;
const MAX_GLOW_OPACITY: f64 = 0.8;
const GLASS_OPACITY_OFF: f64 = 0.2;
const MAX_GLASS_OPACITY: f64 = 0.9;

/// Everything a renderer needs to draw the bulb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulbVisual {
    pub center: Point,
    pub negative_terminal: Point,
    pub positive_terminal: Point,
    pub lit: bool,
    pub glow_radius: f64,
    pub glow_opacity: f64,
    pub filament: Rgb,
    pub filament_width: f64,
    /// Glass fill tint; warm when lit.
    pub glass: Rgb,
    pub glass_opacity: f64,
}

/// Derive the bulb visual from brightness and whether current flows.
pub fn bulb_visual(brightness: f64, lit: bool) -> BulbVisual {
    let (glow_radius, glow_opacity, glass, glass_opacity, filament_width) = if lit {
        (
            GLOW_BASE_RADIUS + brightness * GLOW_RADIUS_PER_BRIGHTNESS,
            (brightness * GLOW_OPACITY_PER_BRIGHTNESS).min(MAX_GLOW_OPACITY),
            Rgb::new(255, 255, 200),
            (GLASS_OPACITY_OFF + brightness * 0.5).min(MAX_GLASS_OPACITY),
            2.0,
        )
    } else {
        (0.0, 0.0, Rgb::WHITE, GLASS_OPACITY_OFF, 1.0)
    };

    BulbVisual {
        center: BULB_CENTER,
        negative_terminal: BULB_NEGATIVE_TERMINAL,
        positive_terminal: BULB_POSITIVE_TERMINAL,
        lit,
        glow_radius,
        glow_opacity,
        filament: filament_color(brightness, lit),
        filament_width,
        glass,
        glass_opacity,
    }
}

/// Filament colour for a brightness level.
pub fn filament_color(brightness: f64, lit: bool) -> Rgb {
    if !lit {
        return FILAMENT_OFF;
    }
    if brightness < 0.5 {
        Rgb::from_channels(255.0, 100.0 + brightness * 200.0, 0.0)
    } else if brightness < 1.0 {
        Rgb::from_channels(255.0, 255.0, brightness * 100.0)
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_unlit_bulb_is_dark() {
        // Brightness is ignored when the bulb is not lit
        for b in [0.0, 0.7, 1.5] {
            let bulb = bulb_visual(b, false);
            assert!(!bulb.lit);
            assert_relative_eq!(bulb.glow_radius, 0.0);
            assert_relative_eq!(bulb.glow_opacity, 0.0);
            assert_eq!(bulb.filament, FILAMENT_OFF);
            assert_relative_eq!(bulb.filament_width, 1.0);
        }
    }

    #[test]
    fn test_glow_scales_with_brightness() {
        let dim = bulb_visual(0.5, true);
        assert_relative_eq!(dim.glow_radius, 35.0);
        assert_relative_eq!(dim.glow_opacity, 0.3);

        let bright = bulb_visual(1.5, true);
        assert_relative_eq!(bright.glow_radius, 75.0);
        // 1.5 * 0.6 = 0.9 is capped
        assert_relative_eq!(bright.glow_opacity, 0.8);
        assert_relative_eq!(bright.glass_opacity, 0.9);
    }

    #[test]
    fn test_filament_bands() {
        assert_eq!(filament_color(0.25, true), Rgb::new(255, 150, 0));
        assert_eq!(filament_color(0.5, true), Rgb::new(255, 255, 50));
        assert_eq!(filament_color(0.9, true), Rgb::new(255, 255, 90));
        assert_eq!(filament_color(1.0, true), Rgb::WHITE);
        assert_eq!(filament_color(1.5, true), Rgb::WHITE);
    }

    #[test]
    fn test_lit_with_zero_brightness() {
        let bulb = bulb_visual(0.0, true);
        assert_relative_eq!(bulb.glow_radius, 15.0);
        assert_eq!(bulb.filament, Rgb::new(255, 100, 0));
    }
}
