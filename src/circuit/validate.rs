//! Configuration validation.
//!
//! The model accepts between one and [`MAX_BATTERY_COUNT`] cells. Hosts that hand us
//! untyped numbers (JavaScript, JSON) go through [`battery_count_from_f64`]
//! so that negative, fractional and non-finite inputs are rejected rather
//! than silently rounded.

use crate::error::{BulbLabError, Result};

/// Largest bank the layout will place.
pub const MAX_BATTERY_COUNT: u32 = 64;

/// Validate a battery count.
///
/// Checks:
/// - At least one cell is present
/// - No more than [`MAX_BATTERY_COUNT`] cells
pub fn validate_battery_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(BulbLabError::invalid_battery_count(
            count,
            "at least one battery is required",
        ));
    }
    if count > MAX_BATTERY_COUNT {
        return Err(BulbLabError::invalid_battery_count(
            count,
            format!("at most {MAX_BATTERY_COUNT} batteries are supported"),
        ));
    }
    Ok(())
}

/// Convert a loosely typed host number into a validated battery count.
pub fn battery_count_from_f64(value: f64) -> Result<u32> {
    if !value.is_finite() {
        return Err(BulbLabError::invalid_battery_count(value, "must be a finite number"));
    }
    if value.fract() != 0.0 {
        return Err(BulbLabError::invalid_battery_count(value, "must be a whole number"));
    }
    if value < 1.0 {
        return Err(BulbLabError::invalid_battery_count(
            value,
            "at least one battery is required",
        ));
    }
    if value > f64::from(MAX_BATTERY_COUNT) {
        return Err(BulbLabError::invalid_battery_count(
            value,
            format!("at most {MAX_BATTERY_COUNT} batteries are supported"),
        ));
    }

    let count = value as u32;
    validate_battery_count(count)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_accepts_whole_positive() {
        assert_eq!(battery_count_from_f64(1.0).unwrap(), 1);
        assert_eq!(battery_count_from_f64(3.0).unwrap(), 3);
    }

    #[test]
    fn test_from_f64_rejects_out_of_domain() {
        for bad in [0.0, -1.0, 2.5, f64::NAN, f64::INFINITY, 1e12, 2_000_000_000.0] {
            assert!(
                matches!(
                    battery_count_from_f64(bad),
                    Err(BulbLabError::InvalidBatteryCount { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_upper_bound() {
        assert!(validate_battery_count(MAX_BATTERY_COUNT).is_ok());
        assert!(validate_battery_count(MAX_BATTERY_COUNT + 1).is_err());
        assert!(validate_battery_count(u32::MAX).is_err());

        let max = f64::from(MAX_BATTERY_COUNT);
        assert_eq!(battery_count_from_f64(max).unwrap(), MAX_BATTERY_COUNT);
        assert!(matches!(
            battery_count_from_f64(max + 1.0),
            Err(BulbLabError::InvalidBatteryCount { .. })
        ));
    }
}
