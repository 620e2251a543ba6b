//! Coordinate sanity checks.
//!
//! Distinguishes hard errors (out-of-range or non-finite values, which make
//! a coordinate unusable) from soft warnings (suspicious-but-usable values
//! such as Null Island or whole-number rounding). All rules run
//! independently; every applicable rule contributes a message.

/// Result of validating a latitude/longitude pair.
#[derive(Debug, Clone)]
pub struct CoordinateCheck {
    /// True iff no hard (range/finiteness) error was recorded. Soft
    /// warnings never flip this to false.
    pub valid: bool,
    /// All messages, hard errors and soft warnings, in rule order.
    pub errors: Vec<String>,
}

/// Validates a coordinate pair, collecting every applicable message.
#[must_use]
pub fn validate(latitude: f64, longitude: f64) -> CoordinateCheck {
    let mut errors = Vec::new();
    let mut hard_errors = 0usize;

    if !latitude.is_finite() || !longitude.is_finite() {
        errors.push("coordinates must be finite numbers".to_string());
        hard_errors += 1;
    }

    if !(-90.0..=90.0).contains(&latitude) {
        errors.push(format!(
            "invalid latitude: {latitude} (must be between -90 and 90)"
        ));
        hard_errors += 1;
    }

    if !(-180.0..=180.0).contains(&longitude) {
        errors.push(format!(
            "invalid longitude: {longitude} (must be between -180 and 180)"
        ));
        hard_errors += 1;
    }

    if latitude == 0.0 && longitude == 0.0 {
        errors.push("Null Island coordinates (0, 0) - likely default/error value".to_string());
    }

    if latitude.is_finite()
        && longitude.is_finite()
        && latitude.fract() == 0.0
        && longitude.fract() == 0.0
    {
        errors.push(
            "coordinates rounded to whole numbers - possible low GPS accuracy".to_string(),
        );
    }

    CoordinateCheck {
        valid: hard_errors == 0,
        errors,
    }
}
