//! Sample type and level conversions

/// Type alias for audio samples (always f64 for maximum precision)
pub type Sample = f64;

/// Convert decibels to linear gain
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear gain to decibels
///
/// Values at or below zero map to -120 dB (silence floor).
#[inline]
pub fn linear_to_db(gain: f64) -> f64 {
    if gain > 0.0 {
        20.0 * gain.log10()
    } else {
        -120.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_db_roundtrip() {
        for db in [-36.0, -6.0, 0.0, 6.0, 36.0] {
            assert_relative_eq!(linear_to_db(db_to_linear(db)), db, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unity_gain() {
        assert_eq!(db_to_linear(0.0), 1.0);
    }

    #[test]
    fn test_silence_floor() {
        assert_eq!(linear_to_db(0.0), -120.0);
        assert_eq!(linear_to_db(-1.0), -120.0);
    }
}
