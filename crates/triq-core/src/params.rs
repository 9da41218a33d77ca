//! Parameter primitives for audio processors
//!
//! The editor thread writes parameter values at arbitrary times; the
//! audio thread reads them once per block. Each parameter is a single
//! atomic cell, so neither side ever takes a lock.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic parameter for lock-free access
///
/// Stores an f64 as raw bits in an `AtomicU64`. Single writer, single
/// reader; relaxed ordering is sufficient because each parameter is
/// independent and a block-stale value is acceptable.
#[derive(Debug)]
pub struct AtomicParam {
    bits: AtomicU64,
}

impl AtomicParam {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Parameter range specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub skew: ParamSkew,
}

impl ParamRange {
    pub fn linear(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Linear,
        }
    }

    pub fn logarithmic(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            skew: ParamSkew::Logarithmic,
        }
    }

    /// Clamp a value into this range
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// Denormalize a 0-1 value to actual value
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let n = normalized.clamp(0.0, 1.0);
        match self.skew {
            ParamSkew::Linear => self.min + n * (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (log_min + n * (log_max - log_min)).exp()
            }
            ParamSkew::Exponential(exp) => self.min + n.powf(exp) * (self.max - self.min),
        }
    }

    /// Normalize an actual value to 0-1
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        match self.skew {
            ParamSkew::Linear => (clamped - self.min) / (self.max - self.min),
            ParamSkew::Logarithmic => {
                let log_min = self.min.ln();
                let log_max = self.max.ln();
                (clamped.ln() - log_min) / (log_max - log_min)
            }
            ParamSkew::Exponential(exp) => {
                ((clamped - self.min) / (self.max - self.min)).powf(1.0 / exp)
            }
        }
    }
}

/// Parameter skew type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ParamSkew {
    Linear,
    Logarithmic,
    Exponential(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atomic_param_roundtrip() {
        let p = AtomicParam::new(750.0);
        assert_eq!(p.get(), 750.0);
        p.set(-36.0);
        assert_eq!(p.get(), -36.0);
    }

    #[test]
    fn test_linear_range() {
        let r = ParamRange::linear(-36.0, 36.0, 0.0);
        assert_relative_eq!(r.denormalize(0.5), 0.0);
        assert_relative_eq!(r.normalize(18.0), 0.75);
    }

    #[test]
    fn test_log_range_midpoint() {
        let r = ParamRange::logarithmic(20.0, 20000.0, 750.0);
        // Geometric midpoint of 20..20000 is ~632.5 Hz
        assert_relative_eq!(r.denormalize(0.5), (20.0_f64 * 20000.0).sqrt(), epsilon = 1e-9);
        assert_relative_eq!(r.normalize(r.denormalize(0.25)), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_rejects_non_finite() {
        let r = ParamRange::linear(0.1, 10.0, 1.0);
        assert_eq!(r.clamp(f64::NAN), 1.0);
        assert_eq!(r.clamp(f64::INFINITY), 1.0);
        assert_eq!(r.clamp(50.0), 10.0);
    }
}
