//! Biquad filter stage using Transposed Direct Form II
//!
//! TDF-II is numerically optimal for floating-point arithmetic,
//! minimizing quantization noise and ensuring stability.

use std::f64::consts::PI;
use triq_core::{db_to_linear, Sample};

use crate::{MonoProcessor, Processor};

/// Fraction of the sample rate a design frequency may not exceed
///
/// Designs at or above Nyquist flip the pole pair outside the unit
/// circle; the designers clamp silently instead of going unstable.
pub(crate) const MAX_FREQ_RATIO: f64 = 0.49;

#[inline]
fn clamp_below_nyquist(freq: f64, sample_rate: f64) -> f64 {
    freq.min(sample_rate * MAX_FREQ_RATIO)
}

/// Normalized biquad coefficients (a0 divided out)
///
/// Replaced wholesale whenever a new design is computed; the transform
/// step never observes a partially written set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Identity transfer function (unity gain, no filtering)
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Second-order Butterworth-section highpass
    pub fn highpass(freq: f64, q: f64, sample_rate: f64) -> Self {
        let freq = clamp_below_nyquist(freq, sample_rate);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 + cos_omega) / 2.0;
        let b1 = -(1.0 + cos_omega);
        let b2 = (1.0 + cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Second-order Butterworth-section lowpass
    pub fn lowpass(freq: f64, q: f64, sample_rate: f64) -> Self {
        let freq = clamp_below_nyquist(freq, sample_rate);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Peaking EQ section centered at `freq` with boost/cut `gain_db`
    ///
    /// At 0 dB the designed transfer function is exactly unity (b == a),
    /// so the stage passes its input through untouched while staying in
    /// the chain.
    pub fn peaking(freq: f64, q: f64, gain_db: f64, sample_rate: f64) -> Self {
        let freq = clamp_below_nyquist(freq, sample_rate);
        let a = db_to_linear(gain_db / 2.0);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = 1.0 + alpha * a;
        let b1 = -2.0 * cos_omega;
        let b2 = 1.0 - alpha * a;
        let a0 = 1.0 + alpha / a;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha / a;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transposed Direct Form II biquad stage
///
/// Holds one coefficient set and two delay-state samples. State
/// persists across blocks; coefficients may be swapped between blocks.
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    z1: f64,
    z2: f64,
}

impl Biquad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly designed coefficient set (whole-object swap)
    #[inline]
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    #[inline]
    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }
}

impl Processor for Biquad {
    fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

impl MonoProcessor for Biquad {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let output = self.coeffs.b0 * input + self.z1;
        self.z1 = self.coeffs.b1 * input - self.coeffs.a1 * output + self.z2;
        self.z2 = self.coeffs.b2 * input - self.coeffs.a2 * output;
        output
    }
}
