//! Butterworth cut-filter design
//!
//! A cut band at slope 12/24/36/48 dB/oct is an N-th order Butterworth
//! filter (N = 2 · sections) factored into second-order sections, one
//! per cascade stage. Section Q values come straight from the
//! Butterworth pole angles, so the factorization is deterministic and
//! the sections are emitted in ascending pole-angle order: stage `i`
//! always receives factor `i`.

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};

use crate::biquad::BiquadCoeffs;

/// Maximum number of second-order sections in a cut cascade
pub const MAX_CUT_STAGES: usize = 4;

/// Cut filter slope in dB per octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slope {
    #[default]
    Db12,
    Db24,
    Db36,
    Db48,
}

impl Slope {
    /// Number of biquad sections realizing this slope
    #[inline]
    pub fn sections(self) -> usize {
        match self {
            Slope::Db12 => 1,
            Slope::Db24 => 2,
            Slope::Db36 => 3,
            Slope::Db48 => 4,
        }
    }

    /// Butterworth filter order (always even, two poles per section)
    #[inline]
    pub fn order(self) -> usize {
        2 * self.sections()
    }

    /// Discrete choice index 0..=3, as published by the parameter store
    #[inline]
    pub fn index(self) -> usize {
        self.sections() - 1
    }

    /// Slope from a choice index; out-of-range values saturate to Db48
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Slope::Db12,
            1 => Slope::Db24,
            2 => Slope::Db36,
            _ => Slope::Db48,
        }
    }
}

/// Which side of the spectrum a cut filter removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// Low-cut band (removes lows)
    Highpass,
    /// High-cut band (removes highs)
    Lowpass,
}

/// One cut-band design: up to four second-order sections
///
/// Fixed-size storage so designs can be produced on the audio thread
/// without allocating.
#[derive(Debug, Clone, Copy)]
pub struct CutDesign {
    sections: [BiquadCoeffs; MAX_CUT_STAGES],
    len: usize,
}

impl CutDesign {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn sections(&self) -> &[BiquadCoeffs] {
        &self.sections[..self.len]
    }
}

/// Section Q for pole pair `k` of an order-`n` Butterworth filter
///
/// Poles sit at angles θ_k = π(2k+1)/(2n) past the imaginary axis;
/// each conjugate pair maps to a section with Q = 1/(2·cos θ_k).
#[inline]
fn section_q(order: usize, k: usize) -> f64 {
    let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * order as f64);
    1.0 / (2.0 * theta.cos())
}

/// Design a Butterworth cut cascade
///
/// Returns `slope.sections()` coefficient sets in canonical order. The
/// cutoff is clamped below Nyquist by the section designers; for fixed
/// inputs the output is bit-reproducible.
pub fn design_cut(sample_rate: f64, cutoff: f64, slope: Slope, kind: CutKind) -> CutDesign {
    debug_assert!(sample_rate > 0.0, "sample rate must be positive");

    let order = slope.order();

    let mut sections = [BiquadCoeffs::IDENTITY; MAX_CUT_STAGES];
    let len = slope.sections();
    for (k, section) in sections[..len].iter_mut().enumerate() {
        let q = section_q(order, k);
        *section = match kind {
            CutKind::Highpass => BiquadCoeffs::highpass(cutoff, q, sample_rate),
            CutKind::Lowpass => BiquadCoeffs::lowpass(cutoff, q, sample_rate),
        };
    }

    CutDesign { sections, len }
}
