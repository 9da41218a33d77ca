//! Frequency-response evaluation
//!
//! Pure helpers for display layers: they read coefficient sets and
//! never touch filter state, so they are safe to call from a UI thread
//! against a snapshot of the current design.

use std::f64::consts::PI;
use triq_core::linear_to_db;

use crate::biquad::BiquadCoeffs;
use crate::chain::ChannelChain;

/// Evaluate one biquad's response at `freq`
///
/// Evaluates H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
/// at z = e^(jω), ω = 2πf/fs. Returns (magnitude, phase in radians).
pub fn biquad_response(coeffs: &BiquadCoeffs, freq: f64, sample_rate: f64) -> (f64, f64) {
    let omega = 2.0 * PI * freq / sample_rate;
    let cos_w = omega.cos();
    let sin_w = omega.sin();
    let cos_2w = (2.0 * omega).cos();
    let sin_2w = (2.0 * omega).sin();

    // z^-1 = cos(ω) - j·sin(ω), z^-2 = cos(2ω) - j·sin(2ω)
    let num_real = coeffs.b0 + coeffs.b1 * cos_w + coeffs.b2 * cos_2w;
    let num_imag = -coeffs.b1 * sin_w - coeffs.b2 * sin_2w;

    let den_real = 1.0 + coeffs.a1 * cos_w + coeffs.a2 * cos_2w;
    let den_imag = -coeffs.a1 * sin_w - coeffs.a2 * sin_2w;

    let den_mag_sq = den_real * den_real + den_imag * den_imag;

    let h_real = (num_real * den_real + num_imag * den_imag) / den_mag_sq;
    let h_imag = (num_imag * den_real - num_real * den_imag) / den_mag_sq;

    let magnitude = (h_real * h_real + h_imag * h_imag).sqrt();
    let phase = h_imag.atan2(h_real);

    (magnitude, phase)
}

/// Log-spaced magnitude curve over 20 Hz – 20 kHz for display
///
/// Returns (frequency, magnitude in dB) pairs covering the full
/// audible range.
pub fn response_curve(
    chain: &ChannelChain,
    sample_rate: f64,
    num_points: usize,
) -> Vec<(f64, f64)> {
    let mut curve = Vec::with_capacity(num_points);
    if num_points == 0 {
        return curve;
    }

    let log_min = 20.0_f64.log10();
    let log_max = 20000.0_f64.log10();

    for i in 0..num_points {
        let t = i as f64 / (num_points - 1).max(1) as f64;
        let freq = 10.0_f64.powf(log_min + t * (log_max - log_min));
        let (mag, _phase) = chain.frequency_response(freq, sample_rate);
        curve.push((freq, linear_to_db(mag)));
    }

    curve
}
