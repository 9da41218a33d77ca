//! Per-channel processing chain: low-cut → peak → high-cut
//!
//! The chain is always structurally complete; band bypass is expressed
//! per stage inside the cut cascades, and the peak stage stays in the
//! signal path even at 0 dB (where its design is exactly unity).

use triq_core::Sample;

use crate::biquad::{Biquad, BiquadCoeffs};
use crate::butterworth::CutDesign;
use crate::cascade::CutCascade;
use crate::response::biquad_response;
use crate::{MonoProcessor, Processor};

/// One audio channel's filter chain
#[derive(Debug, Clone, Default)]
pub struct ChannelChain {
    low_cut: CutCascade,
    peak: Biquad,
    high_cut: CutCascade,
}

impl ChannelChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install peak coefficients (whole-object swap)
    #[inline]
    pub fn set_peak(&mut self, coeffs: BiquadCoeffs) {
        self.peak.set_coeffs(coeffs);
    }

    /// Install a low-cut design (prefix activation per cascade rules)
    #[inline]
    pub fn install_low_cut(&mut self, design: &CutDesign) {
        self.low_cut.install(design);
    }

    /// Install a high-cut design
    #[inline]
    pub fn install_high_cut(&mut self, design: &CutDesign) {
        self.high_cut.install(design);
    }

    pub fn low_cut(&self) -> &CutCascade {
        &self.low_cut
    }

    pub fn high_cut(&self) -> &CutCascade {
        &self.high_cut
    }

    pub fn peak_coeffs(&self) -> &BiquadCoeffs {
        self.peak.coeffs()
    }

    /// Complex frequency response of the whole chain at `freq`
    ///
    /// Multiplies the magnitude of every enabled stage across all three
    /// bands and sums their phases. Returns (magnitude, phase in rad).
    pub fn frequency_response(&self, freq: f64, sample_rate: f64) -> (f64, f64) {
        let mut magnitude = 1.0;
        let mut phase = 0.0;

        for coeffs in self.low_cut.active_coeffs() {
            let (mag, ph) = biquad_response(coeffs, freq, sample_rate);
            magnitude *= mag;
            phase += ph;
        }

        let (mag, ph) = biquad_response(self.peak.coeffs(), freq, sample_rate);
        magnitude *= mag;
        phase += ph;

        for coeffs in self.high_cut.active_coeffs() {
            let (mag, ph) = biquad_response(coeffs, freq, sample_rate);
            magnitude *= mag;
            phase += ph;
        }

        (magnitude, phase)
    }
}

impl Processor for ChannelChain {
    fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }
}

impl MonoProcessor for ChannelChain {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let sample = self.low_cut.process_sample(input);
        let sample = self.peak.process_sample(sample);
        self.high_cut.process_sample(sample)
    }
}
