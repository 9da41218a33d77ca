//! triq-dsp: filter-chain engine for a three-band parametric EQ
//!
//! A cascade of second-order IIR (biquad) sections shaping a stereo
//! signal: low-cut → peak → high-cut per channel. Coefficients are
//! redesigned once per block from lock-free parameter cells; the
//! processing path never blocks and never allocates.
//!
//! ## Modules
//! - `biquad` - TDF-II biquad stage and RBJ coefficient formulas
//! - `butterworth` - Butterworth cut-filter design (12..48 dB/oct)
//! - `cascade` - fixed-capacity cut cascade with per-stage bypass
//! - `chain` - per-channel low-cut → peak → high-cut composition
//! - `params` - atomic parameter surface and per-block snapshot
//! - `engine` - stereo engine driving both channel chains
//! - `response` - frequency-response evaluation for display layers

pub mod biquad;
pub mod butterworth;
pub mod cascade;
pub mod chain;
pub mod engine;
pub mod params;
pub mod response;

use triq_core::Sample;

/// Trait for all DSP processors
pub trait Processor: Send + Sync {
    /// Reset processor state
    fn reset(&mut self);

    /// Get latency in samples
    fn latency(&self) -> usize {
        0
    }
}

/// Mono processor trait
pub trait MonoProcessor: Processor {
    /// Process a single sample
    fn process_sample(&mut self, input: Sample) -> Sample;

    /// Process a block of samples
    fn process_block(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

/// Stereo processor trait
pub trait StereoProcessor: Processor {
    /// Process a stereo sample pair
    fn process_sample(&mut self, left: Sample, right: Sample) -> (Sample, Sample);

    /// Process stereo blocks
    fn process_block(&mut self, left: &mut [Sample], right: &mut [Sample]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_sample(*l, *r);
        }
    }
}

/// Processor configuration for sample rate changes
pub trait ProcessorConfig {
    fn set_sample_rate(&mut self, sample_rate: f64);
}
