//! Stereo equalizer engine
//!
//! Owns both channel chains and drives the block-synchronous update
//! protocol: once per block the engine snapshots the parameter store,
//! redesigns all coefficients, installs them identically into the left
//! and right chains, then runs each channel's samples through its
//! chain. The processing path never blocks and never allocates.

use std::sync::Arc;

use log::{debug, error, warn};
use triq_core::{EqError, EqResult, Sample};

use crate::biquad::BiquadCoeffs;
use crate::butterworth::{design_cut, CutKind};
use crate::chain::ChannelChain;
use crate::params::{ChainSettings, EqParams};
use crate::response::response_curve;
use crate::{MonoProcessor, Processor, ProcessorConfig};

/// Three-band stereo equalizer
///
/// Left and right always receive identical coefficients; the EQ is
/// stereo-linked by contract, not as an optimization.
pub struct EqEngine {
    params: Arc<EqParams>,
    left: ChannelChain,
    right: ChannelChain,
    sample_rate: f64,
    max_block_size: usize,
    prepared: bool,
}

impl EqEngine {
    pub fn new(params: Arc<EqParams>) -> Self {
        Self {
            params,
            left: ChannelChain::new(),
            right: ChannelChain::new(),
            sample_rate: 0.0,
            max_block_size: 0,
            prepared: false,
        }
    }

    pub fn params(&self) -> &Arc<EqParams> {
        &self.params
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Prepare for playback at the given rate and maximum block size
    ///
    /// Must be called before the first `process_block` and again
    /// whenever the host changes either value. Zeroes all filter state
    /// and runs a full design pass so the first block starts from
    /// fresh, consistent coefficients.
    pub fn initialize(&mut self, sample_rate: f64, max_block_size: usize) -> EqResult<()> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(EqError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(EqError::InvalidBlockSize(max_block_size));
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.left.reset();
        self.right.reset();

        let settings = self.params.snapshot();
        self.update_filters(&settings);
        self.prepared = true;

        debug!("eq engine initialized: {sample_rate} Hz, max block {max_block_size}");
        Ok(())
    }

    /// Redesign and install all coefficients from one settings snapshot
    ///
    /// Each coefficient set is built once and installed into both
    /// chains as a whole-object swap.
    fn update_filters(&mut self, settings: &ChainSettings) {
        let peak = BiquadCoeffs::peaking(
            settings.peak_freq,
            settings.peak_quality,
            settings.peak_gain_db,
            self.sample_rate,
        );
        self.left.set_peak(peak);
        self.right.set_peak(peak);

        let low_cut = design_cut(
            self.sample_rate,
            settings.low_cut_freq,
            settings.low_cut_slope,
            CutKind::Highpass,
        );
        self.left.install_low_cut(&low_cut);
        self.right.install_low_cut(&low_cut);

        let high_cut = design_cut(
            self.sample_rate,
            settings.high_cut_freq,
            settings.high_cut_slope,
            CutKind::Lowpass,
        );
        self.left.install_high_cut(&high_cut);
        self.right.install_high_cut(&high_cut);
    }

    /// Process one stereo block in place
    ///
    /// Real-time safe: no locks, no allocation, no suspension. Contract
    /// violations fail loudly in debug builds and degrade to a guarded
    /// no-op or truncated block in release.
    pub fn process_block(&mut self, left: &mut [Sample], right: &mut [Sample]) {
        debug_assert!(self.prepared, "process_block called before initialize");
        debug_assert_eq!(left.len(), right.len(), "stereo buffers must match");
        debug_assert!(
            left.len() <= self.max_block_size,
            "block exceeds negotiated maximum"
        );

        if !self.prepared {
            error!("process_block called before initialize; ignoring block");
            return;
        }

        let len = left.len().min(right.len());
        if len < left.len().max(right.len()) {
            warn!(
                "mismatched stereo buffers ({} vs {}), truncating",
                left.len(),
                right.len()
            );
        }

        let settings = self.params.snapshot();
        self.update_filters(&settings);

        self.left.process_block(&mut left[..len]);
        self.right.process_block(&mut right[..len]);
    }

    /// Magnitude curve of the current design for a display layer
    ///
    /// Both chains carry identical coefficients, so the left chain
    /// stands in for the whole EQ.
    pub fn response_curve(&self, num_points: usize) -> Vec<(f64, f64)> {
        response_curve(&self.left, self.sample_rate, num_points)
    }
}

impl Processor for EqEngine {
    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

impl ProcessorConfig for EqEngine {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        let max_block = self.max_block_size.max(1);
        if let Err(err) = self.initialize(sample_rate, max_block) {
            error!("sample rate change rejected: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::butterworth::Slope;

    const SAMPLE_RATE: f64 = 48000.0;
    const BLOCK_SIZE: usize = 256;

    fn sine(len: usize, freq: f64) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / SAMPLE_RATE).sin())
            .collect()
    }

    #[test]
    fn test_initialize_rejects_bad_contract() {
        let mut engine = EqEngine::new(Arc::new(EqParams::new()));
        assert!(engine.initialize(0.0, BLOCK_SIZE).is_err());
        assert!(engine.initialize(-48000.0, BLOCK_SIZE).is_err());
        assert!(engine.initialize(f64::NAN, BLOCK_SIZE).is_err());
        assert!(engine.initialize(SAMPLE_RATE, 0).is_err());
        assert!(engine.initialize(SAMPLE_RATE, BLOCK_SIZE).is_ok());
    }

    #[test]
    fn test_stereo_coherence() {
        let params = Arc::new(EqParams::new());
        params.set_low_cut_freq(100.0);
        params.set_low_cut_slope(Slope::Db24);
        params.set_peak_freq(1000.0);
        params.set_peak_gain_db(6.0);
        params.set_high_cut_freq(10000.0);

        let mut engine = EqEngine::new(params);
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let mut left = sine(BLOCK_SIZE * 8, 440.0);
        let mut right = left.clone();
        for i in (0..left.len()).step_by(BLOCK_SIZE) {
            let end = i + BLOCK_SIZE;
            engine.process_block(&mut left[i..end], &mut right[i..end]);
        }

        // Identical input and identical coefficients: bit-identical output
        for (l, r) in left.iter().zip(right.iter()) {
            assert_eq!(l, r);
        }
    }

    #[test]
    fn test_default_params_near_identity() {
        // Defaults: cuts at the range edges, peak at 0 dB. The cut
        // bands still filter at 20 Hz / 20 kHz but a mid-band tone
        // passes essentially untouched.
        let mut engine = EqEngine::new(Arc::new(EqParams::new()));
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let input = sine(BLOCK_SIZE * 20, 1000.0);
        let mut left = input.clone();
        let mut right = input.clone();
        for i in (0..left.len()).step_by(BLOCK_SIZE) {
            let end = i + BLOCK_SIZE;
            engine.process_block(&mut left[i..end], &mut right[i..end]);
        }

        // Compare steady-state peak amplitude
        let settle = BLOCK_SIZE * 4;
        let peak_out = left[settle..].iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
        assert!((peak_out - 1.0).abs() < 0.01, "peak {peak_out}");
    }

    #[test]
    fn test_reinitialize_resets_state() {
        let mut engine = EqEngine::new(Arc::new(EqParams::new()));
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let mut left = sine(BLOCK_SIZE, 440.0);
        let mut right = left.clone();
        engine.process_block(&mut left, &mut right);

        engine.initialize(96000.0, BLOCK_SIZE).unwrap();
        assert_eq!(engine.sample_rate(), 96000.0);

        // After re-init, zero input produces exactly zero output
        let mut zeros_l = vec![0.0; BLOCK_SIZE];
        let mut zeros_r = vec![0.0; BLOCK_SIZE];
        engine.process_block(&mut zeros_l, &mut zeros_r);
        assert!(zeros_l.iter().all(|&x| x == 0.0));
        assert!(zeros_r.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_parameter_change_between_blocks_stays_finite() {
        let params = Arc::new(EqParams::new());
        let mut engine = EqEngine::new(params.clone());
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let mut left = sine(BLOCK_SIZE * 16, 440.0);
        let mut right = left.clone();
        for (n, i) in (0..left.len()).step_by(BLOCK_SIZE).enumerate() {
            // Editor thread sweeping parameters between blocks
            params.set_peak_gain_db(-36.0 + 9.0 * n as f64);
            params.set_low_cut_freq(20.0 + 100.0 * n as f64);
            params.set_low_cut_slope(Slope::from_index(n % 4));

            let end = i + BLOCK_SIZE;
            engine.process_block(&mut left[i..end], &mut right[i..end]);
        }

        assert!(left.iter().all(|x| x.is_finite()));
        assert!(right.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_reset_and_rate_change_via_traits() {
        let mut engine = EqEngine::new(Arc::new(EqParams::new()));
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let mut left = sine(BLOCK_SIZE, 440.0);
        let mut right = left.clone();
        engine.process_block(&mut left, &mut right);

        Processor::reset(&mut engine);
        assert_eq!(engine.sample_rate(), SAMPLE_RATE);

        ProcessorConfig::set_sample_rate(&mut engine, 44100.0);
        assert_eq!(engine.sample_rate(), 44100.0);

        let mut zeros_l = vec![0.0; BLOCK_SIZE];
        let mut zeros_r = vec![0.0; BLOCK_SIZE];
        engine.process_block(&mut zeros_l, &mut zeros_r);
        assert!(zeros_l.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_response_curve_reflects_settings() {
        let params = Arc::new(EqParams::new());
        params.set_peak_freq(1000.0);
        params.set_peak_gain_db(12.0);

        let mut engine = EqEngine::new(params);
        engine.initialize(SAMPLE_RATE, BLOCK_SIZE).unwrap();

        let curve = engine.response_curve(256);
        let near_1k = curve
            .iter()
            .min_by(|a, b| {
                (a.0 - 1000.0).abs().partial_cmp(&(b.0 - 1000.0).abs()).unwrap()
            })
            .unwrap();
        assert!((near_1k.1 - 12.0).abs() < 0.5, "got {} dB", near_1k.1);
    }
}
