//! Parameter surface of the equalizer
//!
//! Seven independently atomic values written by the editor thread and
//! read once per block by the engine. A snapshot may mix values from
//! slightly different moments (torn across fields); that costs at most
//! one block of combined settings and self-corrects on the next.

use serde::{Deserialize, Serialize};
use triq_core::{AtomicParam, ParamRange};

use crate::butterworth::Slope;

/// Immutable per-block snapshot of all control parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainSettings {
    pub low_cut_freq: f64,
    pub high_cut_freq: f64,
    pub peak_freq: f64,
    pub peak_gain_db: f64,
    pub peak_quality: f64,
    pub low_cut_slope: Slope,
    pub high_cut_slope: Slope,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            low_cut_freq: 20.0,
            high_cut_freq: 20000.0,
            peak_freq: 750.0,
            peak_gain_db: 0.0,
            peak_quality: 1.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
        }
    }
}

/// Lock-free parameter store shared between editor and audio threads
///
/// Values are clamped to their declared ranges on write, so the audio
/// thread never has to validate.
#[derive(Debug)]
pub struct EqParams {
    low_cut_freq: AtomicParam,
    high_cut_freq: AtomicParam,
    peak_freq: AtomicParam,
    peak_gain_db: AtomicParam,
    peak_quality: AtomicParam,
    low_cut_slope: AtomicParam,
    high_cut_slope: AtomicParam,
}

impl EqParams {
    /// Low-cut frequency range: 20 Hz – 20 kHz, logarithmic, default 20
    pub fn low_cut_freq_range() -> ParamRange {
        ParamRange::logarithmic(20.0, 20000.0, 20.0)
    }

    /// High-cut frequency range: 20 Hz – 20 kHz, logarithmic, default 20 kHz
    pub fn high_cut_freq_range() -> ParamRange {
        ParamRange::logarithmic(20.0, 20000.0, 20000.0)
    }

    /// Peak frequency range: 20 Hz – 20 kHz, logarithmic, default 750
    pub fn peak_freq_range() -> ParamRange {
        ParamRange::logarithmic(20.0, 20000.0, 750.0)
    }

    /// Peak gain range: −36 .. +36 dB, default 0
    pub fn peak_gain_range() -> ParamRange {
        ParamRange::linear(-36.0, 36.0, 0.0)
    }

    /// Peak quality range: 0.1 .. 10, default 1.0
    pub fn peak_quality_range() -> ParamRange {
        ParamRange::linear(0.1, 10.0, 1.0)
    }

    pub fn new() -> Self {
        let defaults = ChainSettings::default();
        Self {
            low_cut_freq: AtomicParam::new(defaults.low_cut_freq),
            high_cut_freq: AtomicParam::new(defaults.high_cut_freq),
            peak_freq: AtomicParam::new(defaults.peak_freq),
            peak_gain_db: AtomicParam::new(defaults.peak_gain_db),
            peak_quality: AtomicParam::new(defaults.peak_quality),
            low_cut_slope: AtomicParam::new(defaults.low_cut_slope.index() as f64),
            high_cut_slope: AtomicParam::new(defaults.high_cut_slope.index() as f64),
        }
    }

    pub fn set_low_cut_freq(&self, freq: f64) {
        self.low_cut_freq.set(Self::low_cut_freq_range().clamp(freq));
    }

    pub fn set_high_cut_freq(&self, freq: f64) {
        self.high_cut_freq.set(Self::high_cut_freq_range().clamp(freq));
    }

    pub fn set_peak_freq(&self, freq: f64) {
        self.peak_freq.set(Self::peak_freq_range().clamp(freq));
    }

    pub fn set_peak_gain_db(&self, gain_db: f64) {
        self.peak_gain_db.set(Self::peak_gain_range().clamp(gain_db));
    }

    pub fn set_peak_quality(&self, quality: f64) {
        self.peak_quality.set(Self::peak_quality_range().clamp(quality));
    }

    pub fn set_low_cut_slope(&self, slope: Slope) {
        self.low_cut_slope.set(slope.index() as f64);
    }

    pub fn set_high_cut_slope(&self, slope: Slope) {
        self.high_cut_slope.set(slope.index() as f64);
    }

    /// Read every cell once and freeze the result for one block
    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings {
            low_cut_freq: self.low_cut_freq.get(),
            high_cut_freq: self.high_cut_freq.get(),
            peak_freq: self.peak_freq.get(),
            peak_gain_db: self.peak_gain_db.get(),
            peak_quality: self.peak_quality.get(),
            low_cut_slope: Slope::from_index(self.low_cut_slope.get() as usize),
            high_cut_slope: Slope::from_index(self.high_cut_slope.get() as usize),
        }
    }

    /// Restore every parameter to its declared default
    pub fn reset_to_defaults(&self) {
        let defaults = ChainSettings::default();
        self.set_low_cut_freq(defaults.low_cut_freq);
        self.set_high_cut_freq(defaults.high_cut_freq);
        self.set_peak_freq(defaults.peak_freq);
        self.set_peak_gain_db(defaults.peak_gain_db);
        self.set_peak_quality(defaults.peak_quality);
        self.set_low_cut_slope(defaults.low_cut_slope);
        self.set_high_cut_slope(defaults.high_cut_slope);
    }
}

impl Default for EqParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_declared_ranges() {
        let params = EqParams::new();
        let settings = params.snapshot();
        assert_eq!(settings, ChainSettings::default());
        assert_eq!(settings.low_cut_freq, EqParams::low_cut_freq_range().default);
        assert_eq!(settings.peak_gain_db, EqParams::peak_gain_range().default);
    }

    #[test]
    fn test_writes_are_clamped() {
        let params = EqParams::new();
        params.set_low_cut_freq(5.0);
        params.set_high_cut_freq(99999.0);
        params.set_peak_gain_db(100.0);
        params.set_peak_quality(0.0);

        let settings = params.snapshot();
        assert_eq!(settings.low_cut_freq, 20.0);
        assert_eq!(settings.high_cut_freq, 20000.0);
        assert_eq!(settings.peak_gain_db, 36.0);
        assert_eq!(settings.peak_quality, 0.1);
    }

    #[test]
    fn test_non_finite_writes_fall_back_to_default() {
        let params = EqParams::new();
        params.set_peak_freq(f64::NAN);
        assert_eq!(params.snapshot().peak_freq, 750.0);
    }

    #[test]
    fn test_slope_roundtrip() {
        let params = EqParams::new();
        params.set_low_cut_slope(Slope::Db36);
        params.set_high_cut_slope(Slope::Db48);

        let settings = params.snapshot();
        assert_eq!(settings.low_cut_slope, Slope::Db36);
        assert_eq!(settings.high_cut_slope, Slope::Db48);
    }

    #[test]
    fn test_snapshot_is_stable_copy() {
        let params = EqParams::new();
        let before = params.snapshot();
        params.set_peak_gain_db(12.0);
        // The earlier snapshot is unaffected by later writes
        assert_eq!(before.peak_gain_db, 0.0);
        assert_eq!(params.snapshot().peak_gain_db, 12.0);
    }
}
