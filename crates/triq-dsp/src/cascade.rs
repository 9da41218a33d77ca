//! Fixed-capacity cut cascade with per-stage bypass
//!
//! Four biquad stages model one cut band. A slope of 12/24/36/48
//! dB/oct enables the first 1..4 stages; the rest stay bypassed as
//! exact passthrough. The activation set is always a prefix: raising
//! the slope enables additional higher-indexed stages without touching
//! the already-active ones, lowering it disables from the top.

use triq_core::Sample;

use crate::biquad::Biquad;
use crate::butterworth::{CutDesign, MAX_CUT_STAGES};
use crate::{MonoProcessor, Processor};

/// One cut band: up to four cascaded Butterworth sections
#[derive(Debug, Clone, Default)]
pub struct CutCascade {
    stages: [Biquad; MAX_CUT_STAGES],
    enabled: [bool; MAX_CUT_STAGES],
}

impl CutCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh design, activating exactly the prefix of stages
    /// the design covers.
    ///
    /// A stage transitioning from bypassed to active is cold-started:
    /// its delay state is zeroed so residual history from an unrelated
    /// coefficient set cannot inject a click.
    pub fn install(&mut self, design: &CutDesign) {
        let sections = design.sections();
        debug_assert!(sections.len() <= MAX_CUT_STAGES);

        for i in 0..MAX_CUT_STAGES {
            if let Some(&coeffs) = sections.get(i) {
                if !self.enabled[i] {
                    self.stages[i].reset();
                }
                self.stages[i].set_coeffs(coeffs);
                self.enabled[i] = true;
            } else {
                self.enabled[i] = false;
            }
        }
    }

    /// Whether stage `i` is currently active
    #[inline]
    pub fn stage_enabled(&self, i: usize) -> bool {
        self.enabled[i]
    }

    /// Number of active stages
    pub fn active_stages(&self) -> usize {
        self.enabled.iter().filter(|&&e| e).count()
    }

    /// Coefficient sets of the active stages, in cascade order
    pub fn active_coeffs(&self) -> impl Iterator<Item = &crate::biquad::BiquadCoeffs> {
        self.stages
            .iter()
            .zip(self.enabled.iter())
            .filter(|&(_, &enabled)| enabled)
            .map(|(stage, _)| stage.coeffs())
    }
}

impl Processor for CutCascade {
    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

impl MonoProcessor for CutCascade {
    #[inline(always)]
    fn process_sample(&mut self, input: Sample) -> Sample {
        let mut sample = input;
        for (stage, &enabled) in self.stages.iter_mut().zip(self.enabled.iter()) {
            if enabled {
                sample = stage.process_sample(sample);
            }
        }
        sample
    }
}
