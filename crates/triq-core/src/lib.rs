//! triq-core: shared primitives for the Triq equalizer
//!
//! Sample type, lock-free parameter cells, and error types used by the
//! DSP crates. Nothing here touches the real-time processing path
//! beyond cheap atomic reads.

pub mod error;
pub mod params;
pub mod sample;

pub use error::{EqError, EqResult};
pub use params::{AtomicParam, ParamRange, ParamSkew};
pub use sample::{db_to_linear, linear_to_db, Sample};
