//! # Cross-cutting error types
//! * hand-rolled `enum` + manual `Display`, no `thiserror` - matches the
//!   rest of this corpus (`GraphErrors`, `HistErrors`, `WangLandauErrors`
//!   in the teacher crate are all written this way).
use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Errors raised when constructing or validating a `*Parameters` struct.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum ParameterError {
    /// `flatness` has to be in `(0, 1]`.
    FlatnessOutOfRange(f64),
    /// `modification_factor_multiplier` has to be in `(0, 1)`.
    MultiplierOutOfRange(f64),
    /// `modification_factor_final` has to be strictly smaller than
    /// `modification_factor_initial`.
    FinalNotBelowInitial {
        /// configured initial modification factor
        initial: f64,
        /// configured final modification factor
        final_threshold: f64,
    },
    /// `sweep_steps` (or any other step count parameter) has to be `> 0`.
    ZeroSteps,
    /// the number of β values and the number of accumulators passed to a
    /// multi-β Metropolis call did not match.
    LengthMismatch {
        /// number of β values
        betas: usize,
        /// number of accumulators
        accumulators: usize,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::FlatnessOutOfRange(v) => {
                write!(f, "flatness must be in (0, 1], got {v}")
            }
            ParameterError::MultiplierOutOfRange(v) => {
                write!(f, "modification_factor_multiplier must be in (0, 1), got {v}")
            }
            ParameterError::FinalNotBelowInitial { initial, final_threshold } => write!(
                f,
                "modification_factor_final ({final_threshold}) must be smaller than modification_factor_initial ({initial})"
            ),
            ParameterError::ZeroSteps => write!(f, "step count parameters must be greater than 0"),
            ParameterError::LengthMismatch { betas, accumulators } => write!(
                f,
                "number of betas ({betas}) does not match number of accumulators ({accumulators})"
            ),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors raised while a sampling call is in progress.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum SamplingError {
    /// `C(0) == 0` when computing the integrated autocorrelation time - the
    /// division by `C(0)` is undefined, there is no sensible fallback.
    DegenerateAutocorrelation,
    /// a loaded archive's shape does not match the engine it is being
    /// loaded into.
    SerializationMismatch(String),
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::DegenerateAutocorrelation => {
                write!(f, "autocorrelation C(0) is zero, integrated autocorrelation time is undefined")
            }
            SamplingError::SerializationMismatch(msg) => {
                write!(f, "serialization mismatch: {msg}")
            }
        }
    }
}

impl std::error::Error for SamplingError {}
