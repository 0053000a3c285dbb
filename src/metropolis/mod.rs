//! # Fixed-temperature Metropolis-Hastings sampling (C5)
//! * [`MetropolisEngine`] drives any [`crate::model::Configuration`] at a
//!   fixed inverse temperature, measuring an [`crate::observable::Observable`]
//!   into an [`crate::observable::Accumulator`]
mod engine;
mod event;
mod params;

pub use engine::{integrated_autocorrelation_time, MetropolisEngine, MetropolisEngineState};
pub use event::{MetropolisEvent, MetropolisOutcome};
pub use params::MetropolisParameters;
