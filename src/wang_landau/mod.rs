//! # Flat-histogram Wang-Landau density-of-states estimation (C7)
//! * [`WangLandauEngine`] refines a log-density-of-states histogram until a
//!   flatness criterion is met, shrinking the modification factor at each
//!   refinement boundary
mod density_of_states;
mod engine;
mod event;
mod params;

pub use density_of_states::DensityOfStates;
pub use engine::{WangLandauEngine, WangLandauEngineState};
pub use event::{WangLandauEvent, WangLandauOutcome};
pub use params::WangLandauParameters;
