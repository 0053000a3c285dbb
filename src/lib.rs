//! # A model-agnostic Monte Carlo core
//!
//! This crate does not know what a spin, a particle or a lattice is. It
//! knows how to drive *any* type implementing [`model::Configuration`] /
//! [`model::Step`] through Metropolis-Hastings sampling at fixed
//! temperature ([`metropolis`]) or Wang-Landau flat-histogram refinement
//! ([`wang_landau`]).
//!
//! # Example
//! A two-state toy system implementing [`model::Configuration`]:
//!
//! ```
//! use sampling::model::{Configuration, Step};
//! use sampling::rng::RandomNumberGenerator;
//! use sampling::metropolis::{MetropolisEngine, MetropolisParameters};
//! use sampling::observable::{Observable, VecAccumulator};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! #[derive(Clone)]
//! struct TwoState { up: bool }
//!
//! struct Flip;
//!
//! impl Configuration for TwoState {
//!     type Energy = f64;
//!     type Step = Flip;
//!
//!     fn system_size(&self) -> usize { 1 }
//!     fn total_energy(&self) -> f64 { if self.up { -1.0 } else { 1.0 } }
//!     fn propose_step<R: RandomNumberGenerator>(&self, _rng: &mut R) -> Flip { Flip }
//! }
//!
//! impl Step<TwoState> for Flip {
//!     fn is_executable(&self) -> bool { true }
//!     fn delta_energy(&self) -> f64 { 0.0 }
//!     fn selection_probability_factor(&self) -> f64 { 1.0 }
//!     fn execute(self, config: &mut TwoState) { config.up = !config.up; }
//! }
//!
//! struct Energy;
//! impl Observable<TwoState> for Energy {
//!     type Value = f64;
//!     fn observe(&self, config: &TwoState) -> f64 { config.total_energy() }
//! }
//!
//! let mut config = TwoState { up: false };
//! let rng = Pcg64::seed_from_u64(0);
//! let params = MetropolisParameters::new(100, 1_000, 1).unwrap();
//! let mut engine = MetropolisEngine::new(params, &mut config, rng);
//! let mut acc = VecAccumulator::new();
//! let outcome = engine.do_metropolis_simulation(&1.0_f64, &Energy, &mut acc, None);
//! assert_eq!(outcome.samples_taken, 1_000);
//! ```
#![deny(missing_docs, warnings)]

pub mod error;
pub mod histogram;
pub mod metropolis;
pub mod model;
pub mod observable;
pub mod rng;
pub mod signal;
pub mod wang_landau;

pub use rand;
