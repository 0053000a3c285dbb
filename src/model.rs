//! # The model contract: `Configuration` and `Step`
//! * the physical model itself (spins on a lattice, particles in a box,
//!   whatever) is an external collaborator - this module only specifies the
//!   trait boundary the engines are generic over.
use std::ops::Add;

use crate::rng::RandomNumberGenerator;

/// # An abstract configuration of the system being simulated
/// * `system_size` is the cardinality of elementary sites (used e.g. by
///   [`crate::metropolis::MetropolisEngine::autocorrelation_function`] to
///   convert a "sweep" into a number of elementary steps)
/// * `propose_step` takes `&self`, not `&mut self`: the borrow checker is
///   what enforces "between proposal and execute, the configuration is
///   unchanged", not a convention you have to remember.
pub trait Configuration: Sized {
    /// Energy type of this configuration. See [`Energy`] for the required
    /// arithmetic.
    type Energy: Copy + PartialOrd + PartialEq + std::fmt::Debug + Add<Output = Self::Energy>;

    /// The candidate-move type this configuration proposes.
    type Step: Step<Self>;

    /// Number of elementary sites in the configuration.
    fn system_size(&self) -> usize;

    /// Current total energy of the configuration.
    fn total_energy(&self) -> Self::Energy;

    /// Propose a candidate step. Pure with respect to `rng`: only the rng's
    /// internal state may advance, `self` is never mutated here.
    fn propose_step<R: RandomNumberGenerator>(&self, rng: &mut R) -> Self::Step;
}

/// # A candidate mutation of a [`Configuration`]
/// * `execute` consumes `self`: once a step has been executed there is no
///   value left to execute again, so "call `execute` exactly once per
///   accepted step" is enforced by the type system rather than documented
///   as a footgun.
pub trait Step<C: Configuration> {
    /// Is this move even legal in the configuration's current state?
    ///
    /// If `propose_step` keeps returning non-executable steps forever, the
    /// engine makes no forward progress - that is the model's
    /// responsibility, not an engine-level error (see `spec.md` §7,
    /// `NonExecutableLoop`).
    fn is_executable(&self) -> bool;

    /// Signed change in energy if this step were executed. Must be exact
    /// and deterministic for this particular step object.
    fn delta_energy(&self) -> C::Energy;

    /// `p(reverse) / p(forward)`: the ratio of proposal densities,
    /// accounting for any asymmetry in how steps are proposed. `1.0` for
    /// symmetric proposals.
    fn selection_probability_factor(&self) -> f64;

    /// Mutate `config` in place to realize this step.
    fn execute(self, config: &mut C);
}

/// # Inverse temperature acting on an energy
/// * typed separately from `Energy` so that e.g. a field-resolved model can
///   use an array of β values without the engines needing to know about it
/// * `f64` is provided for the common scalar case; implement this yourself
///   for anything richer.
pub trait Beta<E> {
    /// Computes `β · energy` as a plain `f64` (the dimensionless quantity
    /// that goes into the Boltzmann weight).
    fn beta_times_energy(&self, energy: E) -> f64;
}

impl Beta<f64> for f64 {
    fn beta_times_energy(&self, energy: f64) -> f64 {
        self * energy
    }
}

impl Beta<i64> for f64 {
    fn beta_times_energy(&self, energy: i64) -> f64 {
        self * energy as f64
    }
}

impl Beta<i32> for f64 {
    fn beta_times_energy(&self, energy: i32) -> f64 {
        self * energy as f64
    }
}
