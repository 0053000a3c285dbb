//! # Observable & Accumulator
//! * `Observable` is a stateless functor: `observe(&config) -> Value`.
//! * `Accumulator` consumes a stream of values; the engine never inspects
//!   `Value`, it only moves it from the observable to whatever accumulator
//!   the caller supplied.
#[cfg(feature = "bootstrap")]
use average::Variance;

/// A measurement taken from a [`crate::model::Configuration`].
pub trait Observable<C> {
    /// The type of a single measurement.
    type Value;

    /// Compute the measurement for the current configuration.
    fn observe(&self, config: &C) -> Self::Value;
}

/// Consumes a stream of measured values.
///
/// The core treats this opaquely - it only calls [`Accumulator::accumulate`].
pub trait Accumulator<V> {
    /// Feed one more sample into the accumulator.
    fn accumulate(&mut self, value: V);
}

/// # The trivial accumulator: keep every sample
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
pub struct VecAccumulator<V> {
    samples: Vec<V>,
}

impl<V> VecAccumulator<V> {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// All samples accumulated so far, in the order they were observed.
    pub fn samples(&self) -> &[V] {
        &self.samples
    }

    /// Consume `self`, returning the raw sample vector.
    pub fn into_samples(self) -> Vec<V> {
        self.samples
    }
}

impl<V> Accumulator<V> for VecAccumulator<V> {
    fn accumulate(&mut self, value: V) {
        self.samples.push(value);
    }
}

/// # A streaming mean/variance accumulator
/// * backed by [`average::Variance`], gated behind the `bootstrap` feature -
///   exactly the way the teacher crate gates its own use of `average` in
///   `sampling::bootstrap`.
#[cfg(feature = "bootstrap")]
#[derive(Debug, Clone, Default)]
pub struct MeanVarianceAccumulator {
    variance: Variance,
}

#[cfg(feature = "bootstrap")]
impl MeanVarianceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { variance: Variance::new() }
    }

    /// Number of samples seen so far.
    pub fn len(&self) -> u64 {
        self.variance.len()
    }

    /// `true` if no sample has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Running mean of all samples seen so far.
    pub fn mean(&self) -> f64 {
        self.variance.mean()
    }

    /// Running population variance of all samples seen so far.
    pub fn variance(&self) -> f64 {
        self.variance.population_variance()
    }
}

#[cfg(feature = "bootstrap")]
impl Accumulator<f64> for MeanVarianceAccumulator {
    fn accumulate(&mut self, value: f64) {
        self.variance.add(value);
    }
}
