use crate::error::ParameterError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// # Parameters of a Metropolis simulation
/// * see `spec.md` §4.6/§6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct MetropolisParameters {
    /// Number of equilibration steps run before any measurement is taken.
    pub relaxation_steps: u64,
    /// Number of measurements to take.
    pub measurement_number: u64,
    /// Number of Metropolis steps between two consecutive measurements.
    pub steps_between_measurement: u64,
}

impl MetropolisParameters {
    /// Construct parameters, validating that `steps_between_measurement`
    /// is not zero (a zero spacing would mean "measure the same state
    /// `measurement_number` times", which is never useful and is rejected
    /// here rather than silently allowed).
    pub fn new(
        relaxation_steps: u64,
        measurement_number: u64,
        steps_between_measurement: u64,
    ) -> Result<Self, ParameterError> {
        if steps_between_measurement == 0 {
            return Err(ParameterError::ZeroSteps);
        }
        Ok(Self {
            relaxation_steps,
            measurement_number,
            steps_between_measurement,
        })
    }
}
