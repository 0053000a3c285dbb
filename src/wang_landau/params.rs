use crate::error::ParameterError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// # Parameters of a Wang-Landau refinement run
/// * `modification_factor_multiplier` is applied to `ln_f` directly
///   (`ln_f *= multiplier`), not to `f` itself (`f <- f^multiplier`, the
///   other convention seen in the literature) - both give a valid
///   refinement schedule, this crate fixes the former so a caller isn't
///   left guessing which one is in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct WangLandauParameters {
    /// Starting value of `ln_f` (default: `1.0`, i.e. `f_initial = e`).
    pub modification_factor_initial: f64,
    /// Refinement stops once `ln_f <= modification_factor_final`.
    pub modification_factor_final: f64,
    /// Shrink rate applied to `ln_f` at every refinement boundary, in `(0, 1)`.
    pub modification_factor_multiplier: f64,
    /// Required `H.min_y() / H.mean_y()` ratio before refining, in `(0, 1]`.
    pub flatness: f64,
    /// Number of single Wang-Landau steps run between flatness checks.
    pub sweep_steps: u64,
}

impl WangLandauParameters {
    /// Validate and construct parameters.
    ///
    /// # Errors
    /// - [`ParameterError::FlatnessOutOfRange`] if `flatness` is not in `(0, 1]`.
    /// - [`ParameterError::MultiplierOutOfRange`] if `modification_factor_multiplier`
    ///   is not in `(0, 1)`.
    /// - [`ParameterError::FinalNotBelowInitial`] if
    ///   `modification_factor_final >= modification_factor_initial`.
    /// - [`ParameterError::ZeroSteps`] if `sweep_steps == 0`.
    pub fn new(
        modification_factor_initial: f64,
        modification_factor_final: f64,
        modification_factor_multiplier: f64,
        flatness: f64,
        sweep_steps: u64,
    ) -> Result<Self, ParameterError> {
        if !(flatness > 0.0 && flatness <= 1.0) {
            return Err(ParameterError::FlatnessOutOfRange(flatness));
        }
        if !(modification_factor_multiplier > 0.0 && modification_factor_multiplier < 1.0) {
            return Err(ParameterError::MultiplierOutOfRange(modification_factor_multiplier));
        }
        if modification_factor_final >= modification_factor_initial {
            return Err(ParameterError::FinalNotBelowInitial {
                initial: modification_factor_initial,
                final_threshold: modification_factor_final,
            });
        }
        if sweep_steps == 0 {
            return Err(ParameterError::ZeroSteps);
        }
        Ok(Self {
            modification_factor_initial,
            modification_factor_final,
            modification_factor_multiplier,
            flatness,
            sweep_steps,
        })
    }
}
