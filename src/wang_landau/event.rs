/// # A snapshot passed to the sweep callback
/// * see [`crate::metropolis::MetropolisEvent`] for why this is a call
///   parameter rather than a field stored on the engine
#[derive(Debug, Clone, Copy)]
pub struct WangLandauEvent {
    /// Current modification factor, in log space.
    pub ln_f: f64,
    /// `H.flatness()` as of this sweep, if the incidence histogram has at
    /// least one non-zero entry yet.
    pub flatness: Option<f64>,
}

/// # Result of a (possibly interrupted) Wang-Landau refinement run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WangLandauOutcome {
    /// Value of `ln_f` when the run stopped.
    pub final_ln_f: f64,
    /// `true` if the run returned early because of a POSIX signal.
    pub interrupted: bool,
}
