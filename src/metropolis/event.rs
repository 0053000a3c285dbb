/// # A snapshot passed to the measurement callback
/// * passed by value/reference to the callback rather than `&Self`/`&mut Self`
///   of the engine - see `SPEC_FULL.md` §4.5 for why storing `Box<dyn FnMut(&Self)>`
///   on the engine itself is not expressible in safe Rust
#[derive(Debug, Clone, Copy)]
pub struct MetropolisEvent {
    /// Index of this measurement, starting at 0.
    pub measurement_index: u64,
    /// Total Metropolis steps performed by this engine so far (including
    /// relaxation).
    pub steps_so_far: u64,
}

/// # Result of a (possibly interrupted) Metropolis sampling call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetropolisOutcome {
    /// How many measurements were actually taken.
    pub samples_taken: u64,
    /// `true` if the call returned early because of a POSIX signal.
    pub interrupted: bool,
}
