/// # Reported density of states
/// * `(energy, ln_g)` pairs in ascending-energy order, a snapshot copy of
///   the engine's internal `log_density` histogram
/// * physical `g(E)` is `exp(ln_g)`; the log form is what the engine keeps
///   internally to avoid overflow, this type preserves that until the
///   caller asks for `to_g`
#[derive(Debug, Clone, PartialEq)]
pub struct DensityOfStates<K> {
    entries: Vec<(K, f64)>,
}

impl<K> DensityOfStates<K> {
    pub(super) fn new(entries: Vec<(K, f64)>) -> Self {
        Self { entries }
    }

    /// `(energy, ln_g(energy))` pairs in ascending-energy order.
    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    /// Exponentiate every `ln_g` entry for reporting. Prefer keeping the
    /// log form (`entries()`) for anything downstream that will take
    /// differences or ratios.
    pub fn to_g(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, ln_g)| ln_g.exp()).collect()
    }

    /// Subtract the maximum `ln_g` from every entry, so the reported
    /// distribution's peak sits at `ln_g = 0`. A standard post-processing
    /// convenience, not required to interpret the raw density of states.
    pub fn normalize(&mut self) {
        let max = self
            .entries
            .iter()
            .map(|(_, ln_g)| *ln_g)
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() {
            for (_, ln_g) in &mut self.entries {
                *ln_g -= max;
            }
        }
    }
}
