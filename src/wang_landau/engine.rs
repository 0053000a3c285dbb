use crate::histogram::{HistogramOps, HistogramStats, Histocrete};
use crate::model::{Configuration, Step};
use crate::rng::RandomNumberGenerator;
use crate::signal;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::error::SamplingError;

use super::density_of_states::DensityOfStates;
use super::event::{WangLandauEvent, WangLandauOutcome};
use super::params::WangLandauParameters;

/// Shape discriminant stamped into every [`WangLandauEngineState`] on save
/// and checked on load. Bumped whenever the struct's field set changes in a
/// way that would make an old archive silently misinterpret its bytes.
const WANG_LANDAU_STATE_VERSION: u32 = 1;

/// # Persisted engine state
/// * a version tag, parameters, rng state, and the engine's entire
///   refinement state (`log_density`, `incidence`, `ln_f`, `current_energy`)
///   - everything `spec.md` §3 lists as "engine-specific accumulated state",
///   again never the configuration itself
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "E: Serialize, R: Serialize",
        deserialize = "E: Ord + Clone + Deserialize<'de>, R: Deserialize<'de>"
    ))
)]
pub struct WangLandauEngineState<E, R> {
    version: u32,
    params: WangLandauParameters,
    rng: R,
    log_density: Histocrete<E, f64>,
    incidence: Histocrete<E, u64>,
    ln_f: f64,
    current_energy: E,
}

/// # Flat-histogram density-of-states estimator
/// * `log_density` (`S[E]`) and `incidence` (`H[E]`) both grow their key set
///   as the random walk visits new energies - there is no pre-declared
///   energy range
/// * `C::Energy` has to be totally ordered (`Ord`) to serve as a
///   [`Histocrete`] key, a stricter requirement than [`Configuration`]
///   itself demands (`PartialOrd` is enough there); this is why a raw
///   `f64` energy needs an ordered-float wrapper before it can drive this
///   engine, while the integer lattice energies this crate's tests use
///   (`i64`, `i32`) qualify directly
pub struct WangLandauEngine<'c, C, R>
where
    C: Configuration,
    C::Energy: Ord + Clone,
{
    config: &'c mut C,
    rng: R,
    params: WangLandauParameters,
    log_density: Histocrete<C::Energy, f64>,
    incidence: Histocrete<C::Energy, u64>,
    ln_f: f64,
    current_energy: C::Energy,
}

impl<'c, C, R> WangLandauEngine<'c, C, R>
where
    C: Configuration,
    C::Energy: Ord + Clone,
    R: RandomNumberGenerator,
{
    /// Wrap a configuration and rng with the given parameters. Installs the
    /// process-wide signal handler (idempotent) and seeds `current_energy`
    /// from `config.total_energy()`.
    pub fn new(params: WangLandauParameters, config: &'c mut C, rng: R) -> Self {
        signal::install();
        let current_energy = config.total_energy();
        Self {
            config,
            rng,
            ln_f: params.modification_factor_initial,
            params,
            log_density: Histocrete::new(),
            incidence: Histocrete::new(),
            current_energy,
        }
    }

    /// Parameters this engine was constructed with.
    pub fn params(&self) -> &WangLandauParameters {
        &self.params
    }

    /// Current modification factor, in log space.
    pub fn ln_f(&self) -> f64 {
        self.ln_f
    }

    /// Re-seed the engine's rng in place.
    pub fn set_random_seed(&mut self, seed: u32) {
        self.rng.reseed(seed);
    }

    /// Run `n` Wang-Landau steps at the engine's current `ln_f`, outside of
    /// the flatness-refinement loop - useful for warming up a walk before
    /// calling [`WangLandauEngine::do_wang_landau_simulation`], or for
    /// driving the walk by hand.
    pub fn do_wang_landau_steps(&mut self, n: u64) {
        for _ in 0..n {
            self.wang_landau_step();
        }
    }

    /// Capture `(parameters, rng state, log_density, incidence, ln_f,
    /// current_energy)` for persistence. The borrowed configuration is
    /// never part of this snapshot.
    pub fn save_serialize(&self) -> WangLandauEngineState<C::Energy, R>
    where
        R: Clone,
    {
        WangLandauEngineState {
            version: WANG_LANDAU_STATE_VERSION,
            params: self.params,
            rng: self.rng.clone(),
            log_density: self.log_density.clone(),
            incidence: self.incidence.clone(),
            ln_f: self.ln_f,
            current_energy: self.current_energy.clone(),
        }
    }

    /// Rebuild an engine from a previously saved state and a configuration
    /// reference. `config`'s own energy is discarded in favor of the
    /// persisted `current_energy` - the two must describe the same
    /// configuration state for subsequent sampling to be meaningful.
    ///
    /// # Errors
    /// [`SamplingError::SerializationMismatch`] if `state` was stamped with
    /// a different [`WangLandauEngineState`] shape version than this build
    /// of the crate produces - e.g. an archive saved by an older/newer
    /// version of the crate.
    pub fn load_serialize(
        state: WangLandauEngineState<C::Energy, R>,
        config: &'c mut C,
    ) -> Result<Self, SamplingError> {
        if state.version != WANG_LANDAU_STATE_VERSION {
            return Err(SamplingError::SerializationMismatch(format!(
                "WangLandauEngineState version {} does not match expected version {}",
                state.version, WANG_LANDAU_STATE_VERSION
            )));
        }
        signal::install();
        Ok(Self {
            config,
            rng: state.rng,
            params: state.params,
            log_density: state.log_density,
            incidence: state.incidence,
            ln_f: state.ln_f,
            current_energy: state.current_energy,
        })
    }

    /// One Wang-Landau step at the engine's current `ln_f`:
    /// 1. propose a step;
    /// 2. skip it if not executable;
    /// 3. accept with probability `min(1, q * exp(S[E_cur] - S[E_new]))`,
    ///    unseen energies reading `S[E] = 0`;
    /// 4. execute on acceptance, updating `current_energy`;
    /// 5. unconditionally: `S[current_energy] += ln_f`, `H[current_energy] += 1`.
    pub fn wang_landau_step(&mut self) {
        let step = self.config.propose_step(&mut self.rng);

        if step.is_executable() {
            let delta = step.delta_energy();
            let new_energy = self.current_energy + delta;
            let q = step.selection_probability_factor();

            let s_cur = self.log_density.get(&self.current_energy).copied().unwrap_or(0.0);
            let s_new = self.log_density.get(&new_energy).copied().unwrap_or(0.0);

            let accept = self.rng.uniform01() < q * (s_cur - s_new).exp();
            if accept {
                step.execute(self.config);
                self.current_energy = new_energy;
            }
        }

        *self.log_density.entry_or_insert(self.current_energy.clone()) += self.ln_f;
        *self.incidence.entry_or_insert(self.current_energy.clone()) += 1;
    }

    /// Run the full flatness-refinement loop: repeatedly sweep
    /// `params.sweep_steps` single steps until `H.flatness() >= params.flatness`,
    /// then shrink `ln_f` by `params.modification_factor_multiplier` and
    /// reset the incidence histogram (the density-of-states estimate is
    /// preserved across refinement boundaries). Stops once
    /// `ln_f <= params.modification_factor_final`.
    ///
    /// `on_sweep`, if given, is called once per sweep with a snapshot of
    /// `ln_f` and the current flatness. Polls the process-wide termination
    /// signal after every sweep and returns early (`interrupted: true`) if
    /// it is set.
    pub fn do_wang_landau_simulation(
        &mut self,
        mut on_sweep: Option<&mut dyn FnMut(&WangLandauEvent)>,
    ) -> WangLandauOutcome {
        signal::clear();

        while self.ln_f > self.params.modification_factor_final {
            loop {
                for _ in 0..self.params.sweep_steps {
                    self.wang_landau_step();
                }

                if let Some(cb) = on_sweep.as_deref_mut() {
                    cb(&WangLandauEvent { ln_f: self.ln_f, flatness: self.incidence.flatness() });
                }

                if signal::is_set() {
                    return WangLandauOutcome { final_ln_f: self.ln_f, interrupted: true };
                }

                if let Some(flatness) = self.incidence.flatness() {
                    if flatness >= self.params.flatness {
                        break;
                    }
                }
            }

            self.ln_f *= self.params.modification_factor_multiplier;
            self.incidence.reset();
        }

        WangLandauOutcome { final_ln_f: self.ln_f, interrupted: false }
    }

    /// Snapshot the current log-density-of-states estimate, energy ascending.
    pub fn get_density_of_states(&self) -> DensityOfStates<C::Energy> {
        let entries = self.log_density.iter().map(|(e, s)| (e.clone(), *s)).collect();
        DensityOfStates::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[derive(Clone)]
    struct Ising1D {
        spins: Vec<i8>,
    }

    struct FlipOne {
        index: usize,
        delta: i64,
    }

    impl Configuration for Ising1D {
        type Energy = i64;
        type Step = FlipOne;

        fn system_size(&self) -> usize {
            self.spins.len()
        }

        fn total_energy(&self) -> i64 {
            let n = self.spins.len();
            (0..n)
                .map(|i| -(self.spins[i] as i64) * (self.spins[(i + 1) % n] as i64))
                .sum()
        }

        fn propose_step<R: RandomNumberGenerator>(&self, rng: &mut R) -> FlipOne {
            let n = self.spins.len();
            let index = rng.uniform_int(n as u32) as usize;
            let left = (index + n - 1) % n;
            let right = (index + 1) % n;
            let before = -(self.spins[left] as i64) * (self.spins[index] as i64)
                - (self.spins[index] as i64) * (self.spins[right] as i64);
            let flipped = -self.spins[index];
            let after = -(self.spins[left] as i64) * (flipped as i64)
                - (flipped as i64) * (self.spins[right] as i64);
            FlipOne { index, delta: after - before }
        }
    }

    impl Step<Ising1D> for FlipOne {
        fn is_executable(&self) -> bool {
            true
        }
        fn delta_energy(&self) -> i64 {
            self.delta
        }
        fn selection_probability_factor(&self) -> f64 {
            1.0
        }
        fn execute(self, config: &mut Ising1D) {
            config.spins[self.index] = -config.spins[self.index];
        }
    }

    #[test]
    fn wang_landau_step_always_updates_histograms_at_current_energy() {
        let mut config = Ising1D { spins: vec![1, 1, 1, 1] };
        let rng = Pcg64::seed_from_u64(0);
        let params = WangLandauParameters::new(1.0, 1e-3, 0.9, 0.8, 4).unwrap();
        let mut engine = WangLandauEngine::new(params, &mut config, rng);
        engine.wang_landau_step();
        let e = engine.current_energy;
        assert_eq!(*engine.incidence.get(&e).unwrap(), 1);
        assert!(*engine.log_density.get(&e).unwrap() > 0.0);
    }

    #[test]
    fn refinement_loop_terminates_with_ln_f_at_or_below_final() {
        let mut config = Ising1D { spins: vec![1, -1, 1, -1] };
        let rng = Pcg64::seed_from_u64(1);
        let params = WangLandauParameters::new(1.0, 1e-2, 0.5, 0.7, 8).unwrap();
        let mut engine = WangLandauEngine::new(params, &mut config, rng);
        let outcome = engine.do_wang_landau_simulation(None);
        assert!(!outcome.interrupted);
        assert!(outcome.final_ln_f <= 1e-2);
    }

    #[test]
    fn density_of_states_is_energy_ascending() {
        let mut config = Ising1D { spins: vec![1, 1, -1, -1] };
        let rng = Pcg64::seed_from_u64(2);
        let params = WangLandauParameters::new(1.0, 1e-2, 0.5, 0.7, 8).unwrap();
        let mut engine = WangLandauEngine::new(params, &mut config, rng);
        engine.do_wang_landau_simulation(None);
        let dos = engine.get_density_of_states();
        let energies: Vec<_> = dos.entries().iter().map(|(e, _)| *e).collect();
        let mut sorted = energies.clone();
        sorted.sort();
        assert_eq!(energies, sorted);
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn save_then_load_reproduces_subsequent_steps() {
        let params = WangLandauParameters::new(1.0, 1e-2, 0.5, 0.7, 4).unwrap();

        let mut baseline_config = Ising1D { spins: vec![1, -1, 1, 1] };
        let rng = Pcg64::seed_from_u64(11);
        let mut baseline = WangLandauEngine::new(params, &mut baseline_config, rng);
        baseline.do_wang_landau_steps(10);
        let state = baseline.save_serialize();

        let json = serde_json::to_string(&state).unwrap();
        let restored: WangLandauEngineState<i64, Pcg64> = serde_json::from_str(&json).unwrap();

        let mut reloaded_config = baseline_config.clone();
        let mut reloaded = WangLandauEngine::load_serialize(restored, &mut reloaded_config).unwrap();

        assert_eq!(baseline.current_energy, reloaded.current_energy);
        assert_eq!(baseline.ln_f, reloaded.ln_f);
        for _ in 0..10 {
            assert_eq!(baseline.rng.uniform01(), reloaded.rng.uniform01());
        }
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn load_serialize_rejects_a_mismatched_version_tag() {
        let params = WangLandauParameters::new(1.0, 1e-2, 0.5, 0.7, 4).unwrap();
        let mut config = Ising1D { spins: vec![1, 1, 1, 1] };
        let rng = Pcg64::seed_from_u64(3);
        let engine = WangLandauEngine::new(params, &mut config, rng);
        let mut state = engine.save_serialize();
        state.version = WANG_LANDAU_STATE_VERSION + 1;

        let mut other_config = Ising1D { spins: vec![1, 1, 1, 1] };
        let err = WangLandauEngine::load_serialize(state, &mut other_config).unwrap_err();
        assert!(matches!(err, SamplingError::SerializationMismatch(_)));
    }
}
