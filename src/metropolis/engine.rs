use crate::error::{ParameterError, SamplingError};
use crate::model::{Beta, Configuration, Step};
use crate::observable::{Accumulator, Observable};
use crate::rng::RandomNumberGenerator;
use crate::signal;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use super::event::{MetropolisEvent, MetropolisOutcome};
use super::params::MetropolisParameters;

/// Shape discriminant stamped into every [`MetropolisEngineState`] on save
/// and checked on load. Bumped whenever the struct's field set changes in a
/// way that would make an old archive silently misinterpret its bytes.
const METROPOLIS_STATE_VERSION: u32 = 1;

/// # Persisted engine state
/// * everything [`MetropolisEngine::save_serialize`] writes out: a version
///   tag, parameters and rng state, *not* the configuration - the
///   configuration is externally owned and the engine never claims to
///   capture it (`spec.md` §3 "Lifecycle")
/// * round-tripping through this type and [`MetropolisEngine::load_serialize`]
///   against the *same* configuration state reproduces subsequent sampling
///   bit-identically, since the rng is the only other source of randomness
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct MetropolisEngineState<R> {
    version: u32,
    params: MetropolisParameters,
    rng: R,
}

/// # Metropolis-Hastings sampler at fixed inverse temperature
/// * generic over the model ([`Configuration`]/[`Step`]) and the random
///   number generator ([`RandomNumberGenerator`]), nothing else
/// * holds a mutable borrow of the configuration it drives rather than
///   owning it - the caller keeps the configuration alive for as long as it
///   needs it outside the engine too
pub struct MetropolisEngine<'c, C, R>
where
    C: Configuration,
{
    config: &'c mut C,
    rng: R,
    params: MetropolisParameters,
}

impl<'c, C, R> MetropolisEngine<'c, C, R>
where
    C: Configuration,
    R: RandomNumberGenerator,
{
    /// Wrap a configuration and rng with the given parameters. Installs the
    /// process-wide signal handler (idempotent, see [`signal::install`]).
    pub fn new(params: MetropolisParameters, config: &'c mut C, rng: R) -> Self {
        signal::install();
        Self { config, rng, params }
    }

    /// Parameters this engine was constructed with.
    pub fn params(&self) -> &MetropolisParameters {
        &self.params
    }

    /// Re-seed the engine's rng in place.
    pub fn set_random_seed(&mut self, seed: u32) {
        self.rng.reseed(seed);
    }

    /// Borrow the driven configuration.
    pub fn config(&self) -> &C {
        self.config
    }

    /// Capture `(parameters, rng state)` for persistence. The borrowed
    /// configuration is never part of this snapshot.
    pub fn save_serialize(&self) -> MetropolisEngineState<R>
    where
        R: Clone,
    {
        MetropolisEngineState {
            version: METROPOLIS_STATE_VERSION,
            params: self.params,
            rng: self.rng.clone(),
        }
    }

    /// Rebuild an engine from a previously saved state and a configuration
    /// reference. If `config` is in the same state it was in when the
    /// engine that produced `state` was saved, subsequent sampling is
    /// bit-identical to what that original engine would have produced.
    ///
    /// # Errors
    /// [`SamplingError::SerializationMismatch`] if `state` was stamped with
    /// a different [`MetropolisEngineState`] shape version than this build
    /// of the crate produces - e.g. an archive saved by an older/newer
    /// version of the crate.
    pub fn load_serialize(
        state: MetropolisEngineState<R>,
        config: &'c mut C,
    ) -> Result<Self, SamplingError> {
        if state.version != METROPOLIS_STATE_VERSION {
            return Err(SamplingError::SerializationMismatch(format!(
                "MetropolisEngineState version {} does not match expected version {}",
                state.version, METROPOLIS_STATE_VERSION
            )));
        }
        signal::install();
        Ok(Self { config, rng: state.rng, params: state.params })
    }

    /// Propose and resolve `n` Metropolis steps at inverse temperature
    /// `beta`, one after another. A step whose `is_executable` is `false` is
    /// rejected without drawing a random number.
    pub fn do_metropolis_steps<B>(&mut self, n: u64, beta: &B)
    where
        B: Beta<C::Energy>,
    {
        for _ in 0..n {
            self.metropolis_step(beta);
        }
    }

    /// A single propose/accept-or-reject round. Returns `true` if the step
    /// was accepted.
    fn metropolis_step<B>(&mut self, beta: &B) -> bool
    where
        B: Beta<C::Energy>,
    {
        let step = self.config.propose_step(&mut self.rng);
        if !step.is_executable() {
            return false;
        }

        let q = step.selection_probability_factor();
        let x = beta.beta_times_energy(step.delta_energy());

        // acceptance probability is `min(1, (1/q) * exp(-x))`; that is `>= 1`
        // (unconditional accept) iff `x <= -ln(q)`. Check this arm first so a
        // downhill, symmetric-proposal step (the common case: `q == 1.0`,
        // `x <= 0.0`) never pays for an `exp` call.
        let accept = x <= -q.ln() || self.rng.uniform01() < (1.0 / q) * (-x).exp();

        if accept {
            step.execute(self.config);
        }
        accept
    }

    /// Run relaxation, then take `params.measurement_number` measurements,
    /// each separated by `params.steps_between_measurement` Metropolis
    /// steps, feeding every observed value into `accumulator`.
    ///
    /// `on_measurement`, if given, is called once per measurement with a
    /// snapshot of the engine's progress - see [`MetropolisEvent`] for why
    /// this is a callback parameter rather than something stored on `self`.
    ///
    /// Polls the process-wide termination signal between measurements and
    /// returns early (with `interrupted: true`) if it is set.
    pub fn do_metropolis_simulation<B, O, A>(
        &mut self,
        beta: &B,
        observable: &O,
        accumulator: &mut A,
        mut on_measurement: Option<&mut dyn FnMut(&MetropolisEvent)>,
    ) -> MetropolisOutcome
    where
        B: Beta<C::Energy>,
        O: Observable<C>,
        A: Accumulator<O::Value>,
    {
        signal::clear();
        self.do_metropolis_steps(self.params.relaxation_steps, beta);

        let mut steps_so_far = self.params.relaxation_steps;
        let mut samples_taken = 0u64;

        for measurement_index in 0..self.params.measurement_number {
            if signal::is_set() {
                return MetropolisOutcome { samples_taken, interrupted: true };
            }

            self.do_metropolis_steps(self.params.steps_between_measurement, beta);
            steps_so_far += self.params.steps_between_measurement;

            let value = observable.observe(self.config);
            accumulator.accumulate(value);
            samples_taken += 1;

            if let Some(cb) = on_measurement.as_deref_mut() {
                cb(&MetropolisEvent { measurement_index, steps_so_far });
            }
        }

        MetropolisOutcome { samples_taken, interrupted: false }
    }

    /// Run independent simulations at every `betas[i]`, each feeding
    /// `accumulators[i]`. `config`/`rng` are shared sequentially across all
    /// of them - this is a convenience loop, not a parallel sweep.
    ///
    /// Stops (without starting `betas[i + 1..]`) as soon as one of the
    /// per-beta calls comes back `interrupted` - a `SIGINT` during `betas[0]`
    /// must stop the whole sweep, not just that one temperature (`spec.md`
    /// §4.6: "break on `is_terminating`"). The returned vector holds exactly
    /// the outcomes of the betas that were actually run.
    ///
    /// # Errors
    /// [`ParameterError::LengthMismatch`] if `betas.len() != accumulators.len()`.
    pub fn do_metropolis_multi<B, O, A>(
        &mut self,
        betas: &[B],
        observable: &O,
        accumulators: &mut [A],
    ) -> Result<Vec<MetropolisOutcome>, ParameterError>
    where
        B: Beta<C::Energy>,
        O: Observable<C>,
        A: Accumulator<O::Value>,
    {
        if betas.len() != accumulators.len() {
            return Err(ParameterError::LengthMismatch {
                betas: betas.len(),
                accumulators: accumulators.len(),
            });
        }

        let mut outcomes = Vec::with_capacity(betas.len());
        for (beta, accumulator) in betas.iter().zip(accumulators.iter_mut()) {
            let outcome = self.do_metropolis_simulation(beta, observable, accumulator, None);
            let interrupted = outcome.interrupted;
            outcomes.push(outcome);
            if interrupted {
                break;
            }
        }
        Ok(outcomes)
    }

    /// # Autocorrelation function of a scalar observable
    /// * relaxes, then collects a single chain of
    ///   `M = maximal_time * simulation_time_factor + 1` samples, each
    ///   separated by one sweep (`config.system_size()` Metropolis steps)
    /// * `C(t)` is the average, over the `simulation_time_factor` disjoint
    ///   blocks of length `maximal_time`, of `f[block_start] * f[block_start + t]`,
    ///   minus the global sample mean squared; `C(0) = <f^2> - <f>^2`
    /// * returned as a `maximal_time + 1`-long vector, `C(0) ..= C(maximal_time)`
    pub fn autocorrelation_function<B, O>(
        &mut self,
        beta: &B,
        observable: &O,
        maximal_time: usize,
        simulation_time_factor: usize,
    ) -> Vec<f64>
    where
        B: Beta<C::Energy>,
        O: Observable<C>,
        O::Value: Into<f64>,
    {
        let sweep = self.config.system_size().max(1) as u64;
        self.do_metropolis_steps(self.params.relaxation_steps, beta);

        let sample_count = maximal_time * simulation_time_factor + 1;
        let mut samples = Vec::with_capacity(sample_count);
        samples.push(observable.observe(self.config).into());
        for _ in 1..sample_count {
            self.do_metropolis_steps(sweep, beta);
            samples.push(observable.observe(self.config).into());
        }

        let mean: f64 = samples.iter().sum::<f64>() / sample_count as f64;
        let blocks = simulation_time_factor as f64;

        (0..=maximal_time)
            .map(|t| {
                let cross: f64 = (0..simulation_time_factor)
                    .map(|s| samples[s * maximal_time] * samples[s * maximal_time + t])
                    .sum();
                cross / blocks - mean * mean
            })
            .collect()
    }
}

/// # Integrated autocorrelation time
/// * `τ = 1 + 2 * sum_{t=1}^{N-2} (1 - t/N) * C(t)/C(0)`, where `N` is
///   `c.len() - 1` (the `maximal_time` the series was computed with)
///
/// # Errors
/// [`SamplingError::DegenerateAutocorrelation`] if `c[0] == 0.0`.
pub fn integrated_autocorrelation_time(c: &[f64]) -> Result<f64, SamplingError> {
    let c0 = *c.first().unwrap_or(&0.0);
    if c0 == 0.0 {
        return Err(SamplingError::DegenerateAutocorrelation);
    }
    let maximal_time = c.len().saturating_sub(1);
    let sum: f64 = c
        .iter()
        .enumerate()
        .skip(1)
        .take(maximal_time.saturating_sub(1))
        .map(|(t, &ct)| (1.0 - t as f64 / maximal_time as f64) * (ct / c0))
        .sum();
    Ok(1.0 + 2.0 * sum)
}
