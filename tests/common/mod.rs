//! Shared toy models for the integration tests, mirroring the teacher's own
//! `tests/common/mod.rs` convention of keeping test fixtures in one place.
use sampling::model::{Configuration, Step};
use sampling::rand::SeedableRng;
use sampling::rng::RandomNumberGenerator;

/// A periodic 1D Ising chain, `N` spins, coupling `J = 1`, no field.
#[derive(Clone)]
pub struct Ising1D {
    pub spins: Vec<i8>,
}

impl Ising1D {
    pub fn all_up(n: usize) -> Self {
        Self { spins: vec![1; n] }
    }
}

pub struct FlipOne {
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

/// Exact degeneracy `g(E)` of an `N`-site periodic Ising chain by brute-force
/// enumeration. Only used in tests, `N` is expected to stay small (`<= 16`
/// or so).
pub fn exact_ising_degeneracies(n: usize) -> std::collections::BTreeMap<i64, u64> {
    let mut degeneracies = std::collections::BTreeMap::new();
    for bits in 0..(1u32 << n) {
        let spins: Vec<i8> = (0..n)
            .map(|i| if (bits >> i) & 1 == 0 { 1i8 } else { -1i8 })
            .collect();
        let energy: i64 = (0..n)
            .map(|i| -(spins[i] as i64) * (spins[(i + 1) % n] as i64))
            .sum();
        *degeneracies.entry(energy).or_insert(0u64) += 1;
    }
    degeneracies
}

/// A two-state system with a deliberately asymmetric proposal scheme:
/// `E(0) = 0`, `E(1) = 1`, `q(0 -> 1) = 2`, `q(1 -> 0) = 1/2` (S2 of the
/// testable-properties list: proposal asymmetry must not bias the
/// recovered Boltzmann distribution).
#[derive(Clone)]
pub struct AsymmetricTwoState {
    pub state: bool,
}

pub struct Flip {
    q: f64,
}

impl Configuration for AsymmetricTwoState {
    type Energy = f64;
    type Step = Flip;

    fn system_size(&self) -> usize {
        1
    }

    fn total_energy(&self) -> f64 {
        if self.state {
            1.0
        } else {
            0.0
        }
    }

    fn propose_step<R: RandomNumberGenerator>(&self, _rng: &mut R) -> Flip {
        let q = if self.state { 0.5 } else { 2.0 };
        Flip { q }
    }
}

impl Step<AsymmetricTwoState> for Flip {
    fn is_executable(&self) -> bool {
        true
    }

    fn delta_energy(&self) -> f64 {
        if self.q > 1.0 {
            1.0
        } else {
            -1.0
        }
    }

    fn selection_probability_factor(&self) -> f64 {
        self.q
    }

    fn execute(self, config: &mut AsymmetricTwoState) {
        config.state = !config.state;
    }
}

/// A system whose single elementary site is resampled independently (not
/// flipped) on every executed step - used by the autocorrelation scenario
/// (S4) to produce a provably uncorrelated observable sequence.
#[derive(Clone)]
pub struct IndependentResample {
    pub value: bool,
}

pub struct Resample {
    new_value: bool,
}

impl Configuration for IndependentResample {
    type Energy = f64;
    type Step = Resample;

    fn system_size(&self) -> usize {
        1
    }

    fn total_energy(&self) -> f64 {
        0.0
    }

    fn propose_step<R: RandomNumberGenerator>(&self, rng: &mut R) -> Resample {
        Resample { new_value: rng.uniform01() < 0.5 }
    }
}

impl Step<IndependentResample> for Resample {
    fn is_executable(&self) -> bool {
        true
    }

    fn delta_energy(&self) -> f64 {
        // accepted unconditionally regardless of beta: x == 0 <= -ln(1) == 0
        0.0
    }

    fn selection_probability_factor(&self) -> f64 {
        1.0
    }

    fn execute(self, config: &mut IndependentResample) {
        config.value = self.new_value;
    }
}

pub struct IndependentObservable;

impl sampling::observable::Observable<IndependentResample> for IndependentObservable {
    type Value = f64;

    fn observe(&self, config: &IndependentResample) -> f64 {
        if config.value {
            1.0
        } else {
            0.0
        }
    }
}

/// Observes an [`Ising1D`] configuration's total energy as `f64`.
pub struct IsingEnergyObservable;

impl sampling::observable::Observable<Ising1D> for IsingEnergyObservable {
    type Value = f64;

    fn observe(&self, config: &Ising1D) -> f64 {
        config.total_energy() as f64
    }
}

pub fn seeded_rng(seed: u64) -> rand_pcg::Pcg64 {
    rand_pcg::Pcg64::seed_from_u64(seed)
}
