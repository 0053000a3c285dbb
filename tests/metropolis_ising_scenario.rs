//! S1: Metropolis on a periodic 1D Ising chain matches the analytic mean
//! energy within tolerance.
mod common;

use common::{seeded_rng, Ising1D, IsingEnergyObservable};
use sampling::metropolis::{MetropolisEngine, MetropolisParameters};
use sampling::observable::VecAccumulator;

#[test]
fn s1_four_site_chain_mean_energy_matches_analytic_value() {
    let beta = 1.0_f64;
    let mut config = Ising1D::all_up(4);
    let rng = seeded_rng(0);

    // relaxation_steps = 10^5 - measurement_number, 50 steps apart, matches
    // the scenario's "10^5 steps from all-up start... 1000 measurements, 50
    // steps apart".
    let params = MetropolisParameters::new(100_000 - 1_000 * 50, 1_000, 50).unwrap();
    let mut engine = MetropolisEngine::new(params, &mut config, rng);
    let mut acc = VecAccumulator::new();

    engine.do_metropolis_simulation(&beta, &IsingEnergyObservable, &mut acc, None);

    let samples = acc.samples();
    let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;

    let analytic = -4.0 * beta.tanh();
    assert!(
        (mean - analytic).abs() < 0.05,
        "mean energy {mean} too far from analytic {analytic}"
    );
}
