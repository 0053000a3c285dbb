//! # RNG capability
//! * the Metropolis and Wang-Landau cores only ever need three things from
//!   whatever random number generator you plug in: a reseed from a `u32`,
//!   a uniform `f64` in `[0, 1)` and a uniform `u32` below some bound.
//! * this module does **not** provide a concrete generator. Bring your own
//!   (`rand_pcg`, `rand::rngs::StdRng`, a Mersenne-Twister crate, ...) -
//!   anything that already implements [`rand::RngCore`] and
//!   [`rand::SeedableRng`] gets the capability for free via the blanket
//!   impl below.
use rand::{Rng as _, RngCore, SeedableRng};

/// # The RNG capability the sampling core relies on
/// * reproducible from a `u32` seed
/// * serializable state, *if* the underlying type is `Serialize`
///   (true for e.g. `rand_pcg::Pcg64` built with its `serde1` feature)
///
/// You will basically never implement this by hand: any `T` that already
/// implements `rand::RngCore + rand::SeedableRng` gets it automatically.
pub trait RandomNumberGenerator: Clone {
    /// Reinitialize the generator's internal state from `seed`.
    fn reseed(&mut self, seed: u32);

    /// Draw a uniform `f64` in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// Draw a uniform `u32` in `[0, bound)`.
    ///
    /// # Panics
    /// if `bound == 0`.
    fn uniform_int(&mut self, bound: u32) -> u32;
}

impl<T> RandomNumberGenerator for T
where
    T: RngCore + SeedableRng + Clone,
{
    fn reseed(&mut self, seed: u32) {
        *self = T::seed_from_u64(seed as u64);
    }

    fn uniform01(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn uniform_int(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "uniform_int: bound 0 is not allowed");
        self.gen_range(0..bound)
    }
}
