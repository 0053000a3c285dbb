//! # Histogram abstraction (C3)
//! * two concrete realizations of the same contract: [`Histocrete`]
//!   (discrete, hashable/comparable keys used verbatim) and [`Binned`]
//!   (continuous values mapped into buckets by a binning functor)
//! * both grow their key set on demand rather than requiring a
//!   pre-declared range, matching `spec.md` §4.7's adopted choice of
//!   "letting the walk define" the energy range
mod binned;
mod histocrete;

pub use binned::Binned;
pub use histocrete::Histocrete;

use std::fmt;

use num_traits::ToPrimitive;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Errors raised by histogram operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum HistogramErrors {
    /// pointwise arithmetic was attempted between two histograms that do
    /// not share the same key set.
    KeySetMismatch,
    /// a `checked_*` operation that requires at least one bin was called
    /// on an empty histogram.
    EmptyHistogram,
    /// a [`Binned`] histogram was constructed with `width <= 0.0`.
    NonPositiveWidth,
}

impl fmt::Display for HistogramErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistogramErrors::KeySetMismatch => {
                write!(f, "histograms do not share the same key set")
            }
            HistogramErrors::EmptyHistogram => write!(f, "histogram has no bins"),
            HistogramErrors::NonPositiveWidth => write!(f, "bin width must be > 0"),
        }
    }
}

impl std::error::Error for HistogramErrors {}

/// # Shared histogram operations
/// * `K` is the key (bin identity), `V` the stored value (incidence count,
///   log-density, ...)
/// * iteration is always in key order
pub trait HistogramOps<K, V> {
    /// Look up the value stored for `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Look up `key`, inserting `V::default()` on first visit - this is
    /// what realizes "unseen energies get `S[E] = 0` implicitly" (`spec.md`
    /// §4.7) at the histogram layer.
    fn entry_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default;

    /// Number of distinct keys currently stored.
    fn len(&self) -> usize;

    /// `true` if no key has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(key, value)` pairs in ascending key order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Reset every stored value to `V::default()` without forgetting the
    /// key set.
    fn reset(&mut self)
    where
        V: Default;
}

/// # Statistics derived from a histogram's values
/// * blanket-implemented for anything implementing [`HistogramOps`] with a
///   numeric-ish `V`
/// * `min_y`/`mean_y`/`flatness` only ever consider entries whose value is
///   not `V::default()` ("non-zero-incidence bins only", `spec.md` §4.3/§4.7)
/// * the `checked_*` counterparts exist for callers who want a hard error
///   instead of silently treating "no non-zero-incidence bins" as "nothing
///   to report" - e.g. a Wang-Landau driver that wants a loud failure if it
///   is ever asked for flatness before a single step has run, rather than
///   an `Option` it might forget to check.
pub trait HistogramStats<V> {
    /// Smallest value among non-default entries.
    fn min_y(&self) -> Option<V>;
    /// Mean value among non-default entries.
    fn mean_y(&self) -> Option<f64>;
    /// `min_y() / mean_y()`, the Wang-Landau flatness criterion.
    fn flatness(&self) -> Option<f64>;

    /// [`HistogramStats::min_y`], or [`HistogramErrors::EmptyHistogram`] if
    /// there are no non-zero-incidence bins to take a minimum over.
    fn checked_min_y(&self) -> Result<V, HistogramErrors> {
        self.min_y().ok_or(HistogramErrors::EmptyHistogram)
    }

    /// [`HistogramStats::mean_y`], or [`HistogramErrors::EmptyHistogram`] if
    /// there are no non-zero-incidence bins to average.
    fn checked_mean_y(&self) -> Result<f64, HistogramErrors> {
        self.mean_y().ok_or(HistogramErrors::EmptyHistogram)
    }

    /// [`HistogramStats::flatness`], or [`HistogramErrors::EmptyHistogram`]
    /// if there are no non-zero-incidence bins to compute a ratio over.
    fn checked_flatness(&self) -> Result<f64, HistogramErrors> {
        self.flatness().ok_or(HistogramErrors::EmptyHistogram)
    }
}

impl<K, V, H> HistogramStats<V> for H
where
    H: HistogramOps<K, V>,
    V: Copy + PartialOrd + PartialEq + Default + ToPrimitive,
{
    fn min_y(&self) -> Option<V> {
        self.iter()
            .map(|(_, v)| *v)
            .filter(|v| *v != V::default())
            .fold(None, |acc, v| match acc {
                None => Some(v),
                Some(m) if v < m => Some(v),
                Some(m) => Some(m),
            })
    }

    fn mean_y(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for (_, v) in self.iter() {
            if *v != V::default() {
                sum += v.to_f64().expect("V must be representable as f64");
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    fn flatness(&self) -> Option<f64> {
        let mean = self.mean_y()?;
        if mean == 0.0 {
            return None;
        }
        let min = self.min_y()?.to_f64().expect("V must be representable as f64");
        Some(min / mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::Histocrete;

    #[test]
    fn checked_stats_raise_empty_histogram_on_an_empty_histogram() {
        let h: Histocrete<i64, u64> = Histocrete::new();
        assert_eq!(h.checked_min_y(), Err(HistogramErrors::EmptyHistogram));
        assert_eq!(h.checked_mean_y(), Err(HistogramErrors::EmptyHistogram));
        assert_eq!(h.checked_flatness(), Err(HistogramErrors::EmptyHistogram));
    }

    #[test]
    fn checked_stats_raise_empty_histogram_when_every_bin_is_zero_incidence() {
        let mut h: Histocrete<i64, u64> = Histocrete::new();
        h.set(-4, 0);
        h.set(4, 0);
        assert_eq!(h.checked_flatness(), Err(HistogramErrors::EmptyHistogram));
    }

    #[test]
    fn checked_stats_agree_with_the_option_api_on_a_populated_histogram() {
        let mut h: Histocrete<i64, u64> = Histocrete::new();
        h.set(-4, 10);
        h.set(0, 20);
        assert_eq!(h.checked_min_y(), Ok(10));
        assert_eq!(h.checked_mean_y(), Ok(15.0));
        assert_eq!(h.checked_flatness(), Ok(10.0 / 15.0));
    }
}
