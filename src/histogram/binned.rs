use std::ops::{Add, Div};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use super::{HistogramErrors, HistogramOps, Histocrete};

/// # Binned (continuous) histogram
/// * maps a raw `f64` value `x` into a bucket key via the binning functor
///   `φ(x) = reference + width · ⌊(x - reference) / width⌋` (`spec.md` §4.3)
/// * backed by a growing [`Histocrete<i64, V>`] keyed by bucket index, so -
///   just like the discrete variant - the covered range is whatever the
///   random walk has visited, not a pre-declared interval
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Binned<V> {
    width: f64,
    reference: f64,
    inner: Histocrete<i64, V>,
}

impl<V> Binned<V> {
    /// Create an empty binned histogram.
    ///
    /// # Errors
    /// [`HistogramErrors::NonPositiveWidth`] if `width <= 0.0`.
    pub fn new(width: f64, reference: f64) -> Result<Self, HistogramErrors> {
        if !(width > 0.0) {
            return Err(HistogramErrors::NonPositiveWidth);
        }
        Ok(Self {
            width,
            reference,
            inner: Histocrete::new(),
        })
    }

    /// Bucket width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Binning reference point.
    pub fn reference(&self) -> f64 {
        self.reference
    }

    /// Bucket key for raw value `x`: `⌊(x - reference) / width⌋`.
    pub fn key_for(&self, x: f64) -> i64 {
        ((x - self.reference) / self.width).floor() as i64
    }

    /// Representative raw value for bucket `key`: the bucket's left edge,
    /// `reference + width * key`.
    pub fn bucket_center(&self, key: i64) -> f64 {
        self.reference + self.width * key as f64
    }

    /// Count one observation of raw value `x`, inserting its bucket with
    /// `V::default()` first if this is the first time it is visited.
    pub fn count(&mut self, x: f64) -> &mut V
    where
        V: Default,
    {
        let key = self.key_for(x);
        self.inner.entry_or_insert(key)
    }

    /// Build an empty histogram with the same width/reference/key-set as
    /// `other`, all values reset to `V::default()`.
    pub fn empty_like(other: &Self) -> Self
    where
        V: Default,
    {
        Self {
            width: other.width,
            reference: other.reference,
            inner: Histocrete::empty_like(&other.inner),
        }
    }

    /// Add `self` and `other` pointwise. `Err` unless both histograms share
    /// width, reference and key set.
    pub fn checked_add(&self, other: &Self) -> Result<Self, HistogramErrors>
    where
        V: Add<Output = V> + Copy,
    {
        self.check_compatible(other)?;
        Ok(Self {
            width: self.width,
            reference: self.reference,
            inner: self.inner.checked_add(&other.inner)?,
        })
    }

    /// Divide `self` by `other` pointwise. `Err` unless both histograms
    /// share width, reference and key set.
    pub fn checked_div(&self, other: &Self) -> Result<Self, HistogramErrors>
    where
        V: Div<Output = V> + Copy,
    {
        self.check_compatible(other)?;
        Ok(Self {
            width: self.width,
            reference: self.reference,
            inner: self.inner.checked_div(&other.inner)?,
        })
    }

    fn check_compatible(&self, other: &Self) -> Result<(), HistogramErrors> {
        if self.width != other.width || self.reference != other.reference {
            Err(HistogramErrors::KeySetMismatch)
        } else {
            Ok(())
        }
    }

    /// Iterate `(bucket center, value)` pairs in ascending order.
    pub fn iter_buckets(&self) -> impl Iterator<Item = (f64, &V)> {
        self.inner.iter().map(move |(&k, v)| (self.bucket_center(k), v))
    }
}

impl<V> HistogramOps<i64, V> for Binned<V> {
    fn get(&self, key: &i64) -> Option<&V> {
        self.inner.get(key)
    }

    fn entry_or_insert(&mut self, key: i64) -> &mut V
    where
        V: Default,
    {
        self.inner.entry_or_insert(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&i64, &V)> + '_> {
        self.inner.iter()
    }

    fn reset(&mut self)
    where
        V: Default,
    {
        self.inner.reset()
    }
}
