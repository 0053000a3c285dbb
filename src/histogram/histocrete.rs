use std::collections::BTreeMap;
use std::ops::{Add, Div};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use super::{HistogramErrors, HistogramOps};

/// # Discrete histogram
/// * keys are used verbatim - no binning functor
/// * backed by a `BTreeMap`, so iteration is always in key order and the
///   key set grows as new keys are encountered, which is exactly what
///   Wang-Landau needs when it lets the random walk define its own energy
///   range (`spec.md` §4.7)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "K: Serialize, V: Serialize",
        deserialize = "K: Ord + Deserialize<'de>, V: Deserialize<'de>"
    ))
)]
pub struct Histocrete<K, V> {
    map: BTreeMap<K, V>,
}

impl<K, V> Default for Histocrete<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self { map: BTreeMap::new() }
    }
}

impl<K, V> Histocrete<K, V>
where
    K: Ord + Clone,
{
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directly overwrite the value stored for `key`.
    pub fn set(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    /// All keys currently stored, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Build an empty histogram that carries exactly the keys currently
    /// present in `other`, each initialized to `V::default()`
    /// ("initialize empty with the same bin set as another", `spec.md` §4.3).
    pub fn empty_like(other: &Self) -> Self
    where
        V: Default,
    {
        let map = other.map.keys().cloned().map(|k| (k, V::default())).collect();
        Self { map }
    }

    /// Add `self` and `other` pointwise. `Err` unless both histograms have
    /// exactly the same key set.
    pub fn checked_add(&self, other: &Self) -> Result<Self, HistogramErrors>
    where
        V: Add<Output = V> + Copy,
    {
        self.zip_with(other, Add::add)
    }

    /// Divide `self` by `other` pointwise. `Err` unless both histograms have
    /// exactly the same key set.
    pub fn checked_div(&self, other: &Self) -> Result<Self, HistogramErrors>
    where
        V: Div<Output = V> + Copy,
    {
        self.zip_with(other, Div::div)
    }

    fn zip_with<F>(&self, other: &Self, op: F) -> Result<Self, HistogramErrors>
    where
        V: Copy,
        F: Fn(V, V) -> V,
    {
        if self.map.len() != other.map.len() {
            return Err(HistogramErrors::KeySetMismatch);
        }
        let mut map = BTreeMap::new();
        for (k, v) in &self.map {
            let other_v = other.map.get(k).ok_or(HistogramErrors::KeySetMismatch)?;
            map.insert(k.clone(), op(*v, *other_v));
        }
        Ok(Self { map })
    }
}

impl<K, V> HistogramOps<K, V> for Histocrete<K, V>
where
    K: Ord + Clone,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn entry_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.map.entry(key).or_insert_with(V::default)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.map.iter())
    }

    fn reset(&mut self)
    where
        V: Default,
    {
        for v in self.map.values_mut() {
            *v = V::default();
        }
    }
}
