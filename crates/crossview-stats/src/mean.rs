//! Grouped means with an explicit "no data" marker

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Mean of a group
///
/// An empty group has no mean. It is reported as `NoData` so renderers can
/// omit the point instead of drawing a zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mean {
    Value(f64),
    NoData,
}

impl Mean {
    /// The mean, if the group had data
    pub fn value(&self) -> Option<f64> {
        match self {
            Mean::Value(v) => Some(*v),
            Mean::NoData => None,
        }
    }

    /// Whether the group was empty
    pub fn is_no_data(&self) -> bool {
        matches!(self, Mean::NoData)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> Mean {
        if self.count == 0 {
            Mean::NoData
        } else {
            Mean::Value(self.sum / self.count as f64)
        }
    }
}

/// Mean of a sequence; non-finite values are skipped
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Mean {
    let mut acc = Accumulator::default();
    for v in values {
        acc.push(v);
    }
    acc.mean()
}

/// Per-key means in a fixed key order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans<K> {
    entries: Vec<(K, Mean)>,
}

impl<K: Eq> GroupMeans<K> {
    /// Mean for a key; `NoData` when the key has no group
    pub fn get(&self, key: &K) -> Mean {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| *m)
            .unwrap_or(Mean::NoData)
    }

    /// `(key, mean)` pairs
    pub fn entries(&self) -> &[(K, Mean)] {
        &self.entries
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest defined mean
    pub fn max_value(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|(_, m)| m.value())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// Mean of `value_fn` grouped by `key_fn`, groups in first-seen order
///
/// Only keys that occur are reported. A group whose values are all
/// non-finite is `NoData`.
pub fn mean_by<'a, T, K, I, KF, VF>(items: I, mut key_fn: KF, mut value_fn: VF) -> GroupMeans<K>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    KF: FnMut(&T) -> K,
    VF: FnMut(&T) -> f64,
    K: Clone + Eq + Hash,
{
    let mut order: Vec<K> = Vec::new();
    let mut groups: HashMap<K, Accumulator> = HashMap::new();

    for item in items {
        let key = key_fn(item);
        let value = value_fn(item);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Accumulator::default()
            })
            .push(value);
    }

    let entries = order
        .into_iter()
        .map(|k| {
            let m = groups.get(&k).map(|a| a.mean()).unwrap_or(Mean::NoData);
            (k, m)
        })
        .collect();

    GroupMeans { entries }
}

/// Means for a caller-supplied key domain, in that order
///
/// Keys with no matching items are `NoData`; items whose key is outside the
/// domain are ignored.
pub fn mean_over<'a, T, K, I, KF, VF>(
    keys: &[K],
    items: I,
    mut key_fn: KF,
    mut value_fn: VF,
) -> GroupMeans<K>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    KF: FnMut(&T) -> K,
    VF: FnMut(&T) -> f64,
    K: Clone + Eq + Hash,
{
    let mut groups: HashMap<K, Accumulator> =
        keys.iter().map(|k| (k.clone(), Accumulator::default())).collect();

    for item in items {
        if let Some(acc) = groups.get_mut(&key_fn(item)) {
            acc.push(value_fn(item));
        }
    }

    let entries = keys
        .iter()
        .map(|k| {
            let m = groups.get(k).map(|a| a.mean()).unwrap_or(Mean::NoData);
            (k.clone(), m)
        })
        .collect();

    GroupMeans { entries }
}
