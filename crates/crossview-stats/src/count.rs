//! Grouped counts and top-N rollups

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Key→count mapping that remembers first-encountered key order
#[derive(Debug, Clone, Serialize)]
pub struct Counts<K> {
    entries: Vec<(K, usize)>,
    #[serde(skip)]
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> Default for Counts<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Counts<K> {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a key
    pub fn increment(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Count of a key, 0 when never seen
    pub fn get(&self, key: &K) -> usize {
        self.index.get(key).map(|&pos| self.entries[pos].1).unwrap_or(0)
    }

    /// `(key, count)` pairs in first-seen order
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Largest single count
    pub fn max_count(&self) -> Option<usize> {
        self.entries.iter().map(|(_, c)| *c).max()
    }
}

/// Count items by a derived key
///
/// Counts always sum to the number of items.
pub fn count_by<'a, T, K, I, F>(items: I, mut key_fn: F) -> Counts<K>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: FnMut(&T) -> K,
    K: Clone + Eq + Hash,
{
    let mut counts = Counts::new();
    for item in items {
        counts.increment(key_fn(item));
    }
    counts
}

/// How equal counts are ordered when ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier-encountered key ranks first
    #[default]
    FirstSeen,
    /// Smaller key ranks first
    KeyOrder,
}

/// Configuration of a top-N rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopN {
    /// Number of keys kept before merging the rest into "Other"
    pub n: usize,
    /// Ordering among equal counts
    pub tie_break: TieBreak,
}

impl TopN {
    /// Keep `n` keys, ties by first-seen order
    pub fn new(n: usize) -> Self {
        Self {
            n,
            tie_break: TieBreak::FirstSeen,
        }
    }

    /// Set the tie policy
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// A bar in a ranked rollup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket<K> {
    /// A real key
    Key(K),
    /// Synthetic bucket merging every key beyond the top N
    Other,
}

impl<K> Bucket<K> {
    /// The real key, if any
    pub fn key(&self) -> Option<&K> {
        match self {
            Bucket::Key(k) => Some(k),
            Bucket::Other => None,
        }
    }

    /// Whether this is the synthetic "Other" bucket
    pub fn is_other(&self) -> bool {
        matches!(self, Bucket::Other)
    }
}

/// A bucket with its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBucket<K> {
    pub bucket: Bucket<K>,
    pub count: usize,
}

/// Rank keys by count and merge everything beyond the top N into "Other"
///
/// Keys are ordered by descending count. When there are more than `n`
/// distinct keys, the trailing ones are summed into a single
/// [`Bucket::Other`] placed last. With `n` or fewer keys no "Other" bucket
/// is produced.
pub fn top_n_with_other<K>(counts: &Counts<K>, top: &TopN) -> Vec<RankedBucket<K>>
where
    K: Clone + Eq + Hash + Ord,
{
    let mut ranked: Vec<(usize, &K, usize)> = counts
        .entries()
        .iter()
        .enumerate()
        .map(|(pos, (k, c))| (pos, k, *c))
        .collect();

    ranked.sort_by(|a, b| {
        b.2.cmp(&a.2).then_with(|| match top.tie_break {
            TieBreak::FirstSeen => a.0.cmp(&b.0),
            TieBreak::KeyOrder => a.1.cmp(b.1),
        })
    });

    let other: Option<usize> = if ranked.len() > top.n {
        Some(ranked[top.n..].iter().map(|(_, _, c)| c).sum())
    } else {
        None
    };

    let mut buckets: Vec<RankedBucket<K>> = ranked
        .into_iter()
        .take(top.n)
        .map(|(_, k, c)| RankedBucket {
            bucket: Bucket::Key(k.clone()),
            count: c,
        })
        .collect();

    if let Some(count) = other {
        buckets.push(RankedBucket {
            bucket: Bucket::Other,
            count,
        });
    }

    buckets
}
