//! Stacked layer series for streamgraphs and stacked areas
//!
//! A stack turns an `index × series` value matrix into one layer per series.
//! Each layer holds a `(lower, upper)` pair per index position, where
//! `upper - lower` is the layer's value there.
//!
//! Layers are accumulated in series-key order and index order, always with
//! the same sequence of floating-point operations, so the same input gives
//! bit-identical output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Vertical arrangement of stacked layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// First layer sits on zero
    #[default]
    Zero,
    /// Each column is centred around zero (streamgraph)
    Silhouette,
}

/// One stacked series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer<K> {
    /// Series key
    pub key: K,
    /// `(lower, upper)` per index position
    pub points: Vec<(f64, f64)>,
}

impl<K> Layer<K> {
    /// Value at an index position (`upper - lower`)
    pub fn value_at(&self, position: usize) -> Option<f64> {
        self.points.get(position).map(|(lo, hi)| hi - lo)
    }
}

/// Sum `value_fn` into an `index × series` matrix
///
/// Items whose index or series key is not listed are ignored. Row `i`
/// corresponds to `index[i]`, column `s` to `series_keys[s]`.
pub fn pivot<'a, T, IK, SK, I, IF, SF, VF>(
    items: I,
    mut index_fn: IF,
    mut series_fn: SF,
    mut value_fn: VF,
    index: &[IK],
    series_keys: &[SK],
) -> Vec<Vec<f64>>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    IF: FnMut(&T) -> IK,
    SF: FnMut(&T) -> SK,
    VF: FnMut(&T) -> f64,
    IK: Eq + Hash,
    SK: Eq + Hash,
{
    let rows: HashMap<&IK, usize> = index.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let cols: HashMap<&SK, usize> = series_keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let mut matrix = vec![vec![0.0; series_keys.len()]; index.len()];

    for item in items {
        let row = rows.get(&index_fn(item)).copied();
        let col = cols.get(&series_fn(item)).copied();
        if let (Some(row), Some(col)) = (row, col) {
            matrix[row][col] += value_fn(item);
        }
    }

    matrix
}

/// Count items into an `index × series` matrix
pub fn pivot_counts<'a, T, IK, SK, I, IF, SF>(
    items: I,
    index_fn: IF,
    series_fn: SF,
    index: &[IK],
    series_keys: &[SK],
) -> Vec<Vec<f64>>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    IF: FnMut(&T) -> IK,
    SF: FnMut(&T) -> SK,
    IK: Eq + Hash,
    SK: Eq + Hash,
{
    pivot(items, index_fn, series_fn, |_| 1.0, index, series_keys)
}

/// Stack a value matrix into layers
///
/// `matrix[i][s]` is the value of series `s` at index position `i`; rows
/// shorter than `series_keys` are treated as zero-padded and non-finite
/// values as zero.
pub fn stack_matrix<K: Clone>(
    matrix: &[Vec<f64>],
    series_keys: &[K],
    offset: OffsetPolicy,
) -> Vec<Layer<K>> {
    let value = |row: &Vec<f64>, s: usize| -> f64 {
        row.get(s).copied().filter(|v| v.is_finite()).unwrap_or(0.0)
    };

    let mut layers: Vec<Layer<K>> = series_keys
        .iter()
        .map(|k| Layer {
            key: k.clone(),
            points: Vec::with_capacity(matrix.len()),
        })
        .collect();

    for row in matrix {
        let mut lower = match offset {
            OffsetPolicy::Zero => 0.0,
            OffsetPolicy::Silhouette => {
                let mut total = 0.0;
                for s in 0..series_keys.len() {
                    total += value(row, s);
                }
                -total / 2.0
            }
        };

        for (s, layer) in layers.iter_mut().enumerate() {
            let upper = lower + value(row, s);
            layer.points.push((lower, upper));
            lower = upper;
        }
    }

    layers
}

/// Count items by `index × series` and stack the counts
pub fn stack_series<'a, T, IK, SK, I, IF, SF>(
    items: I,
    index_fn: IF,
    series_fn: SF,
    index: &[IK],
    series_keys: &[SK],
    offset: OffsetPolicy,
) -> Vec<Layer<SK>>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    IF: FnMut(&T) -> IK,
    SF: FnMut(&T) -> SK,
    IK: Eq + Hash,
    SK: Clone + Eq + Hash,
{
    let matrix = pivot_counts(items, index_fn, series_fn, index, series_keys);
    stack_matrix(&matrix, series_keys, offset)
}

/// Smallest lower and largest upper bound over all layers
pub fn layers_extent<K>(layers: &[Layer<K>]) -> Option<(f64, f64)> {
    layers
        .iter()
        .flat_map(|l| l.points.iter())
        .fold(None, |acc, &(lo, hi)| match acc {
            None => Some((lo, hi)),
            Some((min, max)) => Some((min.min(lo), max.max(hi))),
        })
}
