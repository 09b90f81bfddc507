//! Dense vector helpers shared by the clustering strategies.

use std::collections::HashSet;

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub(crate) fn normalize(v: &mut [f64]) {
    let n = norm(v);
    if n > 0.0 {
        for x in v.iter_mut() {
            *x /= n;
        }
    }
}

/// Cosine similarity; `0.0` when either side is a zero vector.
pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot(a, b) / denom
    }
}

pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Component-wise mean of the rows selected by `indices`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_of(rows: &[Vec<f64>], indices: &[usize]) -> Vec<f64> {
    let dim = rows.first().map_or(0, Vec::len);
    let mut mean = vec![0.0; dim];
    if indices.is_empty() {
        return mean;
    }
    for &i in indices {
        for (m, v) in mean.iter_mut().zip(&rows[i]) {
            *m += v;
        }
    }
    let count = indices.len() as f64;
    for m in &mut mean {
        *m /= count;
    }
    mean
}

/// Number of bitwise-distinct rows.
pub(crate) fn distinct_rows(rows: &[Vec<f64>]) -> usize {
    rows.iter()
        .map(|row| row.iter().map(|v| v.to_bits()).collect::<Vec<u64>>())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_rows_ignores_duplicates() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(distinct_rows(&rows), 2);
    }

    #[test]
    fn mean_of_selected_rows() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![9.0, 9.0]];
        assert_eq!(mean_of(&rows, &[0, 1]), vec![0.5, 0.5]);
    }
}
