//! Ward agglomerative clustering over cosine distance.

use crate::types::LinkageStep;
use crate::vector::cosine_similarity;

/// Build the full Ward linkage tree for `points`.
///
/// Pairwise cosine distances seed the tree; merged distances follow the
/// Lance-Williams update for Ward's criterion. At each step the closest active
/// pair is merged, the lowest-index pair winning ties.
#[allow(clippy::cast_precision_loss, clippy::needless_range_loop)]
pub(crate) fn ward_linkage(points: &[Vec<f64>]) -> Vec<LinkageStep> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut dist = vec![vec![0.0_f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (1.0 - cosine_similarity(&points[i], &points[j])).max(0.0);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let mut active = vec![true; n];
    let mut ids: Vec<usize> = (0..n).collect();
    let mut sizes = vec![1usize; n];
    let mut steps = Vec::with_capacity(n - 1);

    for step in 0..(n - 1) {
        let mut pair = (0, 0);
        let mut best = f64::INFINITY;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if active[j] && dist[i][j] < best {
                    best = dist[i][j];
                    pair = (i, j);
                }
            }
        }

        let (a, b) = pair;
        let (size_a, size_b) = (sizes[a], sizes[b]);
        let d_ab = dist[a][b];

        for c in 0..n {
            if !active[c] || c == a || c == b {
                continue;
            }
            let size_c = sizes[c] as f64;
            let (na, nb) = (size_a as f64, size_b as f64);
            let merged = ((size_c + na) * dist[c][a].powi(2) + (size_c + nb) * dist[c][b].powi(2)
                - size_c * d_ab.powi(2))
                / (size_c + na + nb);
            let d = merged.max(0.0).sqrt();
            dist[a][c] = d;
            dist[c][a] = d;
        }

        steps.push(LinkageStep {
            left: ids[a].min(ids[b]),
            right: ids[a].max(ids[b]),
            distance: d_ab,
            size: size_a + size_b,
        });

        active[b] = false;
        ids[a] = n + step;
        sizes[a] = size_a + size_b;
    }

    steps
}

/// Cut the tree so exactly `k` groups remain.
///
/// Replays the first `n - k` merges. Labels start at 1 and are numbered in
/// order of each group's first member.
pub(crate) fn cut_tree(n: usize, steps: &[LinkageStep], k: usize) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..(2 * n).saturating_sub(1).max(n)).collect();
    let merges = n.saturating_sub(k.max(1)).min(steps.len());

    for (i, step) in steps.iter().take(merges).enumerate() {
        parent[step.left] = n + i;
        parent[step.right] = n + i;
    }

    let root = |mut node: usize| {
        while parent[node] != node {
            node = parent[node];
        }
        node
    };

    let mut label_of_root: Vec<(usize, usize)> = Vec::new();
    (0..n)
        .map(|leaf| {
            let r = root(leaf);
            if let Some(&(_, label)) = label_of_root.iter().find(|(root_id, _)| *root_id == r) {
                label
            } else {
                let label = label_of_root.len() + 1;
                label_of_root.push((r, label));
                label
            }
        })
        .collect()
}
