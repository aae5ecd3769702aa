//! K-means clustering with silhouette scoring.

use crate::error::{Result, StudioError};
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tuning knobs for [`kmeans`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// Lloyd iterations per run before giving up on convergence
    pub max_iterations: usize,
    /// Independent k-means++ restarts; the run with the lowest inertia wins
    pub n_init: usize,
    /// Seed for the restarts, so results are reproducible
    pub seed: u64,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            n_init: 10,
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KMeansResult {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index of every input point
    pub assignments: Vec<usize>,
    /// Sum of squared distances from each point to its centroid
    pub inertia: f64,
    /// Iterations used by the winning run
    pub iterations: usize,
}

impl KMeansResult {
    /// Number of points in each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &a in &self.assignments {
            sizes[a] += 1;
        }
        sizes
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

fn check_points(points: &[Vec<f64>]) -> Result<usize> {
    let first = points
        .first()
        .ok_or_else(|| StudioError::invalid("Clustering needs at least one point"))?;
    let dim = first.len();
    if dim == 0 {
        return Err(StudioError::invalid("Points must have at least one coordinate"));
    }
    for (i, p) in points.iter().enumerate() {
        if p.len() != dim {
            return Err(StudioError::invalid(format!(
                "Point {} has {} coordinates, expected {}",
                i,
                p.len(),
                dim
            )));
        }
        if p.iter().any(|v| !v.is_finite()) {
            return Err(StudioError::invalid(format!(
                "Point {} has a non-finite coordinate",
                i
            )));
        }
    }
    Ok(dim)
}

fn nearest(centroids: &[Vec<f64>], point: &[f64]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(c, point)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the closest chosen one
fn seed_centroids(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points.iter().map(|p| nearest(&centroids, p).1).collect();
        let idx = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // Every point already coincides with a centroid
            Err(_) => rng.gen_range(0..points.len()),
        };
        centroids.push(points[idx].clone());
    }
    centroids
}

fn lloyd(
    points: &[Vec<f64>],
    mut centroids: Vec<Vec<f64>>,
    dim: usize,
    max_iterations: usize,
) -> KMeansResult {
    let k = centroids.len();
    let mut assignments = vec![usize::MAX; points.len()];
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        let mut changed = false;
        for (i, p) in points.iter().enumerate() {
            let (c, _) = nearest(&centroids, p);
            if assignments[i] != c {
                assignments[i] = c;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![vec![0.0; dim]; k];
        let mut counts = vec![0usize; k];
        for (p, &a) in points.iter().zip(&assignments) {
            counts[a] += 1;
            for (s, v) in sums[a].iter_mut().zip(p) {
                *s += v;
            }
        }
        for (c, (sum, count)) in centroids.iter_mut().zip(sums.into_iter().zip(counts)) {
            // An empty cluster keeps its previous centroid
            if count > 0 {
                *c = sum.into_iter().map(|s| s / count as f64).collect();
            }
        }
    }

    let inertia = points
        .iter()
        .zip(&assignments)
        .map(|(p, &a)| squared_distance(p, &centroids[a]))
        .sum();

    KMeansResult {
        centroids,
        assignments,
        inertia,
        iterations,
    }
}

/// Partition points into `k` clusters
///
/// Runs Lloyd's algorithm from `options.n_init` k-means++ starts and keeps
/// the run with the lowest inertia. Distances are Euclidean.
///
/// # Arguments
/// * `points` - Points of equal, non-zero dimension
/// * `k` - Number of clusters, `1..=points.len()`
/// * `options` - Iteration limit, restarts and seed
///
/// # Returns
/// * `Result<KMeansResult>` - centroids, per-point assignments and inertia
pub fn kmeans(points: &[Vec<f64>], k: usize, options: &KMeansOptions) -> Result<KMeansResult> {
    let dim = check_points(points)?;
    if k == 0 || k > points.len() {
        return Err(StudioError::invalid(format!(
            "k must be between 1 and {} (the number of points), got {}",
            points.len(),
            k
        )));
    }
    if options.max_iterations == 0 {
        return Err(StudioError::invalid("max_iterations must be at least 1"));
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut best: Option<KMeansResult> = None;
    for _ in 0..options.n_init.max(1) {
        let start = seed_centroids(points, k, &mut rng);
        let run = lloyd(points, start, dim, options.max_iterations);
        if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }

    let best = best.ok_or_else(|| StudioError::invalid("k-means produced no run"))?;
    log::debug!(
        "k-means k={} over {} points: inertia={:.4} after {} iterations",
        k,
        points.len(),
        best.inertia,
        best.iterations
    );
    Ok(best)
}

/// Mean silhouette coefficient of a clustering
///
/// For each point, `a` is the mean distance to the other members of its
/// cluster and `b` the smallest mean distance to the members of another
/// cluster; its silhouette is `(b - a) / max(a, b)`. Points alone in their
/// cluster score 0. The result lies in `-1..=1`, higher is better.
pub fn silhouette_score(points: &[Vec<f64>], assignments: &[usize]) -> Result<f64> {
    check_points(points)?;
    if points.len() != assignments.len() {
        return Err(StudioError::invalid(format!(
            "{} points but {} assignments",
            points.len(),
            assignments.len()
        )));
    }
    if let Some(&label) = assignments.iter().find(|&&a| a >= points.len()) {
        return Err(StudioError::invalid(format!(
            "Cluster label {} out of range for {} points",
            label,
            points.len()
        )));
    }
    let clusters = assignments.iter().copied().max().map_or(0, |m| m + 1);
    let mut sizes = vec![0usize; clusters];
    for &a in assignments {
        sizes[a] += 1;
    }
    if sizes.iter().filter(|&&s| s > 0).count() < 2 {
        return Err(StudioError::invalid(
            "Silhouette needs at least two non-empty clusters",
        ));
    }

    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        let own = assignments[i];
        if sizes[own] < 2 {
            continue;
        }
        let mut sums = vec![0.0; clusters];
        for (j, q) in points.iter().enumerate() {
            if i != j {
                sums[assignments[j]] += distance(p, q);
            }
        }
        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..clusters)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);
        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }
    Ok(total / points.len() as f64)
}

/// Silhouette of every candidate k and the best one
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KSuggestion {
    pub best_k: usize,
    pub scores: Vec<(usize, f64)>,
}

/// Try every k in `k_min..=k_max` and pick the one with the best silhouette
pub fn suggest_k(
    points: &[Vec<f64>],
    k_min: usize,
    k_max: usize,
    options: &KMeansOptions,
) -> Result<KSuggestion> {
    check_points(points)?;
    if k_min < 2 || k_min > k_max {
        return Err(StudioError::invalid(format!(
            "Invalid k range {}..={}; k_min must be at least 2",
            k_min, k_max
        )));
    }
    if k_max >= points.len() {
        return Err(StudioError::invalid(format!(
            "k_max {} must be below the number of points {}",
            k_max,
            points.len()
        )));
    }

    let mut scores = Vec::with_capacity(k_max - k_min + 1);
    for k in k_min..=k_max {
        let run = kmeans(points, k, options)?;
        // Duplicate points can leave fewer non-empty clusters than k
        let score = silhouette_score(points, &run.assignments).unwrap_or(-1.0);
        scores.push((k, score));
    }
    let best_k = scores
        .iter()
        .fold((k_min, f64::NEG_INFINITY), |best, &(k, s)| {
            if s > best.1 { (k, s) } else { best }
        })
        .0;
    Ok(KSuggestion { best_k, scores })
}
