use chartstudio::analytics::clustering::{KMeansOptions, kmeans, silhouette_score, suggest_k};

fn three_blobs() -> Vec<Vec<f64>> {
    let centers = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)];
    let offsets = [(0.0, 0.0), (0.5, 0.2), (-0.3, 0.4), (0.2, -0.5), (-0.4, -0.1)];
    centers
        .iter()
        .flat_map(|&(cx, cy)| offsets.iter().map(move |&(dx, dy)| vec![cx + dx, cy + dy]))
        .collect()
}

#[test]
fn separates_well_spread_blobs() {
    let points = three_blobs();
    let result = kmeans(&points, 3, &KMeansOptions::default()).unwrap();

    assert_eq!(result.centroids.len(), 3);
    assert_eq!(result.assignments.len(), points.len());
    assert_eq!(result.cluster_sizes().iter().sum::<usize>(), 15);

    // Every blob ends up in a single cluster of its own
    for blob in 0..3 {
        let first = result.assignments[blob * 5];
        assert!(
            result.assignments[blob * 5..blob * 5 + 5].iter().all(|&a| a == first),
            "Blob {} was split",
            blob
        );
    }
    let mut labels = vec![result.assignments[0], result.assignments[5], result.assignments[10]];
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), 3, "Two blobs share a cluster");
    assert!(result.inertia < 5.0, "Inertia too high: {}", result.inertia);
}

#[test]
fn same_seed_same_result() {
    let points = three_blobs();
    let options = KMeansOptions {
        seed: 7,
        ..KMeansOptions::default()
    };
    let a = kmeans(&points, 2, &options).unwrap();
    let b = kmeans(&points, 2, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn k_equal_to_n_has_zero_inertia() {
    let points = vec![vec![1.0], vec![5.0], vec![9.0]];
    let result = kmeans(&points, 3, &KMeansOptions::default()).unwrap();
    assert!(result.inertia.abs() < 1e-12);
}

#[test]
fn invalid_input_is_rejected() {
    let options = KMeansOptions::default();
    assert!(kmeans(&[], 1, &options).is_err());
    assert!(kmeans(&[vec![1.0], vec![2.0]], 0, &options).is_err());
    assert!(kmeans(&[vec![1.0], vec![2.0]], 3, &options).is_err());
    assert!(kmeans(&[vec![1.0, 2.0], vec![2.0]], 1, &options).is_err(), "Ragged points accepted");
    assert!(kmeans(&[vec![f64::NAN]], 1, &options).is_err());
}

#[test]
fn silhouette_rewards_tight_clusters() {
    let points = vec![vec![0.0], vec![0.1], vec![10.0], vec![10.1]];
    let good = silhouette_score(&points, &[0, 0, 1, 1]).unwrap();
    let bad = silhouette_score(&points, &[0, 1, 0, 1]).unwrap();
    assert!(good > 0.9, "good = {}", good);
    assert!(bad < 0.0, "bad = {}", bad);

    assert!(silhouette_score(&points, &[0, 0, 0, 0]).is_err(), "Single cluster accepted");
    assert!(silhouette_score(&points, &[0, 1]).is_err());
}

#[test]
fn silhouette_rejects_out_of_range_labels() {
    let points = vec![vec![0.0], vec![1.0], vec![5.0]];
    assert!(
        silhouette_score(&points, &[0, 0, usize::MAX]).is_err(),
        "Huge label accepted"
    );
    assert!(silhouette_score(&points, &[0, 0, 1_000_000_000_000]).is_err());
    assert!(silhouette_score(&points, &[0, 0, 3]).is_err());
    assert!(silhouette_score(&points, &[0, 0, 2]).is_ok());
}

#[test]
fn suggests_the_natural_cluster_count() {
    let points = three_blobs();
    let suggestion = suggest_k(&points, 2, 5, &KMeansOptions::default()).unwrap();
    assert_eq!(suggestion.best_k, 3);
    assert_eq!(
        suggestion.scores.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec![2, 3, 4, 5]
    );

    assert!(suggest_k(&points, 1, 3, &KMeansOptions::default()).is_err());
    assert!(suggest_k(&points, 2, 15, &KMeansOptions::default()).is_err());
}
