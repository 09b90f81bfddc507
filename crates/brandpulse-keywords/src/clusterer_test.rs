use super::*;

fn keywords(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn scenario() -> Vec<String> {
    keywords(&[
        "vegan skincare",
        "organic skincare",
        "eco packaging",
        "sustainable packaging",
        "K-beauty trend",
    ])
}

fn sorted_members(result: &ClusterResult) -> Vec<String> {
    let mut all: Vec<String> = result
        .clusters
        .iter()
        .flat_map(|c| c.keywords.iter().cloned())
        .collect();
    all.sort();
    all
}

#[test]
fn cluster_count_at_keyword_count_is_halved() {
    for method in ["kmeans", "hierarchical"] {
        let result = KeywordClusterer::default().cluster(&scenario(), 5, method);
        assert!(result.success, "{method}: {:?}", result.error);
        assert_eq!(result.num_clusters, 2);
        assert_eq!(result.num_keywords, 5);
        assert_eq!(result.clusters.len(), 2);

        let mut expected = scenario();
        expected.sort();
        assert_eq!(sorted_members(&result), expected);
    }
}

#[test]
fn adjustment_never_drops_below_two() {
    assert_eq!(adjusted_cluster_count(3, 3), 2);
    assert_eq!(adjusted_cluster_count(10, 2), 2);
    assert_eq!(adjusted_cluster_count(9, 8), 4);
    assert_eq!(adjusted_cluster_count(3, 8), 3);
}

#[test]
fn single_keyword_is_rejected_for_every_method() {
    for method in ["kmeans", "hierarchical"] {
        let result = KeywordClusterer::default().cluster(&keywords(&["serum"]), 3, method);
        assert!(!result.success);
        assert!(result.clusters.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("at least 2 keywords required (got 1)")
        );
    }
}

#[test]
fn empty_input_is_rejected() {
    let result = KeywordClusterer::default().cluster::<String>(&[], 3, "kmeans");
    assert!(!result.success);
    assert_eq!(result.num_keywords, 0);
}

#[test]
fn unknown_method_is_reported() {
    let result = KeywordClusterer::default().cluster(&scenario(), 2, "dbscan");
    assert!(!result.success);
    assert_eq!(result.method, "dbscan");
    assert!(result.clusters.is_empty());
    assert_eq!(result.error.as_deref(), Some("unknown clustering method: dbscan"));
}

#[test]
fn zero_clusters_is_rejected() {
    let result = KeywordClusterer::default().cluster(&scenario(), 0, "kmeans");
    assert!(!result.success);
    assert_eq!(
        result.error,
        Some(KeywordError::InvalidClusterCount.to_string())
    );
}

#[test]
fn zero_clusters_is_checked_before_method() {
    let result = KeywordClusterer::default().cluster(&scenario(), 0, "dbscan");
    assert_eq!(
        result.error,
        Some(KeywordError::InvalidClusterCount.to_string())
    );
}

#[test]
fn identical_keywords_are_degenerate() {
    let input = keywords(&["serum", "serum", "serum"]);
    for method in [ClusterMethod::KMeans, ClusterMethod::Hierarchical] {
        let result = KeywordClusterer::default().cluster_with(&input, 2, method);
        assert!(!result.success);
        assert!(
            result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("degenerate input")),
            "{:?}",
            result.error
        );
    }
}

#[test]
fn kmeans_is_deterministic() {
    let clusterer = KeywordClusterer::default();
    let input = keywords(&[
        "matte lipstick",
        "lip balm",
        "sheet mask",
        "toner",
        "serum",
        "sunscreen",
        "cushion foundation",
    ]);
    let first = clusterer.cluster(&input, 3, "kmeans");
    let second = clusterer.cluster(&input, 3, "kmeans");
    assert!(first.success);
    assert_eq!(first, second);
}

#[test]
fn duplicates_land_in_the_same_cluster() {
    let input = keywords(&["serum", "toner", "serum", "toner", "toner"]);
    for method in ["kmeans", "hierarchical"] {
        let result = KeywordClusterer::default().cluster(&input, 2, method);
        assert!(result.success, "{method}");
        assert_eq!(result.clusters[0].keywords, vec!["toner"; 3]);
        assert_eq!(result.clusters[1].keywords, vec!["serum"; 2]);
        for cluster in &result.clusters {
            assert!((cluster.coherence_score - 1.0).abs() < f64::EPSILON);
            assert_eq!(cluster.size, cluster.keywords.len());
        }
    }
}

#[test]
fn clusters_are_sorted_by_size() {
    let input = keywords(&["serum", "toner", "serum", "serum", "mask", "toner"]);
    let result = KeywordClusterer::default().cluster(&input, 3, "hierarchical");
    assert!(result.success);
    let sizes: Vec<usize> = result.clusters.iter().map(|c| c.size).collect();
    assert_eq!(sizes, vec![3, 2, 1]);
}

#[test]
fn hierarchical_reports_linkage() {
    let result = KeywordClusterer::default().cluster(&scenario(), 2, "hierarchical");
    assert!(result.success);
    let linkage = result.linkage_matrix.as_ref().unwrap();
    assert_eq!(linkage.len(), 4);
    assert_eq!(linkage.last().unwrap().size, 5);
    assert!(result
        .clusters
        .iter()
        .all(|c| c.linkage_method.as_deref() == Some("ward")));
}

#[test]
fn kmeans_omits_linkage() {
    let result = KeywordClusterer::default().cluster(&scenario(), 2, "kmeans");
    assert!(result.linkage_matrix.is_none());
    assert!(result.clusters.iter().all(|c| c.linkage_method.is_none()));
}

#[test]
fn coherence_stays_in_unit_range() {
    let result = KeywordClusterer::default().cluster(&scenario(), 3, "kmeans");
    assert!(result.success);
    for cluster in &result.clusters {
        assert!((0.0..=1.0).contains(&cluster.coherence_score));
        assert!(cluster.keywords.contains(&cluster.representative_keyword));
    }
}
