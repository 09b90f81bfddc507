//! End-to-end keyword engine behaviour through the public API.

use brandpulse_keywords::{
    extract_key_phrases, find_similar_keywords, ClusterMethod, ClusteringConfig, KeywordClusterer,
};

fn campaign_keywords() -> Vec<String> {
    [
        "vegan skincare",
        "organic skincare",
        "eco packaging",
        "sustainable packaging",
        "K-beauty trend",
        "glass skin",
        "refillable packaging",
        "clean beauty",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[test]
fn every_keyword_lands_in_exactly_one_cluster() {
    let keywords = campaign_keywords();
    for method in [ClusterMethod::KMeans, ClusterMethod::Hierarchical] {
        let result = KeywordClusterer::default().cluster_with(&keywords, 3, method);
        assert!(result.success, "{method}: {:?}", result.error);
        assert_eq!(result.clusters.len(), 3);

        let total: usize = result.clusters.iter().map(|c| c.keywords.len()).sum();
        assert_eq!(total, keywords.len());
        for keyword in &keywords {
            let hits = result
                .clusters
                .iter()
                .filter(|c| c.keywords.contains(keyword))
                .count();
            assert_eq!(hits, 1, "{keyword} under {method}");
        }
    }
}

#[test]
fn seed_is_taken_from_config() {
    let keywords = campaign_keywords();
    let config = ClusteringConfig {
        seed: 7,
        restarts: 3,
        ..ClusteringConfig::default()
    };
    let a = KeywordClusterer::new(config).cluster(&keywords, 4, "kmeans");
    let b = KeywordClusterer::new(config).cluster(&keywords, 4, "kmeans");
    assert!(a.success);
    assert_eq!(a.clusters, b.clusters);
}

#[test]
fn failed_result_serialises_with_error_and_no_linkage() {
    let result = KeywordClusterer::default().cluster(&["only one"], 2, "hierarchical");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["clusters"], serde_json::json!([]));
    assert!(json.get("linkage_matrix").is_none());
    assert_eq!(json["error"], "at least 2 keywords required (got 1)");
}

#[test]
fn hierarchical_result_serialises_linkage_rows() {
    let result = KeywordClusterer::default().cluster(&campaign_keywords(), 2, "hierarchical");
    let json = serde_json::to_value(&result).unwrap();
    let rows = json["linkage_matrix"].as_array().unwrap();
    assert_eq!(rows.len(), 7);
    for key in ["left", "right", "distance", "size"] {
        assert!(rows[0].get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["clusters"][0]["linkage_method"], "ward");
}

#[test]
fn similar_keywords_share_vocabulary() {
    let pool = campaign_keywords();
    let result = find_similar_keywords("recyclable packaging", &pool, 3);
    assert!(result.success);
    let names: Vec<&str> = result.matches.iter().map(|m| m.keyword.as_str()).collect();
    assert_eq!(
        names,
        vec!["eco packaging", "sustainable packaging", "refillable packaging"]
    );
}

#[test]
fn key_phrases_from_campaign_brief() {
    let brief = "Refillable packaging cuts waste. Our refillable packaging line \
                 pairs with vegan skincare for a clean beauty routine.";
    let result = extract_key_phrases(brief, 4);
    assert!(result.success);
    assert_eq!(result.phrases.len(), 4);
    assert_eq!(result.phrases[0].phrase, "packaging");
}
