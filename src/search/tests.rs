//! Search Module Tests
//!
//! ## Test Scopes
//! - **Merge**: per-document sums across shards, empty shard results ignored.
//! - **Buckets**: descending score, ids ascending within a bucket.
//! - **Aggregator**: scatter-gather against live fake shards, including an
//!   unreachable shard and one answering garbage.
//! - **Handler**: `POST /query` through the assembled front-end router.

#[cfg(test)]
mod tests {
    use crate::index::protocol::{DocScore, ScoreResult};
    use crate::routing::{Shard, ShardEndpoints};
    use crate::search::engine::{QueryAggregator, bucket_by_score, merge_scores, query_shard};
    use crate::shutdown;
    use crate::storage::documents::DocumentStore;
    use crate::storage::types::Document;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    fn score(doc_id: &str, doc_score: u64) -> DocScore {
        DocScore {
            doc_id: doc_id.to_string(),
            doc_score,
        }
    }

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("http://origin/{}.txt", id),
            content: String::new(),
        }
    }

    /// A shard that answers every `/query` with `result` and records the payloads it saw.
    async fn fake_shard(result: ScoreResult, seen: Arc<Mutex<Vec<Vec<String>>>>) -> String {
        let app = Router::new().route(
            "/query",
            post(move |Json(terms): Json<Vec<String>>| {
                let result = result.clone();
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(terms);
                    Json(result)
                }
            }),
        );
        spawn_app(app).await
    }

    async fn spawn_app(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// An address nothing listens on.
    async fn dead_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    // ============================================================
    // TEST 1: Merge
    // ============================================================

    #[test]
    fn test_merge_sums_across_shards() {
        let results = vec![
            ScoreResult::new(vec![score("doc1", 3)]),
            ScoreResult::new(vec![score("doc1", 2), score("doc2", 5)]),
            ScoreResult::default(),
        ];

        let totals = merge_scores(&results);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["doc1"], 5);
        assert_eq!(totals["doc2"], 5);
    }

    #[test]
    fn test_merge_ignores_results_with_zero_count() {
        // data without a count is treated as empty
        let results = vec![ScoreResult {
            count: 0,
            data: vec![score("doc1", 9)],
        }];
        assert!(merge_scores(&results).is_empty());
    }

    #[test]
    fn test_merge_saturates_on_huge_scores() {
        let results = vec![
            ScoreResult::new(vec![score("doc1", u64::MAX - 1)]),
            ScoreResult::new(vec![score("doc1", 10)]),
        ];
        assert_eq!(merge_scores(&results)["doc1"], u64::MAX);
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        assert!(merge_scores(&[]).is_empty());
        assert!(merge_scores(&[ScoreResult::default(), ScoreResult::default()]).is_empty());
    }

    // ============================================================
    // TEST 2: Buckets
    // ============================================================

    #[test]
    fn test_tied_documents_share_a_bucket() {
        let totals = HashMap::from([("doc2".to_string(), 5), ("doc1".to_string(), 5)]);
        assert_eq!(
            bucket_by_score(totals),
            vec![(5, vec!["doc1".to_string(), "doc2".to_string()])]
        );
    }

    #[test]
    fn test_buckets_descend_by_score() {
        let totals = HashMap::from([
            ("low".to_string(), 1),
            ("high".to_string(), 9),
            ("mid-b".to_string(), 4),
            ("mid-a".to_string(), 4),
        ]);

        let buckets = bucket_by_score(totals);
        let scores: Vec<u64> = buckets.iter().map(|(s, _)| *s).collect();
        assert_eq!(scores, vec![9, 4, 1]);
        assert_eq!(buckets[1].1, vec!["mid-a".to_string(), "mid-b".to_string()]);
    }

    // ============================================================
    // TEST 3: Aggregator
    // ============================================================

    #[tokio::test]
    async fn test_search_merges_and_resolves_documents() {
        let (_trigger, shutdown) = shutdown::channel();
        let (documents, _handle) = DocumentStore::spawn(8, shutdown);
        documents.put(doc("doc1", "First")).await.unwrap();
        documents.put(doc("doc2", "Second")).await.unwrap();
        documents.put(doc("doc3", "Third")).await.unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let a_m = fake_shard(ScoreResult::new(vec![score("doc1", 3)]), seen.clone()).await;
        let n_z = fake_shard(
            ScoreResult::new(vec![score("doc1", 2), score("doc2", 5), score("doc3", 1)]),
            seen.clone(),
        )
        .await;
        let other = fake_shard(ScoreResult::default(), seen.clone()).await;

        let aggregator = QueryAggregator::new(
            reqwest::Client::new(),
            ShardEndpoints::new(&a_m, &n_z, &other),
            documents,
        );

        let terms = vec!["hello".to_string(), "World".to_string()];
        let ranked = aggregator.search(&terms).await.unwrap();

        let titles: Vec<&str> = ranked.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        // every shard saw the same, unmodified term list
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|t| *t == terms));
    }

    #[tokio::test]
    async fn test_search_survives_unreachable_and_broken_shards() {
        let (_trigger, shutdown) = shutdown::channel();
        let (documents, _handle) = DocumentStore::spawn(8, shutdown);
        documents.put(doc("doc1", "Only")).await.unwrap();

        let healthy = fake_shard(
            ScoreResult::new(vec![score("doc1", 2)]),
            Arc::new(Mutex::new(Vec::new())),
        )
        .await;
        let garbage = spawn_app(Router::new().route("/query", post(|| async { "not json" }))).await;

        let aggregator = QueryAggregator::new(
            reqwest::Client::new(),
            ShardEndpoints::new(&healthy, &dead_endpoint().await, &garbage),
            documents,
        );

        let ranked = aggregator.search(&["anything".to_string()]).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Only");
    }

    #[tokio::test]
    async fn test_search_with_no_matches_is_empty() {
        let (_trigger, shutdown) = shutdown::channel();
        let (documents, _handle) = DocumentStore::spawn(8, shutdown);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let a_m = fake_shard(ScoreResult::default(), seen.clone()).await;
        let n_z = fake_shard(ScoreResult::default(), seen.clone()).await;
        let other = fake_shard(ScoreResult::default(), seen).await;

        let aggregator = QueryAggregator::new(
            reqwest::Client::new(),
            ShardEndpoints::new(&a_m, &n_z, &other),
            documents,
        );
        assert!(aggregator.search(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_document_yields_empty_entry() {
        let (_trigger, shutdown) = shutdown::channel();
        let (documents, _handle) = DocumentStore::spawn(8, shutdown);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let a_m = fake_shard(ScoreResult::new(vec![score("ghost", 1)]), seen.clone()).await;
        let n_z = fake_shard(ScoreResult::default(), seen.clone()).await;
        let other = fake_shard(ScoreResult::default(), seen).await;

        let aggregator = QueryAggregator::new(
            reqwest::Client::new(),
            ShardEndpoints::new(&a_m, &n_z, &other),
            documents,
        );

        let ranked = aggregator.search(&["boo".to_string()]).await.unwrap();
        assert_eq!(ranked, vec![Document::default()]);
    }

    #[tokio::test]
    async fn test_query_shard_non_success_status_is_empty() {
        let url = spawn_app(Router::new()).await;
        let result = query_shard(
            &reqwest::Client::new(),
            Shard::Other,
            &format!("{}/query", url),
            b"[]".to_vec(),
        )
        .await;
        assert_eq!(result, ScoreResult::default());
    }

    // ============================================================
    // TEST 4: Handler
    // ============================================================

    #[tokio::test]
    async fn test_query_endpoint_returns_title_and_url() {
        use crate::config::PipelineConfig;
        use crate::server::FrontendServices;

        let (_trigger, shutdown) = shutdown::channel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let a_m = fake_shard(ScoreResult::new(vec![score("doc1", 1)]), seen.clone()).await;
        let n_z = fake_shard(ScoreResult::default(), seen.clone()).await;
        let other = fake_shard(ScoreResult::default(), seen).await;

        let services = FrontendServices::start(
            ShardEndpoints::new(&a_m, &n_z, &other),
            PipelineConfig::default(),
            reqwest::Client::new(),
            shutdown,
        );
        services.documents.put(doc("doc1", "Rust")).await.unwrap();
        let base = spawn_app(services.router()).await;

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/query", base))
            .json(&vec!["rust"])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!([{"title": "Rust", "url": "http://origin/doc1.txt"}])
        );

        let bad = client
            .post(format!("{}/query", base))
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(bad.status(), 400);
        let body: serde_json::Value = bad.json().await.unwrap();
        assert_eq!(body["code"], 400);

        let wrong_method = client.get(format!("{}/query", base)).send().await.unwrap();
        assert_eq!(wrong_method.status(), 405);
    }
}
