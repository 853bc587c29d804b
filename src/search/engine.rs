//! Query Aggregator
//!
//! Scatter-gather over every configured shard:
//! 1. the term list is serialized once and POSTed to each shard's `/query` in parallel;
//! 2. exactly one result is awaited per shard, and a shard that fails in any way counts
//!    as an empty result;
//! 3. scores are summed per document across shards;
//! 4. documents are grouped by total score and buckets emitted highest first, each
//!    bucket ordered by document id;
//! 5. every id is resolved to its document through the `DocumentStore`, one lookup at
//!    a time.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;

use crate::index::protocol::{ENDPOINT_QUERY, ScoreResult};
use crate::routing::{Shard, ShardEndpoints};
use crate::storage::documents::DocumentStore;
use crate::storage::types::Document;

pub struct QueryAggregator {
    client: reqwest::Client,
    endpoints: ShardEndpoints,
    documents: DocumentStore,
}

impl QueryAggregator {
    pub fn new(client: reqwest::Client, endpoints: ShardEndpoints, documents: DocumentStore) -> Self {
        Self {
            client,
            endpoints,
            documents,
        }
    }

    /// Ranked documents for `terms`, highest combined score first.
    pub async fn search(&self, terms: &[String]) -> Result<Vec<Document>> {
        let payload = serde_json::to_vec(terms)?;

        let results = self.scatter(payload).await;
        let totals = merge_scores(&results);
        tracing::debug!("Merged {} documents from {} shards", totals.len(), results.len());

        let mut ranked = Vec::with_capacity(totals.len());
        for (score, doc_ids) in bucket_by_score(totals) {
            for doc_id in doc_ids {
                let doc = self.documents.get(&doc_id).await;
                if doc.is_empty() {
                    tracing::warn!("Shards matched unknown document {} (score {})", doc_id, score);
                }
                ranked.push(doc);
            }
        }

        Ok(ranked)
    }

    /// One spawned call per shard; always yields one result per shard.
    async fn scatter(&self, payload: Vec<u8>) -> Vec<ScoreResult> {
        let calls = self.endpoints.all().map(|(shard, endpoint)| {
            let client = self.client.clone();
            let url = format!("{}{}", endpoint, ENDPOINT_QUERY);
            let payload = payload.clone();
            tokio::spawn(async move { query_shard(&client, shard, &url, payload).await })
        });

        join_all(calls)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Shard query task failed: {}", e);
                    ScoreResult::default()
                }
            })
            .collect()
    }
}

/// Queries one shard. Transport, status and decode failures all yield the empty result.
pub async fn query_shard(
    client: &reqwest::Client,
    shard: Shard,
    url: &str,
    payload: Vec<u8>,
) -> ScoreResult {
    let response = match client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Shard {} ({}) unreachable: {}", shard.label(), url, e);
            return ScoreResult::default();
        }
    };

    if !response.status().is_success() {
        tracing::warn!(
            "Shard {} ({}) answered {}",
            shard.label(),
            url,
            response.status()
        );
        return ScoreResult::default();
    }

    match response.json::<ScoreResult>().await {
        Ok(result) => {
            tracing::debug!("Shard {} -> {:?}", shard.label(), result);
            result
        }
        Err(e) => {
            tracing::warn!("Shard {} ({}) sent an undecodable result: {}", shard.label(), url, e);
            ScoreResult::default()
        }
    }
}

/// Sums scores per document across all non-empty shard results, saturating at `u64::MAX`.
pub fn merge_scores(results: &[ScoreResult]) -> HashMap<String, u64> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for result in results.iter().filter(|r| r.count > 0) {
        for doc in &result.data {
            let total = totals.entry(doc.doc_id.clone()).or_insert(0);
            *total = total.saturating_add(doc.doc_score);
        }
    }
    totals
}

/// Groups documents by total score, highest score first, ids ascending in a bucket.
pub fn bucket_by_score(totals: HashMap<String, u64>) -> Vec<(u64, Vec<String>)> {
    let mut buckets: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for (doc_id, score) in totals {
        buckets.entry(score).or_default().push(doc_id);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(score, mut doc_ids)| {
            doc_ids.sort();
            (score, doc_ids)
        })
        .collect()
}
