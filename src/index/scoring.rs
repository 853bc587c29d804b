//! Shard-side query scoring.
//!
//! A document's score is the sum, over the query's valid terms, of how many times
//! the term occurs in it. Terms are normalized exactly like indexed words.

use std::collections::HashMap;

use super::catalog::TokenCatalog;
use super::protocol::{DocScore, ScoreResult};
use crate::ingestion::normalizer::normalize;

pub async fn score_terms(catalog: &TokenCatalog, terms: &[String]) -> ScoreResult {
    let mut totals: HashMap<String, u64> = HashMap::new();

    for term in terms {
        let (token, valid) = normalize(term);
        if !valid {
            tracing::debug!("Skipping query term '{}'", term);
            continue;
        }
        for (doc_id, entry) in catalog.get_catalog(&token).await {
            let total = totals.entry(doc_id).or_insert(0);
            *total = total.saturating_add(entry.count);
        }
    }

    ScoreResult::new(rank(totals))
}

/// Highest score first; equal scores by `doc_id`.
pub fn rank(totals: HashMap<String, u64>) -> Vec<DocScore> {
    let mut data: Vec<DocScore> = totals
        .into_iter()
        .map(|(doc_id, doc_score)| DocScore { doc_id, doc_score })
        .collect();
    data.sort_by(|a, b| {
        b.doc_score
            .cmp(&a.doc_score)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    data
}
