//! Search Service Module
//!
//! Answers front-end queries by broadcasting the term list to every shard and merging
//! the per-shard scores into one ranked list of documents.
//!
//! ## Submodules
//! - **`engine`**: scatter-gather, score merge and score-bucket ordering.
//! - **`handlers`**: the front-end `POST /query` endpoint.

pub mod engine;
pub mod handlers;

#[cfg(test)]
mod tests;
