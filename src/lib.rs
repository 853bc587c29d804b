//! Distributed Full-Text Search
//!
//! Two cooperating services built from this library:
//!
//! - a **front-end** that ingests documents by URL, stores them, tokenizes them and
//!   posts every token occurrence to the shard that owns it, and answers searches by
//!   broadcasting the terms to all shards and merging their scores;
//! - an **index shard** that holds the inverted index for one slice of the tokens.
//!
//! ## Modules
//! - **`storage`**: document and line stores (single-owner actors).
//! - **`executor`**: bounded worker pools over bounded queues.
//! - **`ingestion`**: fetch → tokenize → post pipeline and the `/feeder` API.
//! - **`routing`**: deterministic token-to-shard routing.
//! - **`index`**: the shard's token catalog, scoring and API.
//! - **`search`**: scatter-gather query aggregation and ranking.
//! - **`server`**: router assembly and start-up of both roles.
//! - **`config`**, **`error`**, **`shutdown`**: ambient plumbing.

pub mod config;
pub mod error;
pub mod executor;
pub mod index;
pub mod ingestion;
pub mod routing;
pub mod search;
pub mod server;
pub mod shutdown;
pub mod storage;
