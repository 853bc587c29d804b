//! Index Shard Module
//!
//! One shard of the inverted index. Each shard process owns a single
//! [`catalog::TokenCatalog`] for the tokens routed to it and answers scoring queries
//! over them.
//!
//! ## Submodules
//! - **`catalog`**: the single-owner token catalog actor.
//! - **`scoring`**: term-list scoring and ranking.
//! - **`handlers`**: `/index`, `/query` and `/catalog/:token`.
//! - **`protocol`**: wire DTOs shared with the front-end.
//! - **`types`**: per-document catalog entries.

pub mod catalog;
pub mod handlers;
pub mod protocol;
pub mod scoring;
pub mod types;
