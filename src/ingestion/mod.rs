//! Ingestion Service Module
//!
//! Turns `{url, title}` requests into indexed tokens on the shards.
//!
//! ## Workflow
//! 1. **Fetch**: a fetcher worker downloads the URL and builds a `Document` with a new id.
//! 2. **Store**: the document goes to the `DocumentStore`, then to the tokenizer queue.
//! 3. **Tokenize**: a tokenizer worker stores each non-blank line in the `LineStore` and
//!    normalizes its words into token occurrences.
//! 4. **Post**: a poster worker sends each occurrence to the shard its token routes to.
//!
//! Every stage is asynchronous with respect to the HTTP caller. Failures are logged and
//! the unit of work dropped.

pub mod fetcher;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod poster;
pub mod tokenizer;
pub mod types;
