//! Front-end Storage Module
//!
//! In-memory stores owned by the ingestion/query front-end.
//!
//! ## Core Concepts
//! - **Actors**: each store is a task that owns its map and applies messages from a
//!   bounded mailbox one at a time. Handles are cheap to clone and hold no state.
//! - **No failed reads**: unknown keys read back as empty values.
//! - **No eviction**: everything written lives for the lifetime of the process.

pub mod documents;
pub mod lines;
pub mod types;
