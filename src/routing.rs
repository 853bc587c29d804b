//! Token-to-shard routing.
//!
//! Tokens are partitioned by their leading character into three fixed shards.
//! Routing is a pure function of the token, so a token always lands on the same
//! shard for the lifetime of the cluster. Queries do not route: they are
//! broadcast to every endpoint in [`ShardEndpoints::all`].

use serde::{Deserialize, Serialize};

pub const ENDPOINT_INDEX: &str = "/index";
pub const ENDPOINT_QUERY: &str = "/query";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shard {
    AToM,
    NToZ,
    Other,
}

impl Shard {
    pub const ALL: [Shard; 3] = [Shard::AToM, Shard::NToZ, Shard::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Shard::AToM => "a-m",
            Shard::NToZ => "n-z",
            Shard::Other => "other",
        }
    }
}

/// Picks the shard for a token by inspecting its first character only.
pub fn route(token: &str) -> Shard {
    match token.chars().next() {
        Some('a'..='m') => Shard::AToM,
        Some('n'..='z') => Shard::NToZ,
        _ => Shard::Other,
    }
}

/// Base URLs of the three shards. Values are taken as configured, minus a trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardEndpoints {
    pub a_m: String,
    pub n_z: String,
    pub other: String,
}

impl ShardEndpoints {
    pub fn new(a_m: &str, n_z: &str, other: &str) -> Self {
        Self {
            a_m: a_m.trim_end_matches('/').to_string(),
            n_z: n_z.trim_end_matches('/').to_string(),
            other: other.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, shard: Shard) -> &str {
        match shard {
            Shard::AToM => &self.a_m,
            Shard::NToZ => &self.n_z,
            Shard::Other => &self.other,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = (Shard, &str)> {
        Shard::ALL.into_iter().map(move |shard| (shard, self.url(shard)))
    }
}

/// Resolves tokens to the `/index` URL of their owning shard.
#[derive(Debug, Clone)]
pub struct ShardRouter {
    endpoints: ShardEndpoints,
}

impl ShardRouter {
    pub fn new(endpoints: ShardEndpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoint_for(&self, token: &str) -> &str {
        self.endpoints.url(route(token))
    }

    pub fn index_url(&self, token: &str) -> String {
        format!("{}{}", self.endpoint_for(token), ENDPOINT_INDEX)
    }

    pub fn endpoints(&self) -> &ShardEndpoints {
        &self.endpoints
    }
}
