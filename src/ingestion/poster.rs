//! Index Poster
//!
//! Last stage of the pipeline: deliver each [`TokenOccurrence`] to the `/index`
//! endpoint of the shard its token routes to. Delivery is fire-and-forget: a failed
//! post is logged by the worker and the occurrence is lost.

use anyhow::Result;

use crate::error::DeliveryError;
use crate::index::protocol::TokenOccurrence;
use crate::routing::ShardRouter;

pub struct IndexPoster {
    client: reqwest::Client,
    router: ShardRouter,
}

impl IndexPoster {
    pub fn new(client: reqwest::Client, router: ShardRouter) -> Self {
        Self { client, router }
    }

    /// POSTs one occurrence and returns the shard's acknowledgement text.
    pub async fn post(&self, occurrence: &TokenOccurrence) -> Result<String, DeliveryError> {
        let url = self.router.index_url(&occurrence.token);

        let response = self
            .client
            .post(&url)
            .json(occurrence)
            .send()
            .await
            .map_err(|source| DeliveryError::Request {
                endpoint: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let msg = response
            .text()
            .await
            .map_err(|source| DeliveryError::Request {
                endpoint: url.clone(),
                source,
            })?;

        if status > 200 {
            return Err(DeliveryError::Rejected {
                endpoint: url,
                status,
                msg,
            });
        }
        Ok(msg)
    }

    pub async fn process(&self, occurrence: TokenOccurrence) -> Result<()> {
        let msg = self.post(&occurrence).await?;
        tracing::debug!(
            "Posted token '{}' of {}@{}:{} to shard: {}",
            occurrence.token,
            occurrence.doc_id,
            occurrence.line_index,
            occurrence.token_index,
            msg
        );
        Ok(())
    }
}
