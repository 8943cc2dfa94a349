//! Vector store client: index lifecycle, vector CRUD and search.

use super::types::{
    AddVectorsOptions, AddVectorsResult, ConsistencyReport, SearchMatch, SearchOptions, Vector,
    VectorId, VectorIndex,
};
use crate::capability::Capability;
use crate::consistency::wait_for_condition;
use crate::transport::{Request, RetryingTransport};
use crate::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct VectorStoreCapabilities {
    transport: Arc<RetryingTransport>,
}

impl Capability for VectorStoreCapabilities {
    fn base_path(&self) -> &'static str {
        "/v1"
    }
}

impl VectorStoreCapabilities {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self { transport }
    }

    fn index_path(&self, name: &str, suffix: &str) -> Result<String> {
        if !is_valid_index_name(name) {
            return Err(Error::invalid_request(format!(
                "Invalid index name '{}'",
                name
            )));
        }
        Ok(self.endpoint(&format!("/indexes/{}{}", name, suffix)))
    }

    /// Create an index.
    ///
    /// Returns as soon as the server accepts the request. The index may not be
    /// visible to reads yet; `get_index` right after can still report it absent.
    pub async fn create_index(&self, config: &VectorIndex) -> Result<()> {
        self.index_path(&config.name, "")?;
        let body = serde_json::to_value(config)?;
        self.transport
            .execute(&Request::post(self.endpoint("/indexes"), body))
            .await?;
        Ok(())
    }

    pub async fn list_indexes(&self) -> Result<Vec<VectorIndex>> {
        let resp = self
            .transport
            .execute_json(&Request::get(self.endpoint("/indexes")))
            .await?;
        match resp.get("indexes") {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(indexes) => Ok(serde_json::from_value(indexes.clone())?),
        }
    }

    /// Fetch an index, `None` if the server reports 404.
    pub async fn get_index(&self, name: &str) -> Result<Option<VectorIndex>> {
        let path = self.index_path(name, "")?;
        let resp = match self.transport.execute_json(&Request::get(path)).await {
            Ok(v) => v,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        if resp.is_null() {
            return Ok(None);
        }
        if resp.get("name").is_none() || resp.get("dimension").is_none() {
            warn!(index = name, "index response missing name or dimension");
            return Ok(None);
        }
        match serde_json::from_value(resp) {
            Ok(index) => Ok(Some(index)),
            Err(e) => {
                warn!(index = name, error = %e, "malformed index response");
                Ok(None)
            }
        }
    }

    /// Delete an index. Deleting a missing index succeeds.
    pub async fn delete_index(&self, name: &str) -> Result<()> {
        let path = self.index_path(name, "")?;
        match self.transport.execute(&Request::delete(path)).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!(index = name, "index already absent");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Insert vectors into `index_name`.
    ///
    /// With consistency enabled the index must exist (`INDEX_NOT_FOUND`
    /// otherwise, before anything is written) and its `vector_count` is polled
    /// until it reaches `before + vectors.len()`. Running out of probes is not an
    /// error: the insert already succeeded, and the report records
    /// `converged = false`.
    pub async fn add_vectors(
        &self,
        index_name: &str,
        vectors: &[Vector],
        options: AddVectorsOptions,
    ) -> Result<AddVectorsResult> {
        let path = self.index_path(index_name, "/vectors")?;
        if vectors.is_empty() {
            return Err(Error::invalid_request("vectors must not be empty"));
        }
        let consistency = options.consistency;

        let before_count = if consistency.enabled {
            match self.get_index(index_name).await? {
                Some(index) => index.vector_count,
                None => return Err(Error::index_not_found(index_name)),
            }
        } else {
            0
        };

        let resp = self
            .transport
            .execute_json(&Request::post(path, json!({ "vectors": vectors })))
            .await?;
        let inserted = resp
            .get("inserted")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::invalid_response("Invalid response from add vectors"))?;
        let ids: Vec<VectorId> = match resp.get("ids") {
            Some(Value::Null) | None => Vec::new(),
            Some(ids) => serde_json::from_value(ids.clone())?,
        };

        let mut report = None;
        if consistency.enabled {
            let expected_count = before_count.saturating_add(vectors.len() as u64);
            let outcome = wait_for_condition(
                || self.get_index(index_name),
                |index: &Option<VectorIndex>| {
                    index.as_ref().map(|i| i.vector_count) == Some(expected_count)
                },
                consistency.max_retries,
                consistency.retry_delay(),
            )
            .await?;
            report = Some(ConsistencyReport {
                expected_count,
                observed_count: outcome.value.as_ref().map(|i| i.vector_count),
                attempts: outcome.attempts,
                converged: outcome.converged,
            });
        }

        Ok(AddVectorsResult {
            inserted,
            ids,
            consistency: report,
        })
    }

    pub async fn delete_vectors(&self, index_name: &str, ids: &[VectorId]) -> Result<()> {
        let path = self.index_path(index_name, "/vectors")?;
        self.transport
            .execute(&Request::delete(path).with_body(json!({ "ids": ids })))
            .await?;
        Ok(())
    }

    /// Rank stored vectors by similarity to `query`.
    ///
    /// Without consistency the first response is returned as is, even if empty.
    /// With it, an empty result is re-queried up to `max_retries` probes in total.
    pub async fn search_vector(
        &self,
        index_name: &str,
        query: &[f32],
        options: SearchOptions,
    ) -> Result<Vec<SearchMatch>> {
        let path = self.index_path(index_name, "/search")?;
        let request = Request::post(path, json!({ "vector": query, "limit": options.top_k }));

        if !options.consistency.enabled {
            return self.search_once(&request).await;
        }

        let outcome = wait_for_condition(
            || self.search_once(&request),
            |matches: &Vec<SearchMatch>| !matches.is_empty(),
            options.consistency.max_retries,
            options.consistency.retry_delay(),
        )
        .await?;
        Ok(outcome.value)
    }

    async fn search_once(&self, request: &Request) -> Result<Vec<SearchMatch>> {
        let resp = self.transport.execute_json(request).await?;
        match resp.get("results") {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(results) => Ok(serde_json::from_value(results.clone())?),
        }
    }
}

/// An index name must stay a single path segment: no separators, query or
/// fragment markers, escapes, whitespace or dot segments.
fn is_valid_index_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| {
            matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
        })
}
