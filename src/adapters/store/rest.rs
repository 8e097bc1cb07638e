//! PostgREST-style REST store implementation
//!
//! This adapter speaks the REST dialect a hosted Supabase project exposes:
//! `{base}/rest/v1/{collection}` with `select=`/`order=`/`limit=` query
//! parameters, `column=eq.value` filters, and `Prefer` headers controlling
//! representation and exact counts. HTTP failures are mapped into
//! [`StoreError`] variants at this boundary; the reqwest types never leave
//! this module.

use crate::adapters::store::traits::{DataStore, Filter, SelectQuery};
use crate::config::schema::{SessionConfig, StoreConfig};
use crate::config::secret::SecretString;
use crate::domain::errors::{MedboardError, StoreError};
use crate::domain::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// REST client for the hosted data store
///
/// Every request carries the project API key as the `apikey` header and a
/// bearer token: the signed-in user's access token when the session has one,
/// falling back to the API key for unauthenticated reads. The backend's
/// row-level security decides what each token may actually touch.
#[derive(Debug)]
pub struct RestStore {
    /// HTTP client for making requests
    client: Client,

    /// Project base URL, without a trailing slash
    base_url: String,

    /// Postgres schema exposed by the REST endpoint
    schema: String,

    /// Publishable API key
    api_key: SecretString,

    /// Bearer token riding the Authorization header
    bearer_token: SecretString,
}

impl RestStore {
    /// Create a new REST store from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse, or a
    /// connection error if the HTTP client cannot be built.
    pub fn new(store: &StoreConfig, session: &SessionConfig) -> Result<Self> {
        Url::parse(&store.base_url).map_err(|e| {
            MedboardError::Configuration(format!(
                "Invalid store.base_url '{}': {}",
                store.base_url, e
            ))
        })?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(store.timeout_seconds))
            .connect_timeout(Duration::from_secs(10));

        if !store.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let bearer_token = session
            .access_token
            .clone()
            .unwrap_or_else(|| store.api_key.clone());

        Ok(Self {
            client,
            base_url: store.base_url.trim_end_matches('/').to_string(),
            schema: store.schema.clone(),
            api_key: store.api_key.clone(),
            bearer_token,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    /// Attach the ambient credentials to a request
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.expose_secret().as_ref())
            .bearer_auth(self.bearer_token.expose_secret().as_ref())
    }

    /// Encode a select query as PostgREST query parameters
    fn select_params(query: &SelectQuery) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(columns) = &query.columns {
            params.push(("select".to_string(), columns.clone()));
        }
        params.extend(Self::filter_params(&query.filters));
        if let Some(order) = &query.order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
            .collect()
    }
}

/// Map a transport-level failure to a store error
fn request_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout(e.to_string())
    } else {
        StoreError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Vec<Value>> {
        let url = self.collection_url(collection);
        let params = Self::select_params(query);

        tracing::debug!(collection, params = ?params, "Selecting rows");

        let response = self
            .authed(self.client.get(&url))
            .header("Accept-Profile", &self.schema)
            .query(&params)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::QueryFailed {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64> {
        let url = self.collection_url(collection);
        let params = Self::filter_params(filters);

        // HEAD with an exact count preference; the total rides back in the
        // Content-Range header as `0-24/57`.
        let response = self
            .authed(self.client.head(&url))
            .header("Accept-Profile", &self.schema)
            .header("Prefer", "count=exact")
            .query(&params)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized(format!("status {status}")).into());
        }
        if !status.is_success() {
            return Err(StoreError::QueryFailed {
                status: status.as_u16(),
                message: format!("count of {collection} failed"),
            }
            .into());
        }

        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::InvalidResponse("missing Content-Range header".to_string()))?;

        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse::<u64>().ok())
            .ok_or_else(|| {
                StoreError::InvalidResponse(format!("unparseable Content-Range: {content_range}"))
                    .into()
            })
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        let url = self.collection_url(collection);

        tracing::debug!(collection, rows = rows.len(), "Inserting rows");

        let response = self
            .authed(self.client.post(&url))
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::InsertFailed(format!("status {status}: {body}")).into());
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
    }

    async fn update(&self, collection: &str, patch: Value, filters: &[Filter]) -> Result<u64> {
        let url = self.collection_url(collection);
        let params = Self::filter_params(filters);

        tracing::debug!(collection, params = ?params, "Updating rows");

        let response = self
            .authed(self.client.patch(&url))
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=representation")
            .query(&params)
            .json(&patch)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UpdateFailed(format!("status {status}: {body}")).into());
        }

        let affected = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(affected.len() as u64)
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64> {
        let url = self.collection_url(collection);
        let params = Self::filter_params(filters);

        tracing::debug!(collection, params = ?params, "Deleting rows");

        let response = self
            .authed(self.client.delete(&url))
            .header("Content-Profile", &self.schema)
            .header("Prefer", "return=representation")
            .query(&params)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::DeleteFailed(format!("status {status}: {body}")).into());
        }

        let removed = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(removed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::traits::OrderBy;
    use crate::config::secret::secret_string;

    fn store_config(base_url: &str) -> StoreConfig {
        StoreConfig {
            base_url: base_url.to_string(),
            api_key: secret_string("anon-key".to_string()),
            schema: "public".to_string(),
            timeout_seconds: 5,
            tls_verify: true,
        }
    }

    #[test]
    fn test_new_rejects_malformed_base_url() {
        let config = store_config("not a url");
        let err = RestStore::new(&config, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, MedboardError::Configuration(_)));
    }

    #[test]
    fn test_collection_url_has_no_double_slash() {
        let config = store_config("https://example.supabase.co/");
        let store = RestStore::new(&config, &SessionConfig::default()).unwrap();
        assert_eq!(
            store.collection_url("patients"),
            "https://example.supabase.co/rest/v1/patients"
        );
    }

    #[test]
    fn test_select_params_encode_the_query() {
        let query = SelectQuery::new()
            .columns("*, rooms(room_number)")
            .filter(Filter::eq("status", "critical"))
            .order(OrderBy::descending("admission_date"))
            .limit(10);

        let params = RestStore::select_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*, rooms(room_number)".to_string()),
                ("status".to_string(), "eq.critical".to_string()),
                ("order".to_string(), "admission_date.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_params_empty_query_is_empty() {
        assert!(RestStore::select_params(&SelectQuery::new()).is_empty());
    }
}
