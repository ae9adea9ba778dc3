//! HTTP gateway for a hosted PostgREST-style table.
//!
//! Talks to `{api_url}/rest/v1/{table}` using the access key both as the
//! `apikey` header and as a bearer token, which is how hosted
//! database-as-a-service endpoints authenticate anonymous clients.
//!
//! # Requests
//!
//! | Operation | Method | Query | Notes |
//! |-----------|--------|-------|-------|
//! | select all | `GET` | `select=*&order=created_at.asc` | |
//! | insert | `POST` | | body `[draft]`, `Prefer: return=representation` |
//! | update | `PATCH` | `id=eq.{id}` | body `{...patch, updated_at}`, `Prefer: return=representation` |
//! | delete | `DELETE` | `id=eq.{id}` | |
//!
//! Non-2xx responses become [`CountryDeckError::Remote`] carrying the body's
//! `message` field verbatim.

use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryDraft, CountryPatch};
use crate::storage::backend::RecordGateway;
use crate::storage::models::{ApiErrorBody, UpdateBody};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};

const RETURN_REPRESENTATION: &str = "return=representation";

/// Client for the remote `countries` table.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    table_url: String,
}

impl RestGateway {
    /// Creates a gateway for `table` under the endpoint at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::Config`] if the key cannot be used as a
    /// header value, or a transport error if the HTTP client cannot be built.
    pub fn new(api_url: &str, api_key: &str, table: &str) -> Result<Self> {
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| CountryDeckError::Config(format!("invalid access key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| CountryDeckError::Config(format!("invalid access key: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{table}", api_url.trim_end_matches('/')),
        })
    }

    /// Full URL of the table resource.
    #[must_use]
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
        tracing::debug!(
            status = status.as_u16(),
            code = ?body.code,
            details = ?body.details,
            hint = ?body.hint,
            "remote request rejected"
        );

        let message = body
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

        Err(CountryDeckError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    /// Reads a `return=representation` body and takes its single row.
    async fn single_row(response: Response, id_hint: &str) -> Result<Country> {
        let status = response.status().as_u16();
        let rows: Vec<Country> = response.json().await?;
        let count = rows.len();
        let mut rows = rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            (None, _) => Err(CountryDeckError::NotFound(id_hint.to_string())),
            (Some(_), Some(_)) => Err(CountryDeckError::Remote {
                status,
                message: format!("expected a single row, got {count}"),
            }),
        }
    }
}

#[async_trait]
impl RecordGateway for RestGateway {
    async fn select_all(&self) -> Result<Vec<Country>> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "created_at.asc")]);

        let rows: Vec<Country> = Self::send(request).await?.json().await?;
        tracing::debug!(count = rows.len(), "rows selected");
        Ok(rows)
    }

    async fn insert(&self, draft: &CountryDraft) -> Result<Country> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[draft]);

        let response = Self::send(request).await?;
        Self::single_row(response, &draft.name).await
    }

    async fn update(&self, id: &str, patch: &CountryPatch, updated_at: DateTime<Utc>) -> Result<Country> {
        let filter = format!("eq.{id}");
        let request = self
            .client
            .patch(&self.table_url)
            .query(&[("id", filter.as_str())])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&UpdateBody { patch, updated_at });

        let response = Self::send(request).await?;
        Self::single_row(response, id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let filter = format!("eq.{id}");
        let request = self.client.delete(&self.table_url).query(&[("id", filter.as_str())]);

        Self::send(request).await?;
        tracing::debug!(id = %id, "row deleted");
        Ok(())
    }
}
