//! Backend client: auth session plus table CRUD.

use crate::error::GatewayError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// A signed-in session. Holds the bearer token returned by the password
/// grant; the token is sent on every subsequent table request.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
}

/// Everything the workspace asks of the hosted backend. Table methods take
/// the raw table name and exchange untyped JSON rows; decoding into typed
/// records happens in the caller.
#[async_trait]
pub trait Gateway {
    /// Exchange email + password for a bearer session.
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), GatewayError>;

    /// Fetch every row of a table, newest first.
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, GatewayError>;

    /// Insert one row.
    async fn insert(&self, table: &str, body: &Value) -> Result<(), GatewayError>;

    /// Update the row with the given id.
    async fn update(&self, table: &str, id: &str, body: &Value) -> Result<(), GatewayError>;

    /// Delete the row with the given id.
    async fn delete(&self, table: &str, id: &str) -> Result<(), GatewayError>;
}

/// Shared gateway handle for multi-task callers like the site server.
pub type SharedGateway = Arc<dyn Gateway + Send + Sync>;

/// [`Gateway`] implementation over the backend's REST API.
///
/// Without a session the public API key doubles as the bearer token, which
/// is enough for the row-level policies the public site relies on.
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Option<Session>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            session: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=password", self.base_url)
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order=created_at.desc",
            self.base_url, table
        )
    }

    fn row_url(&self, table: &str, id: &str) -> String {
        format!("{}/rest/v1/{}?id=eq.{}", self.base_url, table, id)
    }

    fn insert_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn bearer(&self) -> &str {
        match &self.session {
            Some(session) => &session.access_token,
            None => &self.api_key,
        }
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &body);
        warn!(status = status.as_u16(), %message, "backend request failed");
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable message out of an error body. The auth endpoint
/// uses `error_description`/`msg`, the table API uses `message`; anything
/// unrecognized falls back to the raw body or the bare status code.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.token_url())
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let token: TokenResponse = response.json().await?;
        debug!(email, "signed in");
        self.session = Some(Session {
            access_token: token.access_token,
        });
        Ok(())
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Value>, GatewayError> {
        let response = self.authed(self.client.get(self.table_url(table))).send().await?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;
        debug!(table, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    async fn insert(&self, table: &str, body: &Value) -> Result<(), GatewayError> {
        let response = self
            .authed(self.client.post(self.insert_url(table)))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, body: &Value) -> Result<(), GatewayError> {
        let response = self
            .authed(self.client.patch(self.row_url(table, id)))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), GatewayError> {
        let response = self.authed(self.client.delete(self.row_url(table, id))).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
