//! HTTP implementation of [`EnterpriseManagementApi`].
//!
//! Talks to the Enterprise Management REST API (`/v1/enterprises`). Token
//! acquisition is out of scope here: the session is handed a ready bearer
//! token.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, ClientUnavailable};
use crate::traits::{ClientSession, DynEnterpriseApi, EnterpriseManagementApi};
use crate::types::{
    CreateEnterpriseRequest, CreateEnterpriseResponse, Enterprise, UpdateEnterpriseRequest,
};

/// Public endpoint of the enterprise management service.
pub const DEFAULT_ENDPOINT: &str = "https://enterprise.cloud.ibm.com";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the HTTP client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the service, without the `/v1` prefix.
    pub endpoint: Url,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Parses `endpoint` and builds a config with no token and the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientUnavailable` if the endpoint is not an absolute
    /// `http`/`https` URL.
    pub fn new(endpoint: &str) -> Result<Self, ClientUnavailable> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientUnavailable::new(format!("invalid endpoint '{endpoint}': {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(ClientUnavailable::new(format!(
                "endpoint '{endpoint}' must be an http or https URL"
            )));
        }
        Ok(Self {
            endpoint,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Enterprise management client over HTTP.
pub struct HttpEnterpriseClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpEnterpriseClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ClientUnavailable` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientUnavailable> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientUnavailable::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }

    fn enterprises_url(&self, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::transport(format!("endpoint {} cannot be a base", self.endpoint)))?;
            segments.pop_if_empty().extend(["v1", "enterprises"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req.header("Accept", "application/json")
    }

    async fn send(&self, call: &'static str, req: RequestBuilder) -> Result<Response, ApiError> {
        req.send().await.map_err(|e| {
            tracing::debug!(call, error = %e, "request failed before a response arrived");
            ApiError::transport(e.to_string())
        })
    }
}

#[async_trait]
impl EnterpriseManagementApi for HttpEnterpriseClient {
    async fn create_enterprise(
        &self,
        request: &CreateEnterpriseRequest,
    ) -> Result<CreateEnterpriseResponse, ApiError> {
        let url = self.enterprises_url(None)?;
        tracing::debug!(%url, "POST CreateEnterprise");
        let resp = self
            .send("CreateEnterprise", self.request(Method::POST, url).json(request))
            .await?;
        let (status, body) = read_body(resp).await?;
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        decode(&body)
    }

    async fn get_enterprise(&self, id: &str) -> Result<Option<Enterprise>, ApiError> {
        let url = self.enterprises_url(Some(id))?;
        tracing::debug!(%url, "GET GetEnterprise");
        let resp = self
            .send("GetEnterprise", self.request(Method::GET, url))
            .await?;
        let (status, body) = read_body(resp).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        decode(&body).map(Some)
    }

    async fn update_enterprise(
        &self,
        id: &str,
        request: &UpdateEnterpriseRequest,
    ) -> Result<(), ApiError> {
        let url = self.enterprises_url(Some(id))?;
        tracing::debug!(%url, fields = ?request.fields(), "PATCH UpdateEnterprise");
        let resp = self
            .send("UpdateEnterprise", self.request(Method::PATCH, url).json(request))
            .await?;
        let (status, body) = read_body(resp).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(id));
        }
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

async fn read_body(resp: Response) -> Result<(StatusCode, String), ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::transport(format!("failed to read response body: {e}")))?;
    Ok((status, body))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::decode(e.to_string(), body))
}

fn http_error(status: StatusCode, body: String) -> ApiError {
    let message = error_message(&body).unwrap_or_else(|| {
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.clone()
        }
    });
    ApiError::http(status.as_u16(), message, body)
}

/// Pulls the human-readable message out of a service error body.
///
/// The service answers either `{"errors": [{"message": ..}, ..]}` or a flat
/// `{"message": ..}`.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    if let Some(errors) = json.get("errors").and_then(Value::as_array) {
        let msgs: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect();
        if !msgs.is_empty() {
            return Some(msgs.join("; "));
        }
    }
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Session that builds an [`HttpEnterpriseClient`] from a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct HttpClientSession {
    config: ClientConfig,
}

impl HttpClientSession {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ClientSession for HttpClientSession {
    fn enterprise_management(&self) -> Result<DynEnterpriseApi, ClientUnavailable> {
        if self.config.token.as_deref().is_none_or(str::is_empty) {
            return Err(ClientUnavailable::new("no API token configured"));
        }
        Ok(Arc::new(HttpEnterpriseClient::new(&self.config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_bad_endpoints() {
        assert!(ClientConfig::new("not a url").is_err());
        assert!(ClientConfig::new("ftp://example.com").is_err());
        assert!(ClientConfig::new("mailto:ops@example.com").is_err());
        assert!(ClientConfig::new(DEFAULT_ENDPOINT).is_ok());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = ClientConfig::new(DEFAULT_ENDPOINT)
            .unwrap()
            .with_token("s3cret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_enterprises_url() {
        let config = ClientConfig::new("https://example.com/api/").unwrap();
        let client = HttpEnterpriseClient::new(&config).unwrap();
        assert_eq!(
            client.enterprises_url(None).unwrap().as_str(),
            "https://example.com/api/v1/enterprises"
        );
        assert_eq!(
            client.enterprises_url(Some("ent/1")).unwrap().as_str(),
            "https://example.com/api/v1/enterprises/ent%2F1"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"errors":[{"code":"a","message":"bad name"},{"message":"bad id"}]}"#),
            Some("bad name; bad id".to_string())
        );
        assert_eq!(
            error_message(r#"{"message":"forbidden"}"#),
            Some("forbidden".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn test_http_error_falls_back_to_reason() {
        let err = http_error(StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        let err = http_error(StatusCode::BAD_REQUEST, "plain text".into());
        assert_eq!(err.to_string(), "HTTP 400: plain text");
    }

    #[test]
    fn test_session_requires_token() {
        let session = HttpClientSession::new(ClientConfig::new(DEFAULT_ENDPOINT).unwrap());
        let err = session.enterprise_management().err().unwrap();
        assert_eq!(err.reason, "no API token configured");

        let session = HttpClientSession::new(
            ClientConfig::new(DEFAULT_ENDPOINT)
                .unwrap()
                .with_token("t"),
        );
        assert_eq!(
            session.enterprise_management().unwrap().backend_name(),
            "http"
        );
    }
}
