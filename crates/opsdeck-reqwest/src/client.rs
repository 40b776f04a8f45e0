//! Backend API client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use opsdeck_core::types::{
    DocumentMeta, DocumentPayload, Issue, IssueReplacement, KnowledgeQuery, KnowledgeResponse,
    NewIssue, ProjectContext, ProjectInfo,
};
use opsdeck_core::{
    DocumentProvider, IssueProvider, KnowledgeProvider, LookupError, ProjectProvider,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ApiClientConfig;
use crate::error::{Error, Result};

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "opsdeck_reqwest::client";

/// Header carrying the shared agent secret.
const HEADER_AGENT_SECRET: &str = "X-Agent-Secret";

/// Header carrying the acting user's id.
const HEADER_USER_ID: &str = "X-User-Id";

/// Inner client that holds the HTTP client and configuration.
struct ProjectApiClientInner {
    http: Client,
    config: ApiClientConfig,
}

impl std::fmt::Debug for ProjectApiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectApiClientInner")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

/// Client for the opsdeck project-management backend.
///
/// Implements the `opsdeck-core` provider traits over the backend's REST
/// API. Every request carries the shared agent secret and the acting user's
/// id, and is bounded by the configured timeout.
///
/// This type is cheap to clone and can be shared across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use opsdeck_reqwest::{ApiClientConfig, ProjectApiClient};
/// use opsdeck_core::types::ProjectContext;
///
/// let client = ProjectApiClient::new(ApiClientConfig::from_env())?;
/// let ctx = ProjectContext::new(project_id, user_id)?;
/// let docs = client.list_documents(&ctx).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ProjectApiClient {
    inner: Arc<ProjectApiClientInner>,
}

impl ProjectApiClient {
    /// Creates a new API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating API client"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = ProjectApiClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new API client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ApiClientConfig::default())
    }

    /// Creates a new API client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiClientConfig::from_env())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.inner.config
    }

    /// Joins a path onto the configured base URL.
    fn url(&self, path: &str) -> String {
        let base = self.inner.config.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Builds a request with the correlation headers attached.
    fn request(&self, method: Method, path: &str, ctx: &ProjectContext) -> RequestBuilder {
        self.inner
            .http
            .request(method, self.url(path))
            .header(HEADER_AGENT_SECRET, &self.inner.config.agent_secret)
            .header(HEADER_USER_ID, ctx.user_id())
    }

    /// Sends a request and decodes a JSON response body.
    ///
    /// Non-success statuses are mapped onto the core error taxonomy with the
    /// message extracted from the error body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &'static str,
    ) -> opsdeck_core::Result<T> {
        let started_at = Instant::now();

        let response = builder.send().await.map_err(Error::Reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let message = extract_error_message(response).await;
            tracing::warn!(
                target: TRACING_TARGET,
                operation,
                status = status.as_u16(),
                error = %message,
                elapsed_ms = started_at.elapsed().as_millis(),
                "API request failed"
            );
            return Err(status_error(status, message));
        }

        let value = response.json::<T>().await.map_err(Error::Reqwest)?;

        tracing::debug!(
            target: TRACING_TARGET,
            operation,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "API request completed"
        );

        Ok(value)
    }
}

/// Maps a non-success HTTP status onto the core error taxonomy.
fn status_error(status: StatusCode, message: String) -> opsdeck_core::Error {
    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => opsdeck_core::Error::authentication(),
        StatusCode::NOT_FOUND => opsdeck_core::Error::not_found(),
        _ => opsdeck_core::Error::external_error(),
    };
    error.with_message(format!("HTTP {}: {message}", status.as_u16()))
}

/// Extracts a human-readable message from an error response.
///
/// Probes the JSON body for `error`, `message`, `detail` in that order,
/// falling back to the raw body text, then to `HTTP <status>`.
async fn extract_error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    message_from_body(status, &body)
}

fn message_from_body(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            if let Some(value) = payload.get(key) {
                match value {
                    serde_json::Value::String(s) if !s.is_empty() => return s.clone(),
                    serde_json::Value::Null => {}
                    other => return other.to_string(),
                }
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    format!("HTTP {}", status.as_u16())
}

/// Classifies a reqwest transport error for the lookup path.
fn classify_lookup_error(err: &reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::transport(err.to_string())
    }
}

#[async_trait]
impl DocumentProvider for ProjectApiClient {
    async fn list_documents(&self, ctx: &ProjectContext) -> opsdeck_core::Result<Vec<DocumentMeta>> {
        let path = format!("/api/projects/{}/docs", ctx.project_id());
        self.send_json(self.request(Method::GET, &path, ctx), "list_documents")
            .await
    }

    async fn fetch_document(
        &self,
        ctx: &ProjectContext,
        doc_id: &str,
    ) -> std::result::Result<DocumentPayload, LookupError> {
        let path = format!("/api/projects/{}/docs/{doc_id}", ctx.project_id());

        tracing::debug!(
            target: TRACING_TARGET,
            doc_id,
            "Fetching document"
        );

        let response = self
            .request(Method::GET, &path, ctx)
            .send()
            .await
            .map_err(|e| classify_lookup_error(&e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::not_found(doc_id));
        }
        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(LookupError::status(status.as_u16(), message));
        }

        response
            .json::<DocumentPayload>()
            .await
            .map_err(|e| LookupError::invalid_payload(e.to_string()))
    }
}

#[async_trait]
impl IssueProvider for ProjectApiClient {
    async fn list_issues(&self, ctx: &ProjectContext) -> opsdeck_core::Result<Vec<Issue>> {
        let path = format!("/api/projects/{}/issues", ctx.project_id());
        self.send_json(self.request(Method::GET, &path, ctx), "list_issues")
            .await
    }

    async fn get_issue(&self, ctx: &ProjectContext, issue_id: &str) -> opsdeck_core::Result<Issue> {
        let path = format!("/api/projects/{}/issues/{issue_id}", ctx.project_id());
        self.send_json(self.request(Method::GET, &path, ctx), "get_issue")
            .await
    }

    async fn create_issue(
        &self,
        ctx: &ProjectContext,
        issue: &NewIssue,
    ) -> opsdeck_core::Result<Issue> {
        let path = format!("/api/projects/{}/issues", ctx.project_id());
        self.send_json(
            self.request(Method::POST, &path, ctx).json(issue),
            "create_issue",
        )
        .await
    }

    async fn update_issue(
        &self,
        ctx: &ProjectContext,
        issue_id: &str,
        replacement: &IssueReplacement,
    ) -> opsdeck_core::Result<Issue> {
        let path = format!("/api/projects/{}/issues/{issue_id}", ctx.project_id());
        self.send_json(
            self.request(Method::PUT, &path, ctx).json(replacement),
            "update_issue",
        )
        .await
    }
}

#[async_trait]
impl KnowledgeProvider for ProjectApiClient {
    async fn search(
        &self,
        ctx: &ProjectContext,
        query: &KnowledgeQuery,
    ) -> opsdeck_core::Result<KnowledgeResponse> {
        self.send_json(
            self.request(Method::POST, "/api/rag/query", ctx).json(query),
            "knowledge_search",
        )
        .await
    }
}

#[async_trait]
impl ProjectProvider for ProjectApiClient {
    async fn project_info(&self, ctx: &ProjectContext) -> opsdeck_core::Result<ProjectInfo> {
        let path = format!("/api/projects/{}", ctx.project_id());
        self.send_json(self.request(Method::GET, &path, ctx), "project_info")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ProjectApiClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiClientConfig::default().with_base_url("http://api.local/");
        let client = ProjectApiClient::new(config).unwrap();
        assert_eq!(client.url("/api/rag/query"), "http://api.local/api/rag/query");
    }

    #[test]
    fn test_message_probes_known_keys_in_order() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = r#"{"message": "fallback", "error": "primary"}"#;
        assert_eq!(message_from_body(status, body), "primary");

        let body = r#"{"detail": "only detail"}"#;
        assert_eq!(message_from_body(status, body), "only detail");
    }

    #[test]
    fn test_message_falls_back_to_body_then_status() {
        let status = StatusCode::BAD_GATEWAY;
        assert_eq!(message_from_body(status, "  plain text  "), "plain text");
        assert_eq!(message_from_body(status, ""), "HTTP 502");
        assert_eq!(message_from_body(status, "{}"), "{}");
    }

    #[test]
    fn test_status_error_classification() {
        let err = status_error(StatusCode::UNAUTHORIZED, "nope".into());
        assert_eq!(err.kind(), opsdeck_core::ErrorKind::Authentication);

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert_eq!(err.kind(), opsdeck_core::ErrorKind::ExternalError);
    }
}
