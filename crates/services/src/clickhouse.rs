//! HTTP client for the ClickHouse Cloud Queries API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use shared::settings::QueryCredentials;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use zeroize::Zeroizing;

use crate::proxy::QueryBackend;

/// Output format used when the caller doesn't ask for one
pub const DEFAULT_FORMAT: &str = "JSONEachRow";

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid queries API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("ClickHouse returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("request to ClickHouse failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed row in ClickHouse response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct QueriesClient {
    http: Client,
    endpoint: Url,
    key_id: String,
    key_secret: Zeroizing<String>,
}

impl QueriesClient {
    pub fn new(credentials: QueryCredentials, timeout: Duration) -> Result<Self, QueryError> {
        let endpoint = Url::parse(credentials.queries_api_url.trim())?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            key_id: credentials.key_id,
            key_secret: credentials.key_secret,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run `sql` and return the raw response body
    pub async fn execute(&self, sql: &str, format: &str) -> Result<String, QueryError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("format", format);
        debug!(%format, "sending query to ClickHouse");

        let resp = self
            .http
            .post(url)
            .basic_auth(&self.key_id, Some(self.key_secret.as_str()))
            .json(&json!({ "sql": sql }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "ClickHouse query failed");
            return Err(QueryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl QueryBackend for QueriesClient {
    async fn execute(&self, sql: &str, format: &str) -> Result<String, QueryError> {
        QueriesClient::execute(self, sql, format).await
    }
}

/// Decode a JSONEachRow body, one object per non-blank line
pub fn parse_rows(body: &str) -> Result<Vec<Value>, serde_json::Error> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<Value>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(server: &MockServer) -> QueryCredentials {
        QueryCredentials {
            queries_api_url: format!("{}/run", server.uri()),
            key_id: "key".into(),
            key_secret: Zeroizing::new("secret".into()),
        }
    }

    fn client(server: &MockServer) -> QueriesClient {
        QueriesClient::new(credentials(server), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_execute_sends_auth_format_and_sql() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/run"))
            .and(query_param("format", "JSONEachRow"))
            .and(basic_auth("key", "secret"))
            .and(body_json(json!({ "sql": "SELECT 1 as result" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":1}\n"))
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server)
            .execute("SELECT 1 as result", DEFAULT_FORMAT)
            .await
            .unwrap();
        assert_eq!(body, "{\"result\":1}\n");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = client(&server).execute("SELECT 1", "JSON").await.unwrap_err();
        match err {
            QueryError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_each_row_line_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("format", "JSONEachRow"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("{\"n\":1}\n{\"n\":2}\n"),
            )
            .mount(&server)
            .await;

        let body = client(&server)
            .execute("SELECT number AS n", DEFAULT_FORMAT)
            .await
            .unwrap();
        let rows = parse_rows(&body).unwrap();
        assert_eq!(rows, vec![json!({"n": 1}), json!({"n": 2})]);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let creds = QueryCredentials {
            queries_api_url: "not a url".into(),
            key_id: "k".into(),
            key_secret: Zeroizing::new("s".into()),
        };
        assert!(matches!(
            QueriesClient::new(creds, Duration::from_secs(1)),
            Err(QueryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_rows() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("  \n ").unwrap().is_empty());
        assert_eq!(parse_rows("{\"a\":1}\r\n\n{\"a\":2}").unwrap().len(), 2);
        assert!(parse_rows("{\"a\":").is_err());
    }
}
