//! Query proxy: a small HTTP front for the ClickHouse Queries API that keeps
//! credentials server-side and only lets read-only SQL through.
//!
//! Routing and status mapping live in [`QueryProxy::handle`], which is plain
//! async code over a [`QueryBackend`]; [`ProxyServer`] only moves bytes
//! between `tiny_http` and the handler.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use shared::settings::QueryBackendSettings;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Header, Request, Response, Server};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::clickhouse::{self, QueriesClient, QueryError, DEFAULT_FORMAT};
use crate::sql_guard;

pub const QUERY_PATH: &str = "/api/clickhouse";
pub const PING_PATH: &str = "/api/clickhouse-ping";

const PING_SQL: &str = "SELECT 1 as result";

/// Something that can run SQL and hand back the raw response body
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn execute(&self, sql: &str, format: &str) -> Result<String, QueryError>;
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::new(status, json!({ "error": message }))
    }

    fn into_http(self) -> Response<Cursor<Vec<u8>>> {
        let bytes = serde_json::to_vec(&self.body).unwrap_or_default();
        let mut resp = Response::from_data(bytes).with_status_code(self.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            resp.add_header(header);
        }
        resp
    }
}

pub struct QueryProxy {
    // None when credentials are not configured
    backend: Option<Arc<dyn QueryBackend>>,
}

impl QueryProxy {
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A proxy that answers every request with a configuration error
    pub fn unconfigured() -> Self {
        Self { backend: None }
    }

    /// Build from settings. Missing credentials are not fatal; requests
    /// will report the configuration error instead.
    pub fn from_settings(settings: &QueryBackendSettings) -> Result<Self, QueryError> {
        match settings.credentials() {
            Ok(credentials) => {
                let client = QueriesClient::new(credentials, settings.request_timeout())?;
                info!(endpoint = %client.endpoint(), "query backend configured");
                Ok(Self::new(Arc::new(client)))
            }
            Err(e) => {
                warn!("query backend unavailable: {}", e);
                Ok(Self::unconfigured())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Route one request. `target` may carry a query string.
    pub async fn handle(&self, method: &str, target: &str, body: &[u8]) -> ProxyResponse {
        let path = target.split('?').next().unwrap_or(target);
        match path {
            QUERY_PATH => self.handle_query(method, body).await,
            PING_PATH => self.handle_ping(method).await,
            _ => ProxyResponse::error(404, "Not found"),
        }
    }

    async fn handle_query(&self, method: &str, body: &[u8]) -> ProxyResponse {
        if !method.eq_ignore_ascii_case("POST") {
            return ProxyResponse::error(405, "Method not allowed");
        }
        let Some(backend) = &self.backend else {
            error!("query request received without backend configuration");
            return ProxyResponse::error(500, "Server configuration error");
        };

        let request: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(_) => return ProxyResponse::error(400, "Invalid JSON body"),
        };
        let sql = match request.get("sql").and_then(Value::as_str) {
            Some(sql) if !sql.is_empty() => sql,
            _ => return ProxyResponse::error(400, "SQL query is required"),
        };
        let format = request
            .get("format")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_FORMAT);

        if let Err(rejection) = sql_guard::validate_sql(sql) {
            info!(reason = %rejection, "rejected query");
            return ProxyResponse::error(400, &rejection.to_string());
        }

        let result = backend
            .execute(sql, format)
            .await
            .and_then(|text| Ok(clickhouse::parse_rows(&text)?));

        match result {
            Ok(rows) => ProxyResponse::new(200, Value::Array(rows)),
            Err(QueryError::Upstream { status, body }) => {
                warn!(status, "ClickHouse API error: {}", body);
                ProxyResponse::new(
                    status,
                    json!({ "error": "ClickHouse query failed", "details": body }),
                )
            }
            Err(e) => {
                error!("query proxy failure: {}", e);
                ProxyResponse::new(
                    500,
                    json!({ "error": "Internal server error", "message": e.to_string() }),
                )
            }
        }
    }

    async fn handle_ping(&self, method: &str) -> ProxyResponse {
        if !(method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("POST")) {
            return ProxyResponse::error(405, "Method not allowed");
        }
        let Some(backend) = &self.backend else {
            return ProxyResponse::new(
                500,
                json!({ "connected": false, "error": "Server configuration missing" }),
            );
        };

        let outcome = match backend.execute(PING_SQL, DEFAULT_FORMAT).await {
            Ok(text) => first_row_is_one(&text),
            Err(QueryError::Upstream { status, .. }) => {
                Err(format!("Connection failed with status {}", status))
            }
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(()) => ProxyResponse::new(
                200,
                json!({
                    "connected": true,
                    "message": "ClickHouse connection successful",
                    "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                }),
            ),
            Err(reason) => {
                warn!("connection test failed: {}", reason);
                ProxyResponse::new(200, json!({ "connected": false, "error": reason }))
            }
        }
    }
}

fn first_row_is_one(text: &str) -> Result<(), String> {
    let first = text.lines().next().unwrap_or_default();
    let row: Value = serde_json::from_str(first).map_err(|e| e.to_string())?;
    match row.get("result").and_then(Value::as_i64) {
        Some(1) => Ok(()),
        _ => Err("Unexpected response from ClickHouse".to_string()),
    }
}

/// `tiny_http` listener feeding requests into a [`QueryProxy`]
pub struct ProxyServer {
    server: Arc<Server>,
    proxy: Arc<QueryProxy>,
}

impl ProxyServer {
    pub fn bind(addr: &str, proxy: QueryProxy) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| anyhow!("failed to bind {}: {}", addr, e))?;
        Ok(Self {
            server: Arc::new(server),
            proxy: Arc::new(proxy),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Accept requests until the listener fails
    pub async fn run(self) -> Result<()> {
        if let Some(addr) = self.local_addr() {
            info!(%addr, "query proxy listening");
        }

        // tiny_http is blocking; accept on a plain thread and hand requests over
        let (tx, mut rx) = mpsc::unbounded_channel::<(Request, Vec<u8>)>();
        let server = self.server.clone();
        std::thread::Builder::new()
            .name("query-proxy-accept".into())
            .spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = Vec::new();
                    if let Err(e) = request.as_reader().read_to_end(&mut body) {
                        warn!("failed to read request body: {}", e);
                    }
                    if tx.send((request, body)).is_err() {
                        break;
                    }
                }
            })?;

        while let Some((request, body)) = rx.recv().await {
            let proxy = self.proxy.clone();
            tokio::spawn(async move { respond(&proxy, request, body).await });
        }
        Err(anyhow!("query proxy listener stopped"))
    }
}

async fn respond(proxy: &QueryProxy, request: Request, body: Vec<u8>) {
    let method = request.method().to_string();
    let target = request.url().to_string();
    let response = proxy.handle(&method, &target, &body).await;
    info!(%method, path = %target, status = response.status, "proxied request");

    let sent = tokio::task::spawn_blocking(move || request.respond(response.into_http())).await;
    match sent {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("failed to write response: {}", e),
        Err(e) => warn!("response task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    enum Canned {
        Body(&'static str),
        Status(u16, &'static str),
    }

    struct FakeBackend {
        canned: Canned,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeBackend {
        fn new(canned: Canned) -> Arc<Self> {
            Arc::new(Self {
                canned,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryBackend for FakeBackend {
        async fn execute(&self, sql: &str, format: &str) -> Result<String, QueryError> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), format.to_string()));
            match self.canned {
                Canned::Body(text) => Ok(text.to_string()),
                Canned::Status(status, body) => Err(QueryError::Upstream {
                    status,
                    body: body.to_string(),
                }),
            }
        }
    }

    fn fake_proxy(canned: Canned) -> (QueryProxy, Arc<FakeBackend>) {
        let backend = FakeBackend::new(canned);
        (QueryProxy::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_select_returns_rows() {
        let (proxy, backend) = fake_proxy(Canned::Body("{\"n\":1}\n{\"n\":2}\n"));
        let resp = proxy
            .handle("POST", QUERY_PATH, br#"{"sql":"SELECT number AS n FROM numbers(2)"}"#)
            .await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, json!([{"n": 1}, {"n": 2}]));
        assert_eq!(
            backend.calls(),
            vec![(
                "SELECT number AS n FROM numbers(2)".to_string(),
                "JSONEachRow".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_empty_upstream_body_is_empty_array() {
        let (proxy, _) = fake_proxy(Canned::Body("  \n"));
        let resp = proxy
            .handle("POST", QUERY_PATH, br#"{"sql":"SHOW TABLES","format":"JSONEachRow"}"#)
            .await;
        assert_eq!(resp, ProxyResponse::new(200, json!([])));
    }

    #[tokio::test]
    async fn test_request_validation_statuses() {
        let (proxy, backend) = fake_proxy(Canned::Body(""));

        let resp = proxy.handle("GET", QUERY_PATH, b"").await;
        assert_eq!(resp, ProxyResponse::error(405, "Method not allowed"));

        let resp = proxy.handle("POST", QUERY_PATH, b"{not json").await;
        assert_eq!(resp, ProxyResponse::error(400, "Invalid JSON body"));

        let resp = proxy.handle("POST", QUERY_PATH, br#"{"sql":""}"#).await;
        assert_eq!(resp, ProxyResponse::error(400, "SQL query is required"));

        let resp = proxy.handle("POST", QUERY_PATH, br#"{"format":"JSON"}"#).await;
        assert_eq!(resp, ProxyResponse::error(400, "SQL query is required"));

        let resp = proxy
            .handle("POST", QUERY_PATH, br#"{"sql":"DROP TABLE users"}"#)
            .await;
        assert_eq!(resp, ProxyResponse::error(400, "Operation DROP is not allowed"));

        let resp = proxy.handle("POST", QUERY_PATH, br#"{"sql":"   "}"#).await;
        assert_eq!(resp, ProxyResponse::error(400, "SQL query cannot be empty"));

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_status_is_forwarded() {
        let (proxy, _) = fake_proxy(Canned::Status(401, "Authentication failed"));
        let resp = proxy.handle("POST", QUERY_PATH, br#"{"sql":"SELECT 1"}"#).await;

        assert_eq!(resp.status, 401);
        assert_eq!(resp.body["error"], "ClickHouse query failed");
        assert_eq!(resp.body["details"], "Authentication failed");
    }

    #[tokio::test]
    async fn test_malformed_rows_are_internal_errors() {
        let (proxy, _) = fake_proxy(Canned::Body("{\"n\":"));
        let resp = proxy.handle("POST", QUERY_PATH, br#"{"sql":"SELECT 1"}"#).await;

        assert_eq!(resp.status, 500);
        assert_eq!(resp.body["error"], "Internal server error");
        assert!(resp.body["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_unconfigured_proxy() {
        let proxy = QueryProxy::unconfigured();
        assert!(!proxy.is_configured());

        let resp = proxy.handle("POST", QUERY_PATH, br#"{"sql":"SELECT 1"}"#).await;
        assert_eq!(resp, ProxyResponse::error(500, "Server configuration error"));

        let resp = proxy.handle("GET", PING_PATH, b"").await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body["connected"], false);
        assert_eq!(resp.body["error"], "Server configuration missing");
    }

    #[test]
    fn test_from_settings_without_credentials() {
        let proxy = QueryProxy::from_settings(&QueryBackendSettings::default()).unwrap();
        assert!(!proxy.is_configured());
    }

    #[tokio::test]
    async fn test_ping() {
        let (proxy, backend) = fake_proxy(Canned::Body("{\"result\":1}\n"));
        let resp = proxy.handle("GET", PING_PATH, b"").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["connected"], true);
        assert_eq!(resp.body["message"], "ClickHouse connection successful");
        assert_eq!(backend.calls()[0].0, "SELECT 1 as result");

        let resp = proxy.handle("DELETE", PING_PATH, b"").await;
        assert_eq!(resp.status, 405);

        let (proxy, _) = fake_proxy(Canned::Body("{\"result\":0}"));
        let resp = proxy.handle("POST", PING_PATH, b"").await;
        assert_eq!(resp.body, json!({"connected": false, "error": "Unexpected response from ClickHouse"}));

        let (proxy, _) = fake_proxy(Canned::Status(503, "down"));
        let resp = proxy.handle("GET", PING_PATH, b"").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["error"], "Connection failed with status 503");
    }

    #[tokio::test]
    async fn test_unknown_path_and_query_string() {
        let (proxy, _) = fake_proxy(Canned::Body("{\"result\":1}"));
        assert_eq!(
            proxy.handle("GET", "/api/other", b"").await,
            ProxyResponse::error(404, "Not found")
        );
        assert_eq!(proxy.handle("GET", "/api/clickhouse-ping?x=1", b"").await.status, 200);
    }

    #[tokio::test]
    async fn test_server_round_trip() {
        let (proxy, _) = fake_proxy(Canned::Body("{\"n\":7}"));
        let server = ProxyServer::bind("127.0.0.1:0", proxy).unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run());

        let resp = reqwest::Client::new()
            .post(format!("http://{}{}", addr, QUERY_PATH))
            .json(&json!({ "sql": "SELECT 7 AS n" }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!([{"n": 7}]));
    }
}
