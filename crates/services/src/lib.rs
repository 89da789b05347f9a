//! Server-side collaborators: the ClickHouse query client and the read-only
//! query proxy in front of it.

pub mod clickhouse;
pub mod proxy;
pub mod sql_guard;

pub use clickhouse::{QueriesClient, QueryError};
pub use proxy::{ProxyResponse, ProxyServer, QueryBackend, QueryProxy};
pub use sql_guard::{validate_sql, SqlRejection};
