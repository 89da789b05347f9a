//! Read-only guard for SQL forwarded to the query backend.
//!
//! This is a coarse substring block-list, not a parser: any query mentioning
//! a write keyword is refused, including harmless identifiers such as
//! `created_at`.

/// Keywords refused anywhere in the query, checked in this order
pub const FORBIDDEN_OPERATIONS: &[&str] =
    &["DROP", "DELETE", "TRUNCATE", "ALTER", "CREATE", "INSERT", "UPDATE"];

/// A query must open with one of these
pub const ALLOWED_PREFIXES: &[&str] = &["SELECT", "SHOW", "DESCRIBE", "EXPLAIN"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlRejection {
    #[error("SQL query cannot be empty")]
    Empty,
    #[error("Operation {0} is not allowed")]
    ForbiddenOperation(&'static str),
    #[error("Query must start with one of: SELECT, SHOW, DESCRIBE, EXPLAIN")]
    NotReadOnly,
}

pub fn validate_sql(sql: &str) -> Result<(), SqlRejection> {
    let normalized = sql.trim().to_uppercase();

    if normalized.is_empty() {
        return Err(SqlRejection::Empty);
    }

    if let Some(op) = FORBIDDEN_OPERATIONS
        .iter()
        .copied()
        .find(|op| normalized.contains(op))
    {
        return Err(SqlRejection::ForbiddenOperation(op));
    }

    if !ALLOWED_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
        return Err(SqlRejection::NotReadOnly);
    }

    Ok(())
}
