//! Fixed SQL statements behind every scenario and analytical query.
//!
//! One struct per statement, executed against any sea-orm connection
//! (pool or open transaction). Row types alias their SQL columns to the
//! struct field names.

pub mod analytics;
pub mod deliveries;
pub mod employees;
pub mod receipts;
pub mod reviews;
pub mod stock;

use crate::errors::ServiceError;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};

#[async_trait]
pub trait Query: Send + Sync {
    type Output: Send + Sync;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync;
}

/// Current timestamp expression for the given backend.
pub(crate) fn sql_now(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Sqlite => "datetime('now')",
        _ => "NOW()",
    }
}

/// Current timestamp plus a day offset, computed store-side.
pub(crate) fn sql_now_plus_days(backend: DbBackend, days: u32) -> String {
    match backend {
        DbBackend::Sqlite => format!("datetime('now', '+{days} days')"),
        _ => format!("NOW() + INTERVAL '{days} days'"),
    }
}

/// Run a statement and map every returned row into `T`.
pub(crate) async fn fetch_all<C, T>(conn: &C, stmt: Statement) -> Result<Vec<T>, ServiceError>
where
    C: ConnectionTrait,
    T: FromQueryResult,
{
    let rows = conn.query_all(stmt).await.map_err(ServiceError::db_error)?;
    rows.iter()
        .map(|row| T::from_query_result(row, "").map_err(ServiceError::db_error))
        .collect()
}

/// Run a statement expected to return at most one row.
pub(crate) async fn fetch_one<C, T>(conn: &C, stmt: Statement) -> Result<Option<T>, ServiceError>
where
    C: ConnectionTrait,
    T: FromQueryResult,
{
    let row = conn.query_one(stmt).await.map_err(ServiceError::db_error)?;
    row.map(|r| T::from_query_result(&r, "").map_err(ServiceError::db_error))
        .transpose()
}
