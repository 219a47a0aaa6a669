//! grocery-store-api
//!
//! Backend service exposing typical business scenarios and analytical
//! queries over an externally owned grocery store schema.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod queries;
pub mod roles;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello, world! Server is running." }))
}

/// The full API surface: root, health, catalog, and both route groups.
/// Static-file serving and middleware layers are applied by the binary.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health::health))
        .route("/catalog", get(catalog::catalog))
        .nest("/typical", handlers::typical::typical_routes())
        .nest("/analytical", handlers::analytical::analytical_routes())
}
