//! Handlers for the analytical queries under `/analytical/*`.

use super::common::{parse_date_time, success_response};
use crate::{
    errors::ApiError,
    queries::{
        analytics::{
            CustomerSpendingQuery, CustomerSpendingRow, FastestCashierRow, FastestCashiersQuery,
            HighValueCustomerRow, HighValueCustomersQuery, MorningWarehouseWorkerRow,
            MorningWarehouseWorkersQuery,
        },
        reviews::{ReviewTrendQuery, ReviewTrendRow},
        stock::{LowStockQuery, StockLevelRow},
        Query as _,
    },
    AppState,
};
use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HighValueCustomersResponse {
    high_value_customers: Vec<HighValueCustomerRow>,
}

async fn high_value_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = HighValueCustomersQuery
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching high value customers", e))?;

    Ok(success_response(HighValueCustomersResponse {
        high_value_customers: rows,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FastestCashiersResponse {
    fastest_cashiers: Vec<FastestCashierRow>,
}

async fn fastest_cashiers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = FastestCashiersQuery
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching fastest cashiers", e))?;

    Ok(success_response(FastestCashiersResponse {
        fastest_cashiers: rows,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTrendParams {
    #[serde(default)]
    pub start_date_time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewTrendResponse {
    reviews_trend: Vec<ReviewTrendRow>,
}

async fn run_review_trend(
    state: AppState,
    params: ReviewTrendParams,
) -> Result<axum::response::Response, ApiError> {
    let start = params
        .start_date_time
        .as_deref()
        .and_then(parse_date_time)
        .ok_or_else(|| {
            ApiError::validation("Invalid startDateTime format. Please provide a valid date.")
        })?;

    let rows = ReviewTrendQuery { start }
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching reviews trend", e))?;

    Ok(success_response(ReviewTrendResponse {
        reviews_trend: rows,
    }))
}

/// GET variant: the start date travels as a query parameter.
async fn reviews_trend_get(
    State(state): State<AppState>,
    Query(params): Query<ReviewTrendParams>,
) -> Result<impl IntoResponse, ApiError> {
    run_review_trend(state, params).await
}

/// POST variant: the start date travels in the JSON body.
async fn reviews_trend_post(
    State(state): State<AppState>,
    Json(params): Json<ReviewTrendParams>,
) -> Result<impl IntoResponse, ApiError> {
    run_review_trend(state, params).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MorningWarehouseWorkersResponse {
    certified_morning_warehouse_workers: Vec<MorningWarehouseWorkerRow>,
}

async fn certified_morning_warehouse_workers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = MorningWarehouseWorkersQuery
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching certified morning warehouse workers", e))?;

    Ok(success_response(MorningWarehouseWorkersResponse {
        certified_morning_warehouse_workers: rows,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerSpendingResponse {
    customer_spending_behavior: Vec<CustomerSpendingRow>,
}

async fn customer_spending_behavior(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = CustomerSpendingQuery
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching customer spending behaviors", e))?;

    Ok(success_response(CustomerSpendingResponse {
        customer_spending_behavior: rows,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LowInventoryResponse {
    low_inventory_products: Vec<StockLevelRow>,
}

async fn low_inventory_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = LowStockQuery::default()
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error fetching low inventory products", e))?;

    Ok(success_response(LowInventoryResponse {
        low_inventory_products: rows,
    }))
}

/// Routes for the analytical queries.
pub fn analytical_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/high-value", get(high_value_customers))
        .route("/cashiers/fastest", get(fastest_cashiers))
        .route(
            "/reviews/trend",
            get(reviews_trend_get).post(reviews_trend_post),
        )
        .route(
            "/warehouse-workers/certified",
            get(certified_morning_warehouse_workers),
        )
        .route("/customers/spending-behavior", get(customer_spending_behavior))
        .route("/products/low-inventory", get(low_inventory_products))
}
