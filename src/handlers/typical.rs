//! Handlers for the typical business scenarios under `/typical/*`.

use super::common::{created_response, parse_date_time, success_response};
use crate::{
    errors::{ApiError, ServiceError},
    queries::{
        deliveries::ListDeliveryOrders,
        employees::{
            EmployeeRecordRow, EmployeeShiftRow, FindRoleByName, InsertEmployee,
            InsertEmployeeSalary, InsertRoleAssignment, ListEmployeeShifts,
            ListStockerAssignments, LoadEmployeeRecord,
        },
        receipts::{FindReceipt, InsertReceipt, ReceiptRow},
        reviews::{AllReviewsQuery, AverageStarsQuery, InsertReview},
        stock::{
            InsertStockOrder, LowStockQuery, StockOrderStatusQuery, StockOrderStatusRow,
            StockLevelRow,
        },
        Query as _,
    },
    roles::RoleKind,
    AppState,
};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Salary is derived from the role's ceiling minus this offset.
const SALARY_OFFSET: i64 = 10_000;

/// Label substituted for stockers without an aisle yet.
const TRAINING_PLACEHOLDER: &str = "New stocker in training.";

fn txn_error(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(db) => ServiceError::Database(db),
        TransactionError::Transaction(service) => service,
    }
}

// --- employee registration -------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub shift_timing: String,
    pub role_name: String,
    #[serde(default)]
    pub role_assignments: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterEmployeeResponse {
    employee_information: Vec<EmployeeRecordRow>,
}

/// Register a new employee: role lookup, then employee + role-specific +
/// salary inserts in a single transaction.
async fn register_employee(
    State(state): State<AppState>,
    Json(payload): Json<RegisterEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    const CONTEXT: &str = "Error registering employee";
    let wrap = |e| ApiError::scenario(CONTEXT, e);

    let role = FindRoleByName {
        role_name: &payload.role_name,
    }
    .execute(&*state.db)
    .await
    .map_err(wrap)?
    .ok_or_else(|| wrap(ServiceError::InvalidRole(payload.role_name.clone())))?;

    // Roles outside the closed enumeration are rejected outright instead of
    // being registered without their attribute row.
    let kind = RoleKind::from_role_name(&role.role_name)
        .ok_or_else(|| wrap(ServiceError::InvalidRole(role.role_name.clone())))?;

    let salary = role.max_salary - Decimal::from(SALARY_OFFSET);
    let assignment = payload
        .role_assignments
        .as_ref()
        .and_then(|map| map.get(kind.assignment_key()))
        .cloned();

    let record = state
        .db
        .transaction::<_, EmployeeRecordRow, ServiceError>(move |txn| {
            Box::pin(async move {
                let employee_id = InsertEmployee {
                    first_name: &payload.first_name,
                    last_name: &payload.last_name,
                    shift_timing: &payload.shift_timing,
                    role_id: role.role_id,
                }
                .execute(txn)
                .await?;

                InsertRoleAssignment {
                    employee_id,
                    role: kind,
                    value: assignment.as_deref(),
                }
                .execute(txn)
                .await?;

                InsertEmployeeSalary {
                    employee_id,
                    salary,
                }
                .execute(txn)
                .await?;

                LoadEmployeeRecord { employee_id }
                    .execute(txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::Internal("registered employee record not found".into())
                    })
            })
        })
        .await
        .map_err(|e| wrap(txn_error(e)))?;

    info!(employee_id = record.employee_id, "employee registered");

    Ok(created_response(RegisterEmployeeResponse {
        employee_information: vec![record],
    }))
}

// --- receipt processing ----------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReceiptRequest {
    pub num_items: i32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub transaction_time: String,
    pub payment_type: String,
    #[serde(default)]
    pub register_number: Option<i32>,
    #[serde(rename = "employeeID")]
    pub employee_id: i32,
    #[serde(default, rename = "customerID")]
    pub customer_id: Option<i32>,
    #[serde(default, rename = "discountID")]
    pub discount_id: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ProcessReceiptResponse {
    receipt: Vec<ReceiptRow>,
}

async fn process_receipts(
    State(state): State<AppState>,
    Json(payload): Json<ProcessReceiptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    const CONTEXT: &str = "Error processing receipt";
    let wrap = |e| ApiError::scenario(CONTEXT, e);

    let transaction_time: NaiveDateTime = parse_date_time(&payload.transaction_time)
        .ok_or_else(|| ApiError::validation("Invalid transactionTime format"))?;

    let receipt_id = InsertReceipt {
        num_items: payload.num_items,
        subtotal: payload.subtotal,
        tax: payload.tax,
        total: payload.total,
        transaction_time,
        payment_type: &payload.payment_type,
        register_number: payload.register_number,
        employee_id: payload.employee_id,
        customer_id: payload.customer_id,
        discount_id: payload.discount_id,
    }
    .execute(&*state.db)
    .await
    .map_err(wrap)?;

    let receipt = FindReceipt { receipt_id }
        .execute(&*state.db)
        .await
        .map_err(wrap)?
        .ok_or_else(|| wrap(ServiceError::Internal("inserted receipt not found".into())))?;

    info!(receipt_id, "receipt processed");

    Ok(created_response(ProcessReceiptResponse {
        receipt: vec![receipt],
    }))
}

// --- stock check and stock orders ------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StockLevelsResponse {
    stock_levels: Vec<StockLevelRow>,
}

async fn check_stock(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = LowStockQuery::default()
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error checking stock", e))?;

    Ok(success_response(StockLevelsResponse { stock_levels: rows }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockOrderRequest {
    #[serde(rename = "invoicePDF")]
    pub invoice_pdf: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_type: String,
    #[serde(rename = "employeeID")]
    pub employee_id: i32,
    #[serde(rename = "supplierID")]
    pub supplier_id: i32,
}

#[derive(Debug, Serialize)]
struct StockOrderStatusView {
    #[serde(rename = "StockOrderID")]
    stock_order_id: i32,
    #[serde(rename = "SupplierCompany")]
    supplier_company: String,
    #[serde(rename = "FirstName")]
    first_name: String,
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "SalesPhoneNumber")]
    sales_phone_number: String,
    #[serde(rename = "OrderDate")]
    order_date: NaiveDateTime,
    #[serde(rename = "ExpectedDeliveryDate")]
    expected_delivery_date: NaiveDateTime,
    #[serde(rename = "Total")]
    total: Decimal,
    #[serde(rename = "DeliveryStatus")]
    delivery_status: &'static str,
}

impl From<StockOrderStatusRow> for StockOrderStatusView {
    fn from(row: StockOrderStatusRow) -> Self {
        Self {
            stock_order_id: row.stock_order_id,
            supplier_company: row.supplier_company,
            first_name: row.first_name,
            last_name: row.last_name,
            sales_phone_number: row.sales_phone_number,
            order_date: row.order_date,
            expected_delivery_date: row.expected_delivery_date,
            total: row.total,
            delivery_status: if row.delivery_status.unwrap_or(false) {
                "Delivered"
            } else {
                "Not Delivered"
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateStockOrderResponse {
    stock_order_status: Vec<StockOrderStatusView>,
}

async fn create_stock_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    const CONTEXT: &str = "Error creating stock order";
    let wrap = |e| ApiError::scenario(CONTEXT, e);

    let stock_order_id = InsertStockOrder {
        invoice: &payload.invoice_pdf,
        subtotal: payload.subtotal,
        tax: payload.tax,
        total: payload.total,
        payment_type: &payload.payment_type,
        employee_id: payload.employee_id,
        supplier_id: payload.supplier_id,
    }
    .execute(&*state.db)
    .await
    .map_err(wrap)?;

    let status = StockOrderStatusQuery { stock_order_id }
        .execute(&*state.db)
        .await
        .map_err(wrap)?;

    info!(stock_order_id, "stock order created");

    Ok(created_response(CreateStockOrderResponse {
        stock_order_status: status.map(StockOrderStatusView::from).into_iter().collect(),
    }))
}

// --- reviews ----------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub num_stars: Option<i32>,
    #[serde(default, rename = "customerID")]
    pub customer_id: Option<i32>,
}

async fn submit_review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(review_text), Some(num_stars), Some(customer_id)) = (
        payload.review_text.as_deref(),
        payload.num_stars,
        payload.customer_id,
    ) else {
        return Err(ApiError::validation(
            "Missing required fields: reviewText, numStars, customerID",
        ));
    };

    InsertReview {
        review_text,
        num_stars,
        customer_id,
    }
    .execute(&*state.db)
    .await
    .map_err(|e| ApiError::scenario("Error submitting customer review", e))?;

    info!(customer_id, "customer review submitted");

    Ok(created_response(
        serde_json::json!({ "message": "Review submitted" }),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewStatisticsResponse {
    all_reviews: Vec<crate::queries::reviews::ReviewRow>,
    avg_num_stars: Vec<crate::queries::reviews::AverageStarsRow>,
}

async fn review_statistics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    const CONTEXT: &str = "Error fetching review statistics";
    let wrap = |e| ApiError::scenario(CONTEXT, e);

    let all_reviews = AllReviewsQuery.execute(&*state.db).await.map_err(wrap)?;
    let avg_num_stars = AverageStarsQuery.execute(&*state.db).await.map_err(wrap)?;

    Ok(success_response(ReviewStatisticsResponse {
        all_reviews,
        avg_num_stars,
    }))
}

// --- read-only listings -----------------------------------------------------

#[derive(Debug, Serialize)]
struct StockerAssignmentView {
    #[serde(rename = "EmployeeID")]
    employee_id: i32,
    #[serde(rename = "FirstName")]
    first_name: String,
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "AssignedAisle")]
    assigned_aisle: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StockerAssignmentsResponse {
    stocker_assignments: Vec<StockerAssignmentView>,
}

async fn stocker_assignments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = ListStockerAssignments
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error retrieving stocker assignments", e))?;

    let views = rows
        .into_iter()
        .map(|row| StockerAssignmentView {
            employee_id: row.employee_id,
            first_name: row.first_name,
            last_name: row.last_name,
            assigned_aisle: row
                .assigned_aisle
                .unwrap_or_else(|| TRAINING_PLACEHOLDER.to_string()),
        })
        .collect();

    Ok(success_response(StockerAssignmentsResponse {
        stocker_assignments: views,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeShiftsResponse {
    employee_shifts: Vec<EmployeeShiftRow>,
}

async fn employee_shifts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = ListEmployeeShifts
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error retrieving employee shift times", e))?;

    Ok(success_response(EmployeeShiftsResponse {
        employee_shifts: rows,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryOrdersResponse {
    delivery_orders: Vec<crate::queries::deliveries::DeliveryOrderRow>,
}

async fn delivery_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = ListDeliveryOrders
        .execute(&*state.db)
        .await
        .map_err(|e| ApiError::scenario("Error retrieving delivery orders", e))?;

    Ok(success_response(DeliveryOrdersResponse {
        delivery_orders: rows,
    }))
}

/// Routes for the typical business scenarios.
pub fn typical_routes() -> Router<AppState> {
    Router::new()
        .route("/employees/register", post(register_employee))
        .route("/receipts/process", post(process_receipts))
        .route("/stock-order/check", get(check_stock))
        .route("/stock-order/create", post(create_stock_order))
        .route("/reviews/submit", post(submit_review))
        .route("/reviews/statistics", get(review_statistics))
        .route("/stockers/assignments", get(stocker_assignments))
        .route("/employees/shift", get(employee_shifts))
        .route("/delivery/orders", get(delivery_orders))
}
