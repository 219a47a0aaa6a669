//! Read-only analytical queries.

use super::{fetch_all, Query};
use crate::errors::ServiceError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use serde::Serialize;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct HighValueCustomerRow {
    #[serde(rename = "CustomerID")]
    pub customer_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "StoreVisitCount")]
    pub store_visit_count: i64,
    #[serde(rename = "TotalSpending")]
    pub total_spending: Decimal,
}

/// Visit count and total spending per customer, biggest spenders first.
#[derive(Debug)]
pub struct HighValueCustomersQuery;

#[async_trait]
impl Query for HighValueCustomersQuery {
    type Output = Vec<HighValueCustomerRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT r.customer_id AS customer_id, c.first_name AS first_name, \
                    c.last_name AS last_name, COUNT(r.receipt_id) AS store_visit_count, \
                    SUM(r.total) AS total_spending \
             FROM receipts r \
             JOIN customers c ON r.customer_id = c.customer_id \
             GROUP BY r.customer_id, c.first_name, c.last_name \
             ORDER BY total_spending DESC",
        );
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct FastestCashierRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i32,
    #[serde(rename = "TotalMinutes")]
    pub total_minutes: i64,
    #[serde(rename = "TotalItems")]
    pub total_items: i64,
    #[serde(rename = "TotalNumTransactions")]
    pub total_num_transactions: i64,
    #[serde(rename = "AvgItemsPerHour")]
    pub avg_items_per_hour: Option<f64>,
}

/// Per-cashier throughput over receipts rung up at a register. A cashier
/// whose first and last transaction fall within the same hour has no
/// meaningful rate; the NULLIF guard leaves the rate null for such rows
/// rather than failing the whole statement.
#[derive(Debug)]
pub struct FastestCashiersQuery;

#[async_trait]
impl Query for FastestCashiersQuery {
    type Output = Vec<FastestCashierRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let backend = conn.get_database_backend();
        let sql = match backend {
            DbBackend::Sqlite => {
                "WITH cashier_transaction_times AS ( \
                     SELECT employee_id, MIN(transaction_time) AS min_time, \
                            MAX(transaction_time) AS max_time, \
                            SUM(num_items) AS total_items, \
                            COUNT(*) AS total_num_transactions \
                     FROM receipts \
                     WHERE register_number IS NOT NULL \
                     GROUP BY employee_id \
                 ) \
                 SELECT employee_id AS employee_id, \
                        CAST(ROUND((julianday(max_time) - julianday(min_time)) * 1440) \
                            AS INTEGER) AS total_minutes, \
                        CAST(total_items AS INTEGER) AS total_items, \
                        CAST(total_num_transactions AS INTEGER) AS total_num_transactions, \
                        (total_items * 1.0) / NULLIF(CAST(ROUND((julianday(max_time) - \
                            julianday(min_time)) * 1440) AS INTEGER) / 60, 0) \
                            AS avg_items_per_hour \
                 FROM cashier_transaction_times \
                 ORDER BY avg_items_per_hour DESC"
            }
            _ => {
                "WITH cashier_transaction_times AS ( \
                     SELECT employee_id, MIN(transaction_time) AS min_time, \
                            MAX(transaction_time) AS max_time, \
                            SUM(num_items) AS total_items, \
                            COUNT(*) AS total_num_transactions \
                     FROM receipts \
                     WHERE register_number IS NOT NULL \
                     GROUP BY employee_id \
                 ) \
                 SELECT employee_id AS employee_id, \
                        CAST(FLOOR(EXTRACT(EPOCH FROM (max_time - min_time)) / 60) AS BIGINT) \
                            AS total_minutes, \
                        CAST(total_items AS BIGINT) AS total_items, \
                        CAST(total_num_transactions AS BIGINT) AS total_num_transactions, \
                        CAST((total_items * 1.0) / NULLIF(FLOOR(EXTRACT(EPOCH FROM \
                            (max_time - min_time)) / 3600), 0) AS DOUBLE PRECISION) \
                            AS avg_items_per_hour \
                 FROM cashier_transaction_times \
                 ORDER BY avg_items_per_hour DESC"
            }
        };
        let stmt = Statement::from_string(backend, sql);
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct MorningWarehouseWorkerRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "ShiftTiming")]
    pub shift_timing: String,
    #[serde(rename = "RoleName")]
    pub role_name: String,
}

/// Morning-shift warehouse workers. Matches only shift and role; the
/// certification attribute is deliberately not consulted, for output
/// compatibility with the system this replaces.
#[derive(Debug)]
pub struct MorningWarehouseWorkersQuery;

#[async_trait]
impl Query for MorningWarehouseWorkersQuery {
    type Output = Vec<MorningWarehouseWorkerRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT e.employee_id AS employee_id, e.first_name AS first_name, \
                    e.last_name AS last_name, e.shift_timing AS shift_timing, \
                    r.role_name AS role_name \
             FROM employees e \
             JOIN roles r ON e.role_id = r.role_id \
             WHERE e.shift_timing = 'Morning' AND r.role_name = 'Warehouse Worker'",
        );
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct CustomerSpendingRow {
    #[serde(rename = "CustomerID")]
    pub customer_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "TotalSpending")]
    pub total_spending: Decimal,
    #[serde(rename = "MemberStatus")]
    pub member_status: Option<bool>,
}

/// Total spending per customer alongside the membership flag.
#[derive(Debug)]
pub struct CustomerSpendingQuery;

#[async_trait]
impl Query for CustomerSpendingQuery {
    type Output = Vec<CustomerSpendingRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT r.customer_id AS customer_id, c.first_name AS first_name, \
                    c.last_name AS last_name, SUM(r.total) AS total_spending, \
                    c.member_status AS member_status \
             FROM receipts r \
             JOIN customers c ON r.customer_id = c.customer_id \
             GROUP BY r.customer_id, c.first_name, c.last_name, c.member_status \
             ORDER BY total_spending DESC",
        );
        fetch_all(conn, stmt).await
    }
}
