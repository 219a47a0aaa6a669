//! Statements behind inventory checks and stock orders.

use super::{fetch_all, fetch_one, sql_now, sql_now_plus_days, Query};
use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use serde::Serialize;

/// Inventory at or below this quantity counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 20;

/// How far out a stock order's expected delivery date is set.
pub const DELIVERY_LEAD_DAYS: u32 = 7;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct StockLevelRow {
    #[serde(rename = "ProductID")]
    pub product_id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Quantity")]
    pub quantity: i32,
    #[serde(rename = "CategoryName")]
    pub category_name: String,
    #[serde(rename = "LastRestockDate")]
    pub last_restock_date: Option<NaiveDate>,
}

/// Inventory rows at or below the low-stock threshold, most urgent first.
#[derive(Debug)]
pub struct LowStockQuery {
    pub threshold: i32,
}

impl Default for LowStockQuery {
    fn default() -> Self {
        Self {
            threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

#[async_trait]
impl Query for LowStockQuery {
    type Output = Vec<StockLevelRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT i.product_id AS product_id, p.name AS name, i.quantity AS quantity, \
                    c.name AS category_name, i.last_restock_date AS last_restock_date \
             FROM inventory i \
             JOIN products p ON i.product_id = p.product_id \
             JOIN categories c ON p.category_id = c.category_id \
             WHERE i.quantity <= $1 \
             ORDER BY i.quantity, i.last_restock_date DESC",
            [self.threshold.into()],
        );
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedStockOrder {
    stock_order_id: i32,
}

/// Insert a stock order with order date "now" and expected delivery
/// "now + lead days", both computed store-side.
#[derive(Debug)]
pub struct InsertStockOrder<'a> {
    pub invoice: &'a str,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_type: &'a str,
    pub employee_id: i32,
    pub supplier_id: i32,
}

#[async_trait]
impl Query for InsertStockOrder<'_> {
    type Output = i32;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let backend = conn.get_database_backend();
        let sql = format!(
            "INSERT INTO stock_orders \
                 (order_date, expected_delivery_date, invoice, subtotal, tax, total, \
                  payment_type, employee_id, supplier_id) \
             VALUES ({now}, {eta}, $1, $2, $3, $4, $5, $6, $7) \
             RETURNING stock_order_id AS stock_order_id",
            now = sql_now(backend),
            eta = sql_now_plus_days(backend, DELIVERY_LEAD_DAYS),
        );
        let stmt = Statement::from_sql_and_values(
            backend,
            sql,
            [
                self.invoice.into(),
                self.subtotal.into(),
                self.tax.into(),
                self.total.into(),
                self.payment_type.into(),
                self.employee_id.into(),
                self.supplier_id.into(),
            ],
        );
        let inserted: Option<InsertedStockOrder> = fetch_one(conn, stmt).await?;
        inserted
            .map(|row| row.stock_order_id)
            .ok_or_else(|| ServiceError::Internal("stock order insert returned no id".into()))
    }
}

/// Denormalized supplier/salesperson/phone/status view for one order.
/// The delivery flag stays raw here; the handler renders the label.
#[derive(Debug, FromQueryResult)]
pub struct StockOrderStatusRow {
    pub stock_order_id: i32,
    pub supplier_company: String,
    pub first_name: String,
    pub last_name: String,
    pub sales_phone_number: String,
    pub order_date: NaiveDateTime,
    pub expected_delivery_date: NaiveDateTime,
    pub total: Decimal,
    pub delivery_status: Option<bool>,
}

#[derive(Debug)]
pub struct StockOrderStatusQuery {
    pub stock_order_id: i32,
}

#[async_trait]
impl Query for StockOrderStatusQuery {
    type Output = Option<StockOrderStatusRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT so.stock_order_id AS stock_order_id, s.company AS supplier_company, \
                    sp.first_name AS first_name, sp.last_name AS last_name, \
                    spn.phone_number AS sales_phone_number, so.order_date AS order_date, \
                    so.expected_delivery_date AS expected_delivery_date, so.total AS total, \
                    so.delivery_status AS delivery_status \
             FROM stock_orders so \
             JOIN suppliers s ON so.supplier_id = s.supplier_id \
             JOIN sales_people sp ON s.supplier_id = sp.supplier_id \
             JOIN sales_phone_numbers spn ON sp.sales_person_id = spn.sales_person_id \
             WHERE so.stock_order_id = $1 \
             ORDER BY spn.phone_number \
             LIMIT 1",
            [self.stock_order_id.into()],
        );
        fetch_one(conn, stmt).await
    }
}
