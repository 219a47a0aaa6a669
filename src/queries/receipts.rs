//! Statements behind receipt processing.

use super::{fetch_one, Query};
use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use serde::Serialize;

#[derive(Debug, FromQueryResult)]
struct InsertedReceipt {
    receipt_id: i32,
}

/// Insert one receipt row with all ten fields verbatim.
#[derive(Debug)]
pub struct InsertReceipt<'a> {
    pub num_items: i32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub transaction_time: NaiveDateTime,
    pub payment_type: &'a str,
    pub register_number: Option<i32>,
    pub employee_id: i32,
    pub customer_id: Option<i32>,
    pub discount_id: Option<i32>,
}

#[async_trait]
impl Query for InsertReceipt<'_> {
    type Output = i32;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "INSERT INTO receipts \
                 (num_items, subtotal, tax, total, transaction_time, payment_type, \
                  register_number, employee_id, customer_id, discount_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING receipt_id AS receipt_id",
            [
                self.num_items.into(),
                self.subtotal.into(),
                self.tax.into(),
                self.total.into(),
                self.transaction_time.into(),
                self.payment_type.into(),
                self.register_number.into(),
                self.employee_id.into(),
                self.customer_id.into(),
                self.discount_id.into(),
            ],
        );
        let inserted: Option<InsertedReceipt> = fetch_one(conn, stmt).await?;
        inserted
            .map(|row| row.receipt_id)
            .ok_or_else(|| ServiceError::Internal("receipt insert returned no id".into()))
    }
}

/// The freshly inserted receipt, re-read in full.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct ReceiptRow {
    #[serde(rename = "ReceiptID")]
    pub receipt_id: i32,
    #[serde(rename = "NumItems")]
    pub num_items: i32,
    #[serde(rename = "SubTotal")]
    pub subtotal: Decimal,
    #[serde(rename = "Tax")]
    pub tax: Decimal,
    #[serde(rename = "Total")]
    pub total: Decimal,
    #[serde(rename = "TransactionTime")]
    pub transaction_time: NaiveDateTime,
    #[serde(rename = "PaymentType")]
    pub payment_type: String,
    #[serde(rename = "RegisterNumber")]
    pub register_number: Option<i32>,
    #[serde(rename = "EmployeeID")]
    pub employee_id: i32,
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<i32>,
    #[serde(rename = "DiscountID")]
    pub discount_id: Option<i32>,
}

#[derive(Debug)]
pub struct FindReceipt {
    pub receipt_id: i32,
}

#[async_trait]
impl Query for FindReceipt {
    type Output = Option<ReceiptRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT receipt_id AS receipt_id, num_items AS num_items, subtotal AS subtotal, \
                    tax AS tax, total AS total, transaction_time AS transaction_time, \
                    payment_type AS payment_type, register_number AS register_number, \
                    employee_id AS employee_id, customer_id AS customer_id, \
                    discount_id AS discount_id \
             FROM receipts WHERE receipt_id = $1",
            [self.receipt_id.into()],
        );
        fetch_one(conn, stmt).await
    }
}
