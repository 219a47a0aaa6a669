//! The delivery-order tracking view.

use super::{fetch_all, Query};
use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use serde::Serialize;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct DeliveryOrderRow {
    #[serde(rename = "DeliveryOrderID")]
    pub delivery_order_id: i32,
    #[serde(rename = "TotalPrice")]
    pub total_price: Decimal,
    #[serde(rename = "PaymentType")]
    pub payment_type: String,
    #[serde(rename = "BuildingNumber")]
    pub building_number: String,
    #[serde(rename = "Street")]
    pub street: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "ExpectedDeliveryTime")]
    pub expected_delivery_time: NaiveDateTime,
}

/// Delivery orders joined with their receipt and destination address.
#[derive(Debug)]
pub struct ListDeliveryOrders;

#[async_trait]
impl Query for ListDeliveryOrders {
    type Output = Vec<DeliveryOrderRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT d.delivery_order_id AS delivery_order_id, r.total AS total_price, \
                    r.payment_type AS payment_type, a.building_number AS building_number, \
                    a.street AS street, a.city AS city, a.state AS state, \
                    a.zip_code AS zip_code, \
                    d.expected_delivery_time AS expected_delivery_time \
             FROM delivery_orders d \
             JOIN receipts r ON d.receipt_id = r.receipt_id \
             JOIN addresses a ON d.address_id = a.address_id",
        );
        fetch_all(conn, stmt).await
    }
}
