//! Statements behind review submission, statistics, and the daily trend.

use super::{fetch_all, sql_now, Query};
use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use serde::Serialize;

/// Insert a review with a server-side timestamp.
#[derive(Debug)]
pub struct InsertReview<'a> {
    pub review_text: &'a str,
    pub num_stars: i32,
    pub customer_id: i32,
}

#[async_trait]
impl Query for InsertReview<'_> {
    type Output = ();

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let backend = conn.get_database_backend();
        let sql = format!(
            "INSERT INTO reviews (review_text, num_stars, review_time, customer_id) \
             VALUES ($1, $2, {now}, $3)",
            now = sql_now(backend),
        );
        let stmt = Statement::from_sql_and_values(
            backend,
            sql,
            [
                self.review_text.into(),
                self.num_stars.into(),
                self.customer_id.into(),
            ],
        );
        conn.execute(stmt).await.map_err(ServiceError::db_error)?;
        Ok(())
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct ReviewRow {
    #[serde(rename = "ReviewText")]
    pub review_text: String,
    #[serde(rename = "NumStars")]
    pub num_stars: i32,
    #[serde(rename = "DateTime")]
    pub review_time: NaiveDateTime,
    #[serde(rename = "CustomerName")]
    pub customer_name: String,
}

/// All reviews joined with customer first name.
#[derive(Debug)]
pub struct AllReviewsQuery;

#[async_trait]
impl Query for AllReviewsQuery {
    type Output = Vec<ReviewRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT r.review_text AS review_text, r.num_stars AS num_stars, \
                    r.review_time AS review_time, c.first_name AS customer_name \
             FROM reviews r \
             JOIN customers c ON r.customer_id = c.customer_id",
        );
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct AverageStarsRow {
    #[serde(rename = "AvgStarsByCustomer")]
    pub avg_stars_by_customer: Option<f64>,
}

/// Overall average star rating across all reviews.
#[derive(Debug)]
pub struct AverageStarsQuery;

#[async_trait]
impl Query for AverageStarsQuery {
    type Output = Vec<AverageStarsRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let backend = conn.get_database_backend();
        let sql = match backend {
            DbBackend::Postgres => {
                "SELECT CAST(AVG(num_stars) AS DOUBLE PRECISION) AS avg_stars_by_customer \
                 FROM reviews"
            }
            _ => "SELECT AVG(num_stars) AS avg_stars_by_customer FROM reviews",
        };
        let stmt = Statement::from_string(backend, sql);
        fetch_all(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult, Serialize)]
pub struct ReviewTrendRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: i32,
    #[serde(rename = "Day")]
    pub day: i32,
    #[serde(rename = "AvgDailyStars")]
    pub avg_daily_stars: Option<f64>,
}

/// Average daily rating grouped by calendar day, for reviews at or after
/// the supplied start timestamp, chronological ascending.
#[derive(Debug)]
pub struct ReviewTrendQuery {
    pub start: NaiveDateTime,
}

#[async_trait]
impl Query for ReviewTrendQuery {
    type Output = Vec<ReviewTrendRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let backend = conn.get_database_backend();
        let sql = match backend {
            DbBackend::Sqlite => {
                "SELECT CAST(strftime('%Y', review_time) AS INTEGER) AS year, \
                        CAST(strftime('%m', review_time) AS INTEGER) AS month, \
                        CAST(strftime('%d', review_time) AS INTEGER) AS day, \
                        AVG(num_stars) AS avg_daily_stars \
                 FROM reviews \
                 WHERE review_time >= $1 \
                 GROUP BY year, month, day \
                 ORDER BY year, month, day"
            }
            _ => {
                "SELECT CAST(EXTRACT(YEAR FROM review_time) AS INTEGER) AS year, \
                        CAST(EXTRACT(MONTH FROM review_time) AS INTEGER) AS month, \
                        CAST(EXTRACT(DAY FROM review_time) AS INTEGER) AS day, \
                        CAST(AVG(num_stars) AS DOUBLE PRECISION) AS avg_daily_stars \
                 FROM reviews \
                 WHERE review_time >= $1 \
                 GROUP BY 1, 2, 3 \
                 ORDER BY 1, 2, 3"
            }
        };
        let stmt = Statement::from_sql_and_values(backend, sql, [self.start.into()]);
        fetch_all(conn, stmt).await
    }
}
