//! Statements behind employee registration and the shift listing.

use super::{fetch_all, fetch_one, Query};
use crate::errors::ServiceError;
use crate::roles::RoleKind;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};
use serde::Serialize;

#[derive(Debug, FromQueryResult)]
pub struct RoleRow {
    pub role_id: i32,
    pub role_name: String,
    pub max_salary: Decimal,
}

/// Look up a role by its exact name.
#[derive(Debug)]
pub struct FindRoleByName<'a> {
    pub role_name: &'a str,
}

#[async_trait]
impl Query for FindRoleByName<'_> {
    type Output = Option<RoleRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT role_id AS role_id, role_name AS role_name, max_salary AS max_salary \
             FROM roles WHERE role_name = $1",
            [self.role_name.into()],
        );
        fetch_one(conn, stmt).await
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedEmployee {
    employee_id: i32,
}

/// Insert the employee row; yields the generated employee id.
#[derive(Debug)]
pub struct InsertEmployee<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub shift_timing: &'a str,
    pub role_id: i32,
}

#[async_trait]
impl Query for InsertEmployee<'_> {
    type Output = i32;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "INSERT INTO employees (first_name, last_name, shift_timing, role_id) \
             VALUES ($1, $2, $3, $4) RETURNING employee_id AS employee_id",
            [
                self.first_name.into(),
                self.last_name.into(),
                self.shift_timing.into(),
                self.role_id.into(),
            ],
        );
        let inserted: Option<InsertedEmployee> = fetch_one(conn, stmt).await?;
        inserted
            .map(|row| row.employee_id)
            .ok_or_else(|| ServiceError::Internal("employee insert returned no id".into()))
    }
}

/// Insert the role-specific attribute row. Table and column come from the
/// closed [`RoleKind`] enumeration, never from request data.
#[derive(Debug)]
pub struct InsertRoleAssignment<'a> {
    pub employee_id: i32,
    pub role: RoleKind,
    pub value: Option<&'a str>,
}

#[async_trait]
impl Query for InsertRoleAssignment<'_> {
    type Output = ();

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let sql = format!(
            "INSERT INTO {} (employee_id, {}) VALUES ($1, $2)",
            self.role.table(),
            self.role.assignment_column(),
        );
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            sql,
            [self.employee_id.into(), self.value.into()],
        );
        conn.execute(stmt).await.map_err(ServiceError::db_error)?;
        Ok(())
    }
}

/// Insert the computed salary row.
#[derive(Debug)]
pub struct InsertEmployeeSalary {
    pub employee_id: i32,
    pub salary: Decimal,
}

#[async_trait]
impl Query for InsertEmployeeSalary {
    type Output = ();

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "INSERT INTO employee_salaries (employee_id, salary) VALUES ($1, $2)",
            [self.employee_id.into(), self.salary.into()],
        );
        conn.execute(stmt).await.map_err(ServiceError::db_error)?;
        Ok(())
    }
}

/// Joined employee/role/salary record returned by the registration scenario.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct EmployeeRecordRow {
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
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Salary")]
    pub salary: Decimal,
}

#[derive(Debug)]
pub struct LoadEmployeeRecord {
    pub employee_id: i32,
}

#[async_trait]
impl Query for LoadEmployeeRecord {
    type Output = Option<EmployeeRecordRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT e.employee_id AS employee_id, e.first_name AS first_name, \
                    e.last_name AS last_name, e.shift_timing AS shift_timing, \
                    r.role_name AS role_name, r.description AS description, \
                    es.salary AS salary \
             FROM employees e \
             JOIN roles r ON e.role_id = r.role_id \
             JOIN employee_salaries es ON e.employee_id = es.employee_id \
             WHERE e.employee_id = $1 \
             LIMIT 1",
            [self.employee_id.into()],
        );
        fetch_one(conn, stmt).await
    }
}

/// Shift listing row: all employees, unfiltered.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct EmployeeShiftRow {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "ShiftTiming")]
    pub shift_timing: String,
}

#[derive(Debug)]
pub struct ListEmployeeShifts;

#[async_trait]
impl Query for ListEmployeeShifts {
    type Output = Vec<EmployeeShiftRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT employee_id AS employee_id, first_name AS first_name, \
                    last_name AS last_name, shift_timing AS shift_timing \
             FROM employees",
        );
        fetch_all(conn, stmt).await
    }
}

/// Employee/aisle rows for the stocker assignment board. The aisle stays
/// optional here; the handler substitutes the training placeholder.
#[derive(Debug, FromQueryResult)]
pub struct StockerAssignmentRow {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub assigned_aisle: Option<String>,
}

#[derive(Debug)]
pub struct ListStockerAssignments;

#[async_trait]
impl Query for ListStockerAssignments {
    type Output = Vec<StockerAssignmentRow>;

    async fn execute<C>(&self, conn: &C) -> Result<Self::Output, ServiceError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let stmt = Statement::from_string(
            conn.get_database_backend(),
            "SELECT e.employee_id AS employee_id, e.first_name AS first_name, \
                    e.last_name AS last_name, s.assigned_aisle AS assigned_aisle \
             FROM employees e \
             JOIN stockers s ON e.employee_id = s.employee_id",
        );
        fetch_all(conn, stmt).await
    }
}
