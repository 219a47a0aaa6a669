use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use grocery_store_api::{api_routes, config::AppConfig, db, AppState};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness spinning up the real router over a fresh SQLite database
/// carrying the external grocery schema.
pub struct TestApp {
    router: Router,
    pub db: Arc<DatabaseConnection>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("grocery_test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let cfg = AppConfig::new(url, "127.0.0.1".to_string(), 0, "test".to_string());
        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        create_schema(&pool).await;
        seed_base_rows(&pool).await;

        let db = Arc::new(pool);
        let state = AppState {
            db: db.clone(),
            config: cfg,
        };
        let router = api_routes().with_state(state);

        Self {
            router,
            db,
            _dir: dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(json.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self.request(Method::GET, path, None).await;
        Self::into_json(response).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self.request(Method::POST, path, Some(body)).await;
        Self::into_json(response).await
    }

    async fn into_json(response: Response<Body>) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        (status, json)
    }

    /// Run a raw statement against the test database (seeding, assertions).
    pub async fn execute_sql(&self, sql: &str) {
        self.db
            .execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .await
            .unwrap_or_else(|e| panic!("statement failed: {sql}: {e}"));
    }

    /// Number of rows in a table; used to verify scenario side effects.
    pub async fn count(&self, table: &str) -> i64 {
        let row = self
            .db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await
            .expect("count query failed")
            .expect("count query returned no row");
        row.try_get::<i64>("", "n").expect("count column missing")
    }
}

async fn create_schema(pool: &DatabaseConnection) {
    let ddl = [
        "CREATE TABLE roles (
            role_id INTEGER PRIMARY KEY AUTOINCREMENT,
            role_name TEXT NOT NULL,
            max_salary REAL NOT NULL,
            description TEXT
        );",
        "CREATE TABLE employees (
            employee_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            shift_timing TEXT NOT NULL,
            role_id INTEGER NOT NULL REFERENCES roles(role_id)
        );",
        "CREATE TABLE employee_salaries (
            employee_id INTEGER NOT NULL REFERENCES employees(employee_id),
            salary REAL NOT NULL
        );",
        "CREATE TABLE managers (employee_id INTEGER NOT NULL, department TEXT);",
        "CREATE TABLE cashiers (employee_id INTEGER NOT NULL, assigned_register TEXT);",
        "CREATE TABLE drivers (employee_id INTEGER NOT NULL, vehicle_type TEXT);",
        "CREATE TABLE warehouse_workers (employee_id INTEGER NOT NULL, equipment_certification TEXT);",
        "CREATE TABLE stockers (employee_id INTEGER NOT NULL, assigned_aisle TEXT);",
        "CREATE TABLE janitors (employee_id INTEGER NOT NULL, store_section TEXT);",
        "CREATE TABLE customers (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            member_status INTEGER
        );",
        "CREATE TABLE receipts (
            receipt_id INTEGER PRIMARY KEY AUTOINCREMENT,
            num_items INTEGER NOT NULL,
            subtotal REAL NOT NULL,
            tax REAL NOT NULL,
            total REAL NOT NULL,
            transaction_time TEXT NOT NULL,
            payment_type TEXT NOT NULL,
            register_number INTEGER,
            employee_id INTEGER NOT NULL,
            customer_id INTEGER,
            discount_id INTEGER
        );",
        "CREATE TABLE categories (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
        "CREATE TABLE products (
            product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES categories(category_id)
        );",
        "CREATE TABLE inventory (
            product_id INTEGER NOT NULL REFERENCES products(product_id),
            quantity INTEGER NOT NULL,
            last_restock_date TEXT
        );",
        "CREATE TABLE suppliers (
            supplier_id INTEGER PRIMARY KEY AUTOINCREMENT,
            company TEXT NOT NULL
        );",
        "CREATE TABLE sales_people (
            sales_person_id INTEGER PRIMARY KEY AUTOINCREMENT,
            supplier_id INTEGER NOT NULL REFERENCES suppliers(supplier_id),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        );",
        "CREATE TABLE sales_phone_numbers (
            sales_person_id INTEGER NOT NULL REFERENCES sales_people(sales_person_id),
            phone_number TEXT NOT NULL
        );",
        "CREATE TABLE stock_orders (
            stock_order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_date TEXT NOT NULL,
            expected_delivery_date TEXT NOT NULL,
            invoice TEXT,
            subtotal REAL,
            tax REAL,
            total REAL,
            payment_type TEXT,
            employee_id INTEGER,
            supplier_id INTEGER,
            delivery_status INTEGER
        );",
        "CREATE TABLE reviews (
            review_id INTEGER PRIMARY KEY AUTOINCREMENT,
            review_text TEXT NOT NULL,
            num_stars INTEGER NOT NULL,
            review_time TEXT NOT NULL,
            customer_id INTEGER NOT NULL
        );",
        "CREATE TABLE addresses (
            address_id INTEGER PRIMARY KEY AUTOINCREMENT,
            building_number TEXT NOT NULL,
            street TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip_code TEXT NOT NULL
        );",
        "CREATE TABLE delivery_orders (
            delivery_order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            receipt_id INTEGER NOT NULL REFERENCES receipts(receipt_id),
            address_id INTEGER NOT NULL REFERENCES addresses(address_id),
            expected_delivery_time TEXT NOT NULL
        );",
    ];

    for sql in ddl {
        pool.execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .await
            .unwrap_or_else(|e| panic!("schema creation failed: {e}"));
    }
}

/// Rows every test relies on: the role table and a few customers.
async fn seed_base_rows(pool: &DatabaseConnection) {
    let seeds = [
        "INSERT INTO roles (role_name, max_salary, description) VALUES
            ('Manager', 90000, 'Runs a department'),
            ('Cashier', 40000, 'Rings up customers'),
            ('Driver', 50000, 'Delivers orders'),
            ('Warehouse Worker', 55000, 'Moves stock'),
            ('Stocker', 35000, 'Restocks aisles'),
            ('Janitor', 30000, 'Keeps the store clean');",
        "INSERT INTO customers (first_name, last_name, member_status) VALUES
            ('Alice', 'Nguyen', 1),
            ('Bob', 'Ortiz', 0),
            ('Cara', 'Smith', 1);",
    ];

    for sql in seeds {
        pool.execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .await
            .unwrap_or_else(|e| panic!("seeding failed: {e}"));
    }
}
