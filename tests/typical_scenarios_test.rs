mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

fn as_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap(),
        Value::String(s) => s.parse().unwrap(),
        other => panic!("expected a numeric value, got {other}"),
    }
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = TestApp::new().await;

    let (status, body) = app.get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello, world! Server is running.");

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn catalog_lists_both_route_groups() {
    let app = TestApp::new().await;

    let (status, body) = app.get_json("/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["typical"].as_array().unwrap().len(), 9);
    assert_eq!(body["analytical"].as_array().unwrap().len(), 6);
    assert_eq!(body["typical"][0]["route"], "/typical/employees/register");
    assert_eq!(
        body["typical"][0]["fields"],
        json!(["firstName", "lastName", "shiftTiming", "roleName", "roleAssignments"])
    );
}

#[tokio::test]
async fn register_employee_derives_salary_from_role_ceiling() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/typical/employees/register",
            json!({
                "firstName": "Dana",
                "lastName": "Lopez",
                "shiftTiming": "Morning",
                "roleName": "Cashier",
                "roleAssignments": { "AssignedRegister": "7" }
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let info = body["employeeInformation"].as_array().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0]["FirstName"], "Dana");
    assert_eq!(info[0]["RoleName"], "Cashier");
    // Cashier ceiling is 40000; salary is ceiling minus 10000.
    assert_eq!(as_number(&info[0]["Salary"]), 30_000.0);

    // The role-specific attribute row landed in the cashiers table.
    assert_eq!(app.count("cashiers").await, 1);
    assert_eq!(app.count("employee_salaries").await, 1);
}

#[tokio::test]
async fn register_employee_with_unknown_role_creates_nothing() {
    let app = TestApp::new().await;

    let (_, before) = app.get_json("/typical/employees/shift").await;
    let before_len = before["employeeShifts"].as_array().unwrap().len();

    let (status, body) = app
        .post_json(
            "/typical/employees/register",
            json!({
                "firstName": "Zed",
                "lastName": "Null",
                "shiftTiming": "Evening",
                "roleName": "Astronaut"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role name");

    let (_, after) = app.get_json("/typical/employees/shift").await;
    assert_eq!(
        after["employeeShifts"].as_array().unwrap().len(),
        before_len
    );
    assert_eq!(app.count("employees").await, 0);
}

#[tokio::test]
async fn failed_role_insert_rolls_back_registration() {
    let app = TestApp::new().await;
    // Without the cashiers table the role-specific insert fails after the
    // employee row is written; the rollback must take all three inserts.
    app.execute_sql("DROP TABLE cashiers;").await;

    let (status, body) = app
        .post_json(
            "/typical/employees/register",
            json!({
                "firstName": "Dana",
                "lastName": "Lopez",
                "shiftTiming": "Morning",
                "roleName": "Cashier"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error registering employee");
    assert_eq!(app.count("employees").await, 0);
    assert_eq!(app.count("employee_salaries").await, 0);
}

#[tokio::test]
async fn register_manager_gets_manager_salary() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/typical/employees/register",
            json!({
                "firstName": "Mia",
                "lastName": "Chen",
                "shiftTiming": "Morning",
                "roleName": "Manager",
                "roleAssignments": { "Department": "Produce" }
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let info = &body["employeeInformation"][0];
    assert_eq!(as_number(&info["Salary"]), 80_000.0);
    assert_eq!(app.count("managers").await, 1);
}

#[tokio::test]
async fn process_receipt_returns_the_inserted_row() {
    let app = TestApp::new().await;
    app.execute_sql(
        "INSERT INTO employees (first_name, last_name, shift_timing, role_id)
         VALUES ('Cal', 'Reed', 'Morning', 2);",
    )
    .await;

    let (status, body) = app
        .post_json(
            "/typical/receipts/process",
            json!({
                "numItems": 4,
                "subtotal": 12.50,
                "tax": 1.00,
                "total": 13.50,
                "transactionTime": "2025-03-01 09:15:00",
                "paymentType": "card",
                "registerNumber": 2,
                "employeeID": 1,
                "customerID": 1,
                "discountID": null
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let receipt = body["receipt"].as_array().unwrap();
    assert_eq!(receipt.len(), 1);
    assert_eq!(receipt[0]["NumItems"], 4);
    assert_eq!(as_number(&receipt[0]["Total"]), 13.5);
    assert_eq!(receipt[0]["PaymentType"], "card");
    assert!(receipt[0]["DiscountID"].is_null());
    assert_eq!(app.count("receipts").await, 1);
}

async fn seed_inventory(app: &TestApp) {
    app.execute_sql("INSERT INTO categories (name) VALUES ('Dairy'), ('Bakery');")
        .await;
    app.execute_sql(
        "INSERT INTO products (name, category_id) VALUES
            ('Milk', 1), ('Yogurt', 1), ('Bread', 2), ('Bagels', 2);",
    )
    .await;
    // Two products tie at quantity 5; Bread is comfortably stocked.
    app.execute_sql(
        "INSERT INTO inventory (product_id, quantity, last_restock_date) VALUES
            (1, 5, '2025-02-01'),
            (2, 5, '2025-02-10'),
            (3, 25, '2025-02-03'),
            (4, 12, '2025-01-20');",
    )
    .await;
}

#[tokio::test]
async fn stock_check_orders_low_stock_by_urgency() {
    let app = TestApp::new().await;
    seed_inventory(&app).await;

    let (status, body) = app.get_json("/typical/stock-order/check").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["stockLevels"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    // Quantities are non-decreasing; the quantity-5 tie breaks by most
    // recent restock first.
    let quantities: Vec<i64> = rows
        .iter()
        .map(|r| r["Quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![5, 5, 12]);
    assert!(quantities.iter().all(|q| *q <= 20));
    assert_eq!(rows[0]["Name"], "Yogurt");
    assert_eq!(rows[1]["Name"], "Milk");
    assert_eq!(rows[0]["CategoryName"], "Dairy");
}

async fn seed_supplier_with_salesperson(app: &TestApp) {
    app.execute_sql("INSERT INTO suppliers (company) VALUES ('Fresh Farms'), ('Baker Bros');")
        .await;
    app.execute_sql(
        "INSERT INTO sales_people (supplier_id, first_name, last_name) VALUES
            (1, 'Sam', 'Field'), (2, 'Rita', 'Crumb');",
    )
    .await;
    app.execute_sql(
        "INSERT INTO sales_phone_numbers (sales_person_id, phone_number) VALUES
            (1, '555-0100'), (2, '555-0200'), (2, '555-0150');",
    )
    .await;
}

#[tokio::test]
async fn create_stock_order_reports_undelivered_status() {
    let app = TestApp::new().await;
    seed_supplier_with_salesperson(&app).await;
    app.execute_sql(
        "INSERT INTO employees (first_name, last_name, shift_timing, role_id)
         VALUES ('Mia', 'Chen', 'Morning', 1);",
    )
    .await;

    let (status, body) = app
        .post_json(
            "/typical/stock-order/create",
            json!({
                "invoicePDF": "invoice-0042.pdf",
                "subtotal": 140.00,
                "tax": 10.00,
                "total": 150.00,
                "paymentType": "invoice",
                "employeeID": 1,
                "supplierID": 2
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let rows = body["stockOrderStatus"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["SupplierCompany"], "Baker Bros");
    assert_eq!(rows[0]["DeliveryStatus"], "Not Delivered");
    // The lowest phone number wins the tie for the contact row.
    assert_eq!(rows[0]["SalesPhoneNumber"], "555-0150");
    assert_eq!(as_number(&rows[0]["Total"]), 150.0);
    assert_eq!(app.count("stock_orders").await, 1);
}

#[tokio::test]
async fn submit_review_requires_all_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/typical/reviews/submit",
            json!({ "reviewText": "Great store!", "numStars": 5 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Missing required fields: reviewText, numStars, customerID"
    );
    assert_eq!(app.count("reviews").await, 0);
}

#[tokio::test]
async fn review_fields_use_trailing_capital_id_spelling() {
    let app = TestApp::new().await;

    // `customerId` is not the wire name; the body counts as missing the field.
    let (status, _) = app
        .post_json(
            "/typical/reviews/submit",
            json!({ "reviewText": "ok", "numStars": 4, "customerId": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/typical/reviews/submit",
            json!({ "reviewText": "ok", "numStars": 4, "customerID": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.count("reviews").await, 1);
}

#[tokio::test]
async fn submitted_review_shows_up_in_statistics() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post_json(
            "/typical/reviews/submit",
            json!({ "reviewText": "Great store!", "numStars": 5, "customerID": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post_json(
            "/typical/reviews/submit",
            json!({ "reviewText": "Long lines.", "numStars": 3, "customerID": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get_json("/typical/reviews/statistics").await;
    assert_eq!(status, StatusCode::OK);

    let reviews = body["allReviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews
        .iter()
        .any(|r| r["ReviewText"] == "Great store!" && r["CustomerName"] == "Cara"));

    let avg = &body["avgNumStars"][0]["AvgStarsByCustomer"];
    assert_eq!(avg.as_f64().unwrap(), 4.0);
}

#[tokio::test]
async fn stocker_without_aisle_gets_training_placeholder() {
    let app = TestApp::new().await;

    app.post_json(
        "/typical/employees/register",
        json!({
            "firstName": "Pat",
            "lastName": "Kim",
            "shiftTiming": "Night",
            "roleName": "Stocker"
        }),
    )
    .await;
    app.post_json(
        "/typical/employees/register",
        json!({
            "firstName": "Lee",
            "lastName": "Woods",
            "shiftTiming": "Morning",
            "roleName": "Stocker",
            "roleAssignments": { "AssignedAisle": "A7" }
        }),
    )
    .await;

    let (status, body) = app.get_json("/typical/stockers/assignments").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["stockerAssignments"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let pat = rows.iter().find(|r| r["FirstName"] == "Pat").unwrap();
    assert_eq!(pat["AssignedAisle"], "New stocker in training.");
    let lee = rows.iter().find(|r| r["FirstName"] == "Lee").unwrap();
    assert_eq!(lee["AssignedAisle"], "A7");
}

#[tokio::test]
async fn employee_shift_listing_is_idempotent() {
    let app = TestApp::new().await;
    app.execute_sql(
        "INSERT INTO employees (first_name, last_name, shift_timing, role_id) VALUES
            ('Ana', 'Diaz', 'Morning', 4),
            ('Joe', 'Park', 'Evening', 2);",
    )
    .await;

    let (status, first) = app.get_json("/typical/employees/shift").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["employeeShifts"].as_array().unwrap().len(), 2);

    let (_, second) = app.get_json("/typical/employees/shift").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn delivery_orders_join_receipt_and_address() {
    let app = TestApp::new().await;
    app.execute_sql(
        "INSERT INTO employees (first_name, last_name, shift_timing, role_id)
         VALUES ('Cal', 'Reed', 'Morning', 2);",
    )
    .await;
    app.execute_sql(
        "INSERT INTO receipts (num_items, subtotal, tax, total, transaction_time,
                               payment_type, register_number, employee_id, customer_id)
         VALUES (3, 20.0, 1.5, 21.5, '2025-03-01 10:00:00', 'cash', 1, 1, 1);",
    )
    .await;
    app.execute_sql(
        "INSERT INTO addresses (building_number, street, city, state, zip_code)
         VALUES ('12B', 'Elm St', 'Springfield', 'IL', '62704');",
    )
    .await;
    app.execute_sql(
        "INSERT INTO delivery_orders (receipt_id, address_id, expected_delivery_time)
         VALUES (1, 1, '2025-03-02 16:00:00');",
    )
    .await;

    let (status, body) = app.get_json("/typical/delivery/orders").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["deliveryOrders"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Street"], "Elm St");
    assert_eq!(rows[0]["PaymentType"], "cash");
    assert_eq!(as_number(&rows[0]["TotalPrice"]), 21.5);

    let (_, again) = app.get_json("/typical/delivery/orders").await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/typical/reviews/submit",
            Some(json!("not an object")),
        )
        .await;

    assert!(response.status().is_client_error());
}
