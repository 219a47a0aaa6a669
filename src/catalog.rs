//! Scenario catalog driving the browser shell's dynamic form.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub route: &'static str,
    pub method: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub typical: &'static [CatalogEntry],
    pub analytical: &'static [CatalogEntry],
}

pub const TYPICAL: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Register employee",
        route: "/typical/employees/register",
        method: "POST",
        fields: &[
            "firstName",
            "lastName",
            "shiftTiming",
            "roleName",
            "roleAssignments",
        ],
    },
    CatalogEntry {
        name: "Process receipt",
        route: "/typical/receipts/process",
        method: "POST",
        fields: &[
            "numItems",
            "subtotal",
            "tax",
            "total",
            "transactionTime",
            "paymentType",
            "registerNumber",
            "employeeID",
            "customerID",
            "discountID",
        ],
    },
    CatalogEntry {
        name: "Check stock levels",
        route: "/typical/stock-order/check",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Create stock order",
        route: "/typical/stock-order/create",
        method: "POST",
        fields: &[
            "invoicePDF",
            "subtotal",
            "tax",
            "total",
            "paymentType",
            "employeeID",
            "supplierID",
        ],
    },
    CatalogEntry {
        name: "Submit review",
        route: "/typical/reviews/submit",
        method: "POST",
        fields: &["reviewText", "numStars", "customerID"],
    },
    CatalogEntry {
        name: "Review statistics",
        route: "/typical/reviews/statistics",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Stocker assignments",
        route: "/typical/stockers/assignments",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Employee shifts",
        route: "/typical/employees/shift",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Delivery orders",
        route: "/typical/delivery/orders",
        method: "GET",
        fields: &[],
    },
];

pub const ANALYTICAL: &[CatalogEntry] = &[
    CatalogEntry {
        name: "High-value customers",
        route: "/analytical/customers/high-value",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Fastest cashiers",
        route: "/analytical/cashiers/fastest",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Review trend",
        route: "/analytical/reviews/trend",
        method: "POST",
        fields: &["startDateTime"],
    },
    CatalogEntry {
        name: "Certified morning warehouse workers",
        route: "/analytical/warehouse-workers/certified",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Customer spending behavior",
        route: "/analytical/customers/spending-behavior",
        method: "GET",
        fields: &[],
    },
    CatalogEntry {
        name: "Low inventory products",
        route: "/analytical/products/low-inventory",
        method: "GET",
        fields: &[],
    },
];

/// `GET /catalog`
pub async fn catalog() -> Json<Catalog> {
    Json(Catalog {
        typical: TYPICAL,
        analytical: ANALYTICAL,
    })
}
