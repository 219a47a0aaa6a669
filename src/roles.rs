//! Closed enumeration of employee roles.
//!
//! Each role maps to a statically known auxiliary table and assignment
//! column. Replaces string-built table names; a role outside this
//! enumeration is rejected instead of silently skipped.

/// The six employee roles with a role-specific attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Manager,
    Cashier,
    Driver,
    WarehouseWorker,
    Stocker,
    Janitor,
}

impl RoleKind {
    pub const ALL: [RoleKind; 6] = [
        RoleKind::Manager,
        RoleKind::Cashier,
        RoleKind::Driver,
        RoleKind::WarehouseWorker,
        RoleKind::Stocker,
        RoleKind::Janitor,
    ];

    /// Resolve a role by its exact name as stored in the `roles` table.
    pub fn from_role_name(name: &str) -> Option<RoleKind> {
        match name {
            "Manager" => Some(RoleKind::Manager),
            "Cashier" => Some(RoleKind::Cashier),
            "Driver" => Some(RoleKind::Driver),
            "Warehouse Worker" => Some(RoleKind::WarehouseWorker),
            "Stocker" => Some(RoleKind::Stocker),
            "Janitor" => Some(RoleKind::Janitor),
            _ => None,
        }
    }

    /// Auxiliary table holding the role-specific attribute row.
    pub fn table(&self) -> &'static str {
        match self {
            RoleKind::Manager => "managers",
            RoleKind::Cashier => "cashiers",
            RoleKind::Driver => "drivers",
            RoleKind::WarehouseWorker => "warehouse_workers",
            RoleKind::Stocker => "stockers",
            RoleKind::Janitor => "janitors",
        }
    }

    /// Column in [`Self::table`] carrying the assignment value.
    pub fn assignment_column(&self) -> &'static str {
        match self {
            RoleKind::Manager => "department",
            RoleKind::Cashier => "assigned_register",
            RoleKind::Driver => "vehicle_type",
            RoleKind::WarehouseWorker => "equipment_certification",
            RoleKind::Stocker => "assigned_aisle",
            RoleKind::Janitor => "store_section",
        }
    }

    /// Key under which the registration request supplies the assignment
    /// value in `roleAssignments`.
    pub fn assignment_key(&self) -> &'static str {
        match self {
            RoleKind::Manager => "Department",
            RoleKind::Cashier => "AssignedRegister",
            RoleKind::Driver => "VehicleType",
            RoleKind::WarehouseWorker => "EquipmentCertification",
            RoleKind::Stocker => "AssignedAisle",
            RoleKind::Janitor => "StoreSection",
        }
    }
}
