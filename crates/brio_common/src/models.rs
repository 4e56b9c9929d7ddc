// --- File: crates/brio_common/src/models.rs ---

// Records read from the logistics ERP. They are snapshots taken per request;
// nothing here is cached or written back.

use serde::{Deserialize, Serialize};

/// A shipment ("envío") as stored in the ERP, with branch names joined in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentRecord {
    pub id: i64,
    /// Raw ERP status code
    pub status: Option<String>,
    pub origin_customer_id: Option<i64>,
    pub destination_customer_id: Option<i64>,
    pub origin_branch_id: Option<i64>,
    pub destination_branch_id: Option<i64>,
    pub origin_locality: Option<String>,
    pub destination_locality: Option<String>,
    pub destination_address: Option<String>,
    pub destination_postal_code: Option<String>,
    pub issuing_branch_id: Option<i64>,
    /// Reception date, `YYYY-MM-DD`
    pub received_date: Option<String>,
    /// Reception time, `HH:MM`
    pub received_time: Option<String>,
    pub parcels: Option<i64>,
    pub origin_branch_name: Option<String>,
    pub destination_branch_name: Option<String>,
    pub issuing_branch_name: Option<String>,
}

/// One logged movement of a shipment between branches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MovementEvent {
    /// `YYYY-MM-DD HH:MM`
    pub updated_at: Option<String>,
    pub shipment_id: i64,
    pub destination_branch_id: Option<i64>,
    pub current_branch_id: Option<i64>,
    pub current_branch_name: Option<String>,
    pub destination_branch_name: Option<String>,
    /// Single letter: `C` classify, `V` travel, `D` arrive
    pub operation: Option<String>,
    pub status: Option<String>,
}

impl MovementEvent {
    /// The operation code trimmed and upper-cased, `None` when blank.
    pub fn operation_code(&self) -> Option<String> {
        self.operation
            .as_deref()
            .map(|op| op.trim().to_uppercase())
            .filter(|op| !op.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Customer {
    pub id: i64,
    pub name: Option<String>,
}

/// A logistics facility ("sucursal").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Branch {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_code_is_normalized() {
        let movement = MovementEvent {
            operation: Some(" v ".to_string()),
            ..Default::default()
        };
        assert_eq!(movement.operation_code().as_deref(), Some("V"));

        let blank = MovementEvent {
            operation: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.operation_code(), None);
    }
}
