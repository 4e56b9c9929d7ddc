//! Repository modules for ERP access
//!
//! This module contains the repository trait for shipments and its SQL
//! implementation.

pub mod shipment;
pub mod shipment_sql;

// Re-export the shipment repository for ease of use
pub use shipment::{Branch, Customer, MovementEvent, ShipmentRecord, ShipmentRepository};
pub use shipment_sql::SqlShipmentRepository;
