//! Repository for shipments and their movement history
//!
//! The ERP owns this data; the repository only reads it.

use crate::error::DbError;
use std::collections::HashMap;

pub use brio_common::models::{Branch, Customer, MovementEvent, ShipmentRecord};

/// Read access to shipments, movements and the customer/branch lookup tables
pub trait ShipmentRepository {
    /// Find a shipment by id, with its branch names joined in
    fn fetch_shipment(
        &self,
        shipment_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ShipmentRecord>, DbError>> + Send;

    /// All movements of a shipment, newest first
    fn fetch_movements(
        &self,
        shipment_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<MovementEvent>, DbError>> + Send;

    /// Customers for the given ids in one query, keyed by id
    ///
    /// An empty id list returns an empty map without touching the database.
    fn fetch_customers_by_ids(
        &self,
        ids: &[i64],
    ) -> impl std::future::Future<Output = Result<HashMap<i64, Customer>, DbError>> + Send;

    /// Branches for the given ids in one query, keyed by id
    fn fetch_branches_by_ids(
        &self,
        ids: &[i64],
    ) -> impl std::future::Future<Output = Result<HashMap<i64, Branch>, DbError>> + Send;
}
