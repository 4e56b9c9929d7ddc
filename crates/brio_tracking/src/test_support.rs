// In-memory repository and fixtures shared by the unit tests.

use brio_common::models::{Branch, Customer, MovementEvent, ShipmentRecord};
use brio_db::{DbError, ShipmentRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ORIGIN: i64 = 1;
pub const DESTINATION: i64 = 2;

pub fn shipment_123() -> ShipmentRecord {
    ShipmentRecord {
        id: 123,
        status: Some("En viaje".to_string()),
        origin_customer_id: Some(10),
        destination_customer_id: Some(20),
        origin_branch_id: Some(ORIGIN),
        destination_branch_id: Some(DESTINATION),
        issuing_branch_id: Some(ORIGIN),
        received_date: Some("2025-03-01".to_string()),
        received_time: Some("08:05".to_string()),
        origin_branch_name: Some("Córdoba".to_string()),
        destination_branch_name: Some("Rosario".to_string()),
        issuing_branch_name: Some("Córdoba".to_string()),
        ..Default::default()
    }
}

pub fn movement(branch: i64, op: &str, when: &str) -> MovementEvent {
    MovementEvent {
        updated_at: Some(when.to_string()),
        shipment_id: 123,
        destination_branch_id: Some(DESTINATION),
        current_branch_id: Some(branch),
        operation: Some(op.to_string()),
        ..Default::default()
    }
}

#[derive(Debug, Default)]
pub struct Calls {
    pub shipment: AtomicUsize,
    pub movements: AtomicUsize,
    pub customers: AtomicUsize,
    pub branches: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.shipment.load(Ordering::SeqCst)
            + self.movements.load(Ordering::SeqCst)
            + self.customers.load(Ordering::SeqCst)
            + self.branches.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct FakeRepository {
    pub shipments: HashMap<i64, ShipmentRecord>,
    pub movements: HashMap<i64, Vec<MovementEvent>>,
    pub customers: HashMap<i64, Customer>,
    pub branches: HashMap<i64, Branch>,
    pub calls: Arc<Calls>,
    pub requested_branch_ids: Arc<Mutex<Vec<Vec<i64>>>>,
    pub fail: bool,
}

impl FakeRepository {
    pub fn with_shipment_123(movements: Vec<MovementEvent>) -> Self {
        let mut repo = Self::default();
        repo.shipments.insert(123, shipment_123());
        repo.movements.insert(123, movements);
        repo.customers.insert(
            10,
            Customer {
                id: 10,
                name: Some("ACME SA".to_string()),
            },
        );
        repo.branches.insert(
            ORIGIN,
            Branch {
                id: ORIGIN,
                name: Some("Córdoba".to_string()),
                address: Some("Av. Colón 100".to_string()),
            },
        );
        repo.branches.insert(
            DESTINATION,
            Branch {
                id: DESTINATION,
                name: Some("Rosario".to_string()),
                address: None,
            },
        );
        repo
    }

    fn check(&self) -> Result<(), DbError> {
        if self.fail {
            Err(DbError::QueryError("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ShipmentRepository for FakeRepository {
    async fn fetch_shipment(&self, shipment_id: i64) -> Result<Option<ShipmentRecord>, DbError> {
        self.calls.shipment.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.shipments.get(&shipment_id).cloned())
    }

    async fn fetch_movements(&self, shipment_id: i64) -> Result<Vec<MovementEvent>, DbError> {
        self.calls.movements.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.movements.get(&shipment_id).cloned().unwrap_or_default())
    }

    async fn fetch_customers_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Customer>, DbError> {
        self.calls.customers.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.customers.get(id).map(|c| (*id, c.clone())))
            .collect())
    }

    async fn fetch_branches_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Branch>, DbError> {
        self.calls.branches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested_branch_ids.lock() {
            requested.push(ids.to_vec());
        }
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.branches.get(id).map(|b| (*id, b.clone())))
            .collect())
    }
}
