//! Shipment lookup: validation, store access and view assembly
//!
//! The service is generic over the repository so tests can swap the ERP for an
//! in-memory fake.

use brio_common::models::{Branch, Customer, MovementEvent, ShipmentRecord};
use brio_common::BrioError;
use brio_db::ShipmentRepository;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{ProgressStage, TimelineStep};
use crate::progress::build_progress;
use crate::timeline::{build_timeline, current_step};

pub const MSG_NOT_NUMERIC: &str = "El número de envío debe ser numérico.";

pub fn not_found_message(q: &str) -> String {
    format!("No se encontró el envío #{}.", q)
}

/// How a lookup ended. Decides the HTTP status, not part of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupOutcome {
    /// No query given
    #[default]
    Empty,
    /// Query was not a number
    InvalidId,
    NotFound,
    Found,
}

/// Customers referenced by a shipment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentCustomers {
    pub origin: Option<Customer>,
    pub destination: Option<Customer>,
}

/// Branches referenced by a shipment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShipmentBranches {
    pub origin: Option<Branch>,
    pub destination: Option<Branch>,
    pub issuing: Option<Branch>,
}

/// Everything the tracking page needs for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TrackingView {
    /// The query as received, trimmed
    pub q: String,
    pub shipment: Option<ShipmentRecord>,
    pub movements: Vec<MovementEvent>,
    pub timeline: Vec<TimelineStep>,
    pub progress_steps: Vec<ProgressStage>,
    pub current_step: Option<TimelineStep>,
    pub customers: Option<ShipmentCustomers>,
    pub branches: Option<ShipmentBranches>,
    /// User-facing message, empty when the shipment was found
    pub msg: String,
    #[serde(skip)]
    pub outcome: LookupOutcome,
}

/// Unique ids in first-seen order, absent values dropped
pub fn collect_ids(ids: &[Option<i64>]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter()
        .flatten()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Looks up shipments in the ERP and turns them into tracking views
#[derive(Debug)]
pub struct TrackingService<R> {
    repository: Arc<R>,
}

impl<R> Clone for TrackingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ShipmentRepository> TrackingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Looks up the shipment identified by `q`.
    ///
    /// Blank and non-numeric queries never reach the store. A numeric query
    /// that does not fit an id is reported as not found.
    ///
    /// # Errors
    ///
    /// Store failures surface as `BrioError::DatabaseError`.
    pub async fn lookup(&self, q: &str) -> Result<TrackingView, BrioError> {
        let q = q.trim();
        let mut view = TrackingView {
            q: q.to_string(),
            ..Default::default()
        };

        if q.is_empty() {
            return Ok(view);
        }

        if !q.bytes().all(|b| b.is_ascii_digit()) {
            debug!("Rejecting non-numeric shipment query {:?}", q);
            view.msg = MSG_NOT_NUMERIC.to_string();
            view.outcome = LookupOutcome::InvalidId;
            return Ok(view);
        }

        let shipment = match q.parse::<i64>() {
            Ok(id) => self.repository.fetch_shipment(id).await.map_err(|e| {
                error!("Failed to fetch shipment {}: {}", id, e);
                BrioError::from(e)
            })?,
            Err(_) => {
                debug!("Shipment query {} does not fit an id", q);
                None
            }
        };

        let Some(shipment) = shipment else {
            info!("Shipment {} not found", q);
            view.msg = not_found_message(q);
            view.outcome = LookupOutcome::NotFound;
            return Ok(view);
        };

        let movements = self
            .repository
            .fetch_movements(shipment.id)
            .await
            .map_err(|e| {
                error!("Failed to fetch movements for shipment {}: {}", shipment.id, e);
                BrioError::from(e)
            })?;

        let timeline = build_timeline(&movements, &shipment);
        let progress_steps = build_progress(&shipment, &timeline);
        let current = current_step(&timeline).cloned();

        let customers = self.customers_for(&shipment).await?;
        let branches = self.branches_for(&shipment).await?;

        debug!(
            "Shipment {}: {} movements, {} timeline steps",
            shipment.id,
            movements.len(),
            timeline.len()
        );

        view.shipment = Some(shipment);
        view.movements = movements;
        view.timeline = timeline;
        view.progress_steps = progress_steps;
        view.current_step = current;
        view.customers = Some(customers);
        view.branches = Some(branches);
        view.outcome = LookupOutcome::Found;
        Ok(view)
    }

    async fn customers_for(&self, shipment: &ShipmentRecord) -> Result<ShipmentCustomers, BrioError> {
        let ids = collect_ids(&[shipment.origin_customer_id, shipment.destination_customer_id]);
        if ids.is_empty() {
            return Ok(ShipmentCustomers::default());
        }
        let customers = self
            .repository
            .fetch_customers_by_ids(&ids)
            .await
            .map_err(|e| {
                error!("Failed to fetch customers {:?}: {}", ids, e);
                BrioError::from(e)
            })?;

        let pick = |id: Option<i64>| id.and_then(|id| customers.get(&id).cloned());
        Ok(ShipmentCustomers {
            origin: pick(shipment.origin_customer_id),
            destination: pick(shipment.destination_customer_id),
        })
    }

    async fn branches_for(&self, shipment: &ShipmentRecord) -> Result<ShipmentBranches, BrioError> {
        let ids = collect_ids(&[
            shipment.origin_branch_id,
            shipment.destination_branch_id,
            shipment.issuing_branch_id,
        ]);
        if ids.is_empty() {
            return Ok(ShipmentBranches::default());
        }
        let branches = self
            .repository
            .fetch_branches_by_ids(&ids)
            .await
            .map_err(|e| {
                error!("Failed to fetch branches {:?}: {}", ids, e);
                BrioError::from(e)
            })?;

        let pick = |id: Option<i64>| id.and_then(|id| branches.get(&id).cloned());
        Ok(ShipmentBranches {
            origin: pick(shipment.origin_branch_id),
            destination: pick(shipment.destination_branch_id),
            issuing: pick(shipment.issuing_branch_id),
        })
    }
}
