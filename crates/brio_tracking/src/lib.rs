//! Shipment tracking for Brio
//!
//! Turns the raw movement history of a shipment in the ERP into a
//! deduplicated timeline of milestones and a five-stage progress bar.
//!
//! # Features
//!
//! - Ordered classification rules over ERP movements
//! - Timeline with one step per milestone, newest first, plus the reception step
//! - Monotonic progress bar
//! - Customer and branch enrichment with one batched query per table
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use brio_config::AppConfig;
//! use brio_db::DbClient;
//!
//! async fn setup_app(config: &AppConfig) -> Result<axum::Router, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::new(config).await?;
//!     Ok(brio_tracking::routes(db_client))
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /tracking?q=<shipment number>` - Timeline and progress bar for a shipment

#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod models;
pub mod progress;
#[cfg(test)]
mod progress_test;
pub mod routes;
pub mod rules;
pub mod service;
#[cfg(test)]
mod test_support;
pub mod timeline;
#[cfg(test)]
mod timeline_proptest;
#[cfg(test)]
mod timeline_test;

pub use models::{ProgressStage, StepKey, TimelineStep};
pub use routes::{routes, routes_with_repository};
pub use service::{LookupOutcome, TrackingService, TrackingView};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::TrackingApiDoc;
}
