//! Web push relay for Brio
//!
//! This crate signs requests for a notification hub with Shared Access
//! Signature tokens and uses them to fan web push notifications out to the
//! browsers subscribed to a shipment.
//!
//! # Features
//!
//! - Connection string parsing and SAS token signing
//! - Notifications routed by shipment tag (`envio:{id}`)
//! - Browser installation registration
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use brio_config::AppConfig;
//! use brio_notifications::routes;
//! use std::sync::Arc;
//!
//! fn setup_app() -> axum::Router {
//!     let config = Arc::new(AppConfig::default());
//!     routes(config)
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /notifications/send` - Notify every browser following a shipment
//! - `POST /notifications/subscribe` - Register a browser push subscription
//! - `GET /notifications/vapid-public` - Public VAPID key for subscribing

pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sas;

pub use client::{HubResponse, NotificationHubClient};
pub use error::NotificationError;
pub use routes::{routes, routes_with_state};
pub use sas::{HubConnection, NotificationToken};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::NotificationsApiDoc;
}
