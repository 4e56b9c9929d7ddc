//! ERP database access for Brio
//!
//! This crate reads shipments, their movement history and the customer and
//! branch lookup tables from the ERP. It uses SQLx's `Any` driver so the same
//! queries run on PostgreSQL in production and on a SQLite copy locally.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! brio-db = { version = "0.1.0", features = ["postgres"] }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use brio_config::AppConfig;
//! use brio_db::{DbClient, ShipmentRepository, SqlShipmentRepository};
//!
//! async fn lookup(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let db_client = DbClient::new(config).await?;
//!     let repository = SqlShipmentRepository::new(db_client);
//!     let shipment = repository.fetch_shipment(123).await?;
//!     println!("{:?}", shipment);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod conversions;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;

pub use repositories::{
    Branch, Customer, MovementEvent, ShipmentRecord, ShipmentRepository, SqlShipmentRepository,
};
