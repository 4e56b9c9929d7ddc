//! Brio backend
//!
//! Wires configuration, logging and the feature routers into one axum app.
//! The binary in `main.rs` only loads the configuration, connects to the ERP
//! and serves the router built by [`app::build_router`].

pub mod app;
pub mod service_worker;

pub use app::{build_router, Services};
