//! Loader for the revenue-cycle dashboard's JSON snapshots
//!
//! The dashboard reads five static documents: KPI snapshot, payer summary,
//! denial trends, claim risk scores and incentive snapshot. This crate
//! retrieves them from the dashboard server (or a local directory) and parses
//! them, failing with a [`LoadError`] that names the path when a document is
//! missing or malformed.
//!
//! # Module Structure
//!
//! - [`loader`] - [`DashboardClient`] and its per-snapshot accessors
//! - [`source`] - HTTP and directory retrieval
//! - [`resource`] - Snapshot names and the path table
//! - [`model`] - Typed snapshot shapes
//! - [`error`] - Load error taxonomy
//! - [`config`] - Persisted user configuration
//!
//! # Example
//!
//! ```ignore
//! use dashdata::DashboardClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = DashboardClient::http("http://localhost:5173")?;
//!     let kpis = client.load_kpis().await?;
//!     if let Some(rate) = kpis.denial_rate() {
//!         println!("denial rate: {}", rate);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod resource;
pub mod source;

pub use error::{format_load_error, LoadError};
pub use loader::{DashboardClient, DashboardData};
pub use model::KpiSnapshot;
pub use resource::{PathTable, Resource};
