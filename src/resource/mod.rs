//! Dashboard resources
//!
//! - [`registry`] - The five snapshot resources and the path table that locates them
//! - [`select`] - Dot-path field selection inside a loaded snapshot

mod registry;
mod select;

pub use registry::{PathTable, Resource};
pub use select::{display_value, select};
