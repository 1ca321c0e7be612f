//! Warehouse backend API client library
//!
//! An async Rust client for the warehouse/order-management REST backend
//! used by the Wareboard dashboard.

pub mod api;
pub mod cache;
pub mod envelope;
pub mod error;
pub mod lookups;
pub mod model;
pub mod response;

mod client;

pub use api::query::{Direction, Filter, ListQuery, OrderBy, Page};
pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
