//! Warehouse REST operations

mod audit;
mod columns;
mod inventory;
mod orders;
mod tasks;

pub mod query;

pub use audit::*;
pub use columns::*;
pub use inventory::*;
pub use orders::*;
pub use tasks::*;
