//! Domain models for the warehouse backend.

mod audit;
mod column;
mod inventory;
mod lookup;
mod order;
mod record;
mod task;

pub use audit::*;
pub use column::*;
pub use inventory::*;
pub use lookup::*;
pub use order::*;
pub use record::*;
pub use task::*;
