//! Query types for list endpoints.

mod filter;
mod list;
mod order;
mod page;

pub use filter::*;
pub use list::*;
pub use order::*;
pub use page::*;
