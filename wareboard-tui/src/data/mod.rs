//! Client-side data accumulation and fetch scheduling.

mod pager;
mod scroll;

pub use pager::*;
pub use scroll::*;
