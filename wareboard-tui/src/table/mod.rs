//! Data table widget: columns, selection, long-press, pinned columns,
//! scrolling.

mod item;
mod longpress;
mod render;
mod selection;
mod state;
mod sticky;

pub use item::*;
pub use longpress::*;
pub use render::*;
pub use selection::*;
pub use state::*;
pub use sticky::*;
