//! Terminal dashboard for the Wareboard warehouse backend.
//!
//! Screens for orders, inventory, and floor tasks, built on a shared data
//! table widget with sortable headers, pinned columns, infinite scroll, and
//! long-press bulk selection.

pub mod app;
pub mod data;
pub mod pages;
pub mod paths;
pub mod presets;
pub mod table;
