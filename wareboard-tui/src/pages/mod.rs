//! Dashboard pages: one module per screen.

mod filter;
mod inventory;
mod order_detail;
mod orders;
mod tasks;

pub use filter::*;
pub use inventory::*;
pub use order_detail::*;
pub use orders::*;
pub use tasks::*;

/// Upper bound on rows in one bulk action.
pub const MAX_BULK_SELECTION: usize = 100;

/// Which screen is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Orders,
    Inventory,
    Tasks,
    OrderDetail(String),
}

impl Route {
    /// Title shown in the tab bar.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Orders => "Orders",
            Route::Inventory => "Inventory",
            Route::Tasks => "Tasks",
            Route::OrderDetail(_) => "Order",
        }
    }
}
