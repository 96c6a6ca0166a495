pub mod factory;
pub mod unit_list;
pub mod unit_row;

pub use factory::UnitListViewModelFactory;
pub use unit_list::{LoadState, UnitListViewModel};
pub use unit_row::{RowStyle, series_header_visible};
