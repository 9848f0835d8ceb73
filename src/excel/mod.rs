//! Workbook access
//!
//! - Loader: open a workbook and pick a worksheet
//! - Extract: pull the header row and data rectangle out of a worksheet

mod active;
mod extract;
mod loader;

pub use extract::extract;
pub use loader::{list_sheets, Loader, Worksheet};
