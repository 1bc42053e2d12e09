//! Shared selection pipeline used by every list operation

pub mod data_cell;
pub mod data_selector;
