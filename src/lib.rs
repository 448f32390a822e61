#![forbid(unsafe_code)]
//! Estimates the annual CO2e emissions of leased vehicles and splits them
//! into a business share (scope 2) and a private share (scope 3).
pub mod csv;
mod emissions;
mod error;
mod fleet;
mod format;
mod fuel;

pub use emissions::*;
pub use error::Error;
pub use fleet::*;
pub use format::*;
pub use fuel::*;
