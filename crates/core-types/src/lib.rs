//! # ETF Simulator Core Types
//!
//! Layer 0 of the workspace: the plain data shared by every other crate.
//! It has no knowledge of providers, configuration or rendering.

pub mod catalogue;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use catalogue::{display_name, find_etf, Etf, ETF_CATALOGUE};
pub use error::CoreError;
pub use structs::{ContactDetails, PricePoint, PriceSeries, RunParameters};
