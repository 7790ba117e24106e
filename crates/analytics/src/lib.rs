//! # ETF Simulator Analytics Engine
//!
//! This crate computes the return and risk statistics of each selected ETF and
//! compares their compounded growth against the fixed-rate reference instrument.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of price
//!   providers, mail servers or terminals. It depends only on `core-types` and the
//!   typed settings in `configuration`.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes a `PriceSeries` and the
//!   `RunParameters` of a run and produces an `InstrumentResult`. Nothing is cached
//!   between runs, which keeps it trivially testable with fixture series.
//! - **Numbers stay numbers:** results hold `Decimal` values; formatting to text is
//!   left to the presentation layer.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: returns, annualization, VaR, Sharpe and per-instrument analysis.
//! - `compound_growth`, `compare_to_reference`, `growth_trajectory`: free functions.
//! - `InstrumentResult`, `ReferenceResult`, `Comparison`, `GrowthTrajectory`: outputs.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod comparison;
pub mod engine;
pub mod error;
pub mod report;
mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use comparison::{compare_to_reference, growth_trajectory};
pub use engine::{compound_growth, historical_var, AnalyticsEngine};
pub use error::AnalyticsError;
pub use report::{
    Annualized, Comparison, ComparisonRow, GrowthTrajectory, InstrumentResult, ReferenceResult,
    RowKind, Verdict,
};
