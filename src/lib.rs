//! futstat - roster analytics for FUT club exports.
//!
//! Provides:
//! - `data`: roster model, CSV loading, attribute filters
//! - `snapshot`: dated snapshot files and download adoption
//! - `stats`: rating statistics and tier counts
//! - `report`: player listings and summary tables
//! - `histogram`: rating distribution plots
//!
//! The `futstat` binary wraps these into a small CLI; the
//! `generate_sample` binary produces realistic exports for testing.

pub mod data;
pub mod error;
pub mod histogram;
pub mod report;
pub mod snapshot;
pub mod stats;

pub use error::{Error, Result};
