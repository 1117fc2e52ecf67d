//! pauta-cli library
//!
//! This crate provides the core functionality for the `pauta-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of the
//! official-advertising data pipeline:
//!
//! - [`ingest`] - Fetches the per-year JSON datasets (or loads them from disk) into one flat record collection
//! - [`normalizer`] - Canonicalizes free text and month names for searching and grouping
//! - [`aggregate`] - Grouped sums: per year, per month, per outlet, ranked and alphabetical views
//! - [`pipeline`] - Free-text/year filtering and the two ordering regimes of the detail listing
//! - [`token`] - Encrypted, URL-safe share tokens for deep-linking an outlet selection
//! - [`export`] - CSV and spreadsheet-HTML serializers for the filtered listing
//! - [`cli`] - Command-line interface binding the pure core to terminal output
//! - [`model`] - Data structures representing allocation records
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The typical workflow loads the datasets once and feeds the immutable record
//! collection to the aggregation and filter/sort functions:
//!
//! ```no_run
//! use pauta_cli::{aggregate, ingest, errors::AppResult};
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let records = ingest::load_dir(Path::new("data")).await?;
//! let totals = aggregate::totals_by_year(&records);
//! let top = aggregate::top_outlets(&records, 50);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod token;
pub mod ui;
pub mod utils;
