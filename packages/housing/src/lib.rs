#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Days-on-market data loading and shaping.
//!
//! Reads the city and national CSV files into memory, projects city rows
//! onto point geometries for a selected date, and computes per-state
//! means. Everything here is a pure function of the loaded tables.

pub mod aggregate;
pub mod geo_join;
pub mod loader;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while loading or shaping housing data.
#[derive(Debug, Error)]
pub enum HousingError {
    /// Reading a data file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is missing from a data file.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Header that was expected.
        column: String,
    },

    /// The selected date is not one of the city file's date columns.
    #[error("Date {date} is not a column of the city data")]
    UnknownDate {
        /// The requested date.
        date: NaiveDate,
    },

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
