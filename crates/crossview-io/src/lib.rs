//! crossview-io - Record store for coordinated dashboards
//!
//! This crate turns raw tabular input into the immutable record set every
//! chart view reads from:
//!
//! - **RawTable**: headers plus string rows, validated to be rectangular
//! - **RecordSchema**: which columns are the year, categorical and numeric fields
//! - **RecordSet**: typed records with dimension metadata (distinct values, extents)
//! - **CSV**: delimited text ingestion (feature `csv`, on by default)
//!
//! # Design
//!
//! Ingestion is permissive in the way real-world CSV is: a numeric cell that
//! is empty or unparseable becomes `0.0` instead of an error. Only input that
//! is not a table at all is rejected.

pub mod reader;
pub mod record;
pub mod schema;
pub mod store;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub use reader::*;
pub use record::*;
pub use schema::*;
pub use store::*;

#[cfg(feature = "csv")]
pub use csv_reader::{read_csv, read_csv_from_reader, read_csv_with_delimiter};
