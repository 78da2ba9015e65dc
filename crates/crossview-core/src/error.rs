//! Error types for crossview-core
//!
//! Provides error handling for:
//! - View registration
//! - View preparation and rendering
//! - Interaction translation
//! - Dashboard configuration

use crossview_io::{IoError, RecordId};
use crossview_stats::StatsError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crossview operations
#[derive(Error, Debug)]
pub enum CrossviewError {
    /// Dataset loading errors
    #[error("Failed to load dataset: {0}")]
    Io(#[from] IoError),

    /// Statistical helper errors
    #[error("Aggregation failed: {0}")]
    Stats(#[from] StatsError),

    /// View registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// View preparation or rendering errors
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Interaction translation errors
    #[error("Interaction rejected: {0}")]
    Interaction(#[from] InteractionError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed event or frame JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to the view registry
#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    /// Two views share a name
    #[error("View '{0}' is already registered")]
    DuplicateView(String),

    /// Lookup of a name that was never registered
    #[error("Unknown view: {0}")]
    UnknownView(String),
}

/// Errors raised while preparing or drawing a single view
#[derive(Error, Debug)]
pub enum RenderError {
    /// The view references a field absent from the schema
    #[error("View '{view}' references unknown field '{field}'")]
    MissingField { view: String, field: String },

    /// The field exists but has the wrong kind
    #[error("Field '{field}' used by view '{view}' is not {expected}")]
    WrongFieldKind {
        view: String,
        field: String,
        expected: String,
    },

    /// A statistical helper failed
    #[error("Aggregation failed: {0}")]
    Stats(#[from] StatsError),

    /// The rendering collaborator reported a failure
    #[error("Renderer failed for view '{view}': {message}")]
    Renderer { view: String, message: String },

    /// Frame serialization failed
    #[error("Failed to serialize frame: {message}")]
    Serialization { message: String },
}

/// Errors turning a raw interaction into a selection event
#[derive(Error, Debug, PartialEq)]
pub enum InteractionError {
    /// The interaction names a view that is not registered
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// A brush was drawn on a view without brush axes
    #[error("View '{0}' does not support brushing")]
    NotBrushable(String),

    /// A clicked line points at no record
    #[error("No record with id {0}")]
    UnknownRecord(RecordId),

    /// The clicked record has no value for the category field
    #[error("Record {id} has no value for '{field}'")]
    MissingCategory { id: RecordId, field: String },

    /// A click was reported on a view whose marks are not categories
    #[error("View '{0}' does not support category clicks")]
    NotClickable(String),

    /// The clicked view breaks down a field other than the cross-filter field
    #[error("View '{view}' shows '{field}', but the category filter applies to '{expected}'")]
    FieldMismatch {
        view: String,
        field: String,
        expected: String,
    },

    /// The synthetic "Other" bar cannot be selected
    #[error("The 'Other' bucket is not a selectable category")]
    OtherBucket,
}

/// Errors related to dashboard configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// A required value is empty
    #[error("Missing value: {0}")]
    MissingValue(String),

    /// A value is out of its allowed range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// TOML or JSON could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Result type alias for crossview operations
pub type CrossviewResult<T> = Result<T, CrossviewError>;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type alias for interaction translation
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
