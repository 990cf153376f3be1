//! Error handling for flightplot
//!
//! This module defines the error type and Result alias used throughout
//! the crate. Only configuration problems and file handling are errors;
//! empty series, out-of-range interpolation and stitch gaps are absorbed
//! by the plot engine and never surface here.

use thiserror::Error;

/// Main error type for flightplot operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// Generic configuration errors (malformed files, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The plot configuration does not name a domain data type
    #[error("Domain axis type not specified")]
    MissingDomainType,

    /// A selected data type is assigned to neither value axis
    #[error("Data type '{data_type}' assigned to invalid axis {axis} (expected 0 or 1)")]
    InvalidAxis { data_type: String, axis: u8 },

    /// The same data type was selected more than once
    #[error("Data type '{0}' selected more than once")]
    DuplicateType(String),

    /// A data type key that the simulation does not define
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    /// A unit symbol that does not belong to the data type's unit group
    #[error("Unknown unit '{unit}' for data type '{data_type}'")]
    UnknownUnit { unit: String, data_type: String },

    /// A simulation result without any branches
    #[error("Simulation contains no flight data branches")]
    EmptySimulation,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlotError>,
    },
}

impl PlotError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlotError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error was raised while validating a plot configuration
    pub fn is_configuration_error(&self) -> bool {
        match self {
            PlotError::Config(_)
            | PlotError::MissingDomainType
            | PlotError::InvalidAxis { .. }
            | PlotError::DuplicateType(_)
            | PlotError::UnknownDataType(_)
            | PlotError::UnknownUnit { .. } => true,
            PlotError::WithContext { source, .. } => source.is_configuration_error(),
            _ => false,
        }
    }
}

/// Result type alias for flightplot operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
