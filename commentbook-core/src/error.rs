//! Error types for the export pipeline.
//!
//! Every failure aborts the run. Messages never carry the password; connect
//! strings only appear in their credential-free form.

use thiserror::Error;

/// Boxed source error used where the underlying driver error type varies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for commentbook operations.
#[derive(Debug, Error)]
pub enum CommentBookError {
    /// A required catalog query returned no rows
    #[error("Catalog returned no rows: {what}")]
    EmptyResult { what: String },

    /// A catalog query could not be executed
    #[error("Query execution failed: {context}")]
    QueryExecution {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Establishing the database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Two sheets would end up with the same title
    #[error("Duplicate sheet title '{title}'")]
    DuplicateSheetTitle { title: String },

    /// The in-memory workbook could not be rendered
    #[error("Workbook rendering failed: {context}")]
    Workbook {
        context: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or argument validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Driver support not compiled in
    #[error("Unsupported operation: {feature} ({hint})")]
    UnsupportedFeature { feature: String, hint: String },
}

/// Convenience type alias for Results with `CommentBookError`
pub type Result<T> = std::result::Result<T, CommentBookError>;

impl CommentBookError {
    /// Creates an empty-result error for the named catalog query
    pub fn empty_result(what: impl Into<String>) -> Self {
        Self::EmptyResult { what: what.into() }
    }

    /// Creates a query error wrapping the driver error
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QueryExecution {
            context: context.into(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates a query error without an underlying driver error
    pub fn query_message(context: impl Into<String>) -> Self {
        Self::QueryExecution {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a connection error; the context must not contain credentials
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a workbook rendering error
    pub fn workbook(context: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Workbook {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an unsupported feature error
    pub fn unsupported_feature(feature: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            hint: hint.into(),
        }
    }
}
