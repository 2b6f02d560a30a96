use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,

    // Mapping
    /// A database value could not be converted into its field type
    Conversion,
    /// No converter is registered for a column that needs one
    MissingConverter,

    // Integration/IO
    Io,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Conversion => "ERR_CONVERSION",
            ExErrorKind::MissingConverter => "ERR_MISSING_CONVERTER",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity, wrapped cause) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the mapping layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrickstoreError {
    /// Aggregate root not found
    #[error("LegoSet not found: {id}")]
    LegoSetNotFound { id: i32 },

    /// A CLOB column was read but no converter was registered for it
    #[error("No converter registered for CLOB column {column}")]
    MissingClobConverter { column: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// An alias table entry is unusable (empty key or value)
    #[error("Invalid column alias '{key}': {reason}")]
    InvalidAlias { key: String, reason: String },
}

impl From<BrickstoreError> for ExError {
    fn from(err: BrickstoreError) -> Self {
        match err {
            BrickstoreError::LegoSetNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message("LegoSet not found"),

            BrickstoreError::MissingClobConverter { column } => {
                ExError::new(ExErrorKind::MissingConverter)
                    .with_op("read_clob")
                    .with_message(format!("No converter registered for CLOB column {}", column))
            }

            BrickstoreError::InvalidConfig { message } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(message),

            BrickstoreError::InvalidAlias { key, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("column_aliases")
                    .with_message(format!("Invalid column alias '{}': {}", key, reason))
            }
        }
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_mapping_error_kind_codes() {
        let cases = [
            (ExErrorKind::Conversion, "ERR_CONVERSION"),
            (ExErrorKind::MissingConverter, "ERR_MISSING_CONVERTER"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let cause = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
        let err = ExError::new(ExErrorKind::Conversion)
            .with_message("Failed to convert CLOB to String.")
            .with_source(cause);

        let source = err.source().expect("source should be present");
        assert!(source.to_string().contains("disk I/O error"));
        assert!(err.to_string().contains("caused by"));
    }

    #[test]
    fn test_not_found_carries_entity_id() {
        let err: ExError = BrickstoreError::LegoSetNotFound { id: 7 }.into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("7"));
    }
}
