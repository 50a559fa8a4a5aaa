use schemadiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using SchemaDiffError
pub type Result<T> = std::result::Result<T, SchemaDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on and
/// that the CLI prints verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    /// Column map JSON is not an object of `{type}` / `null` members
    InvalidColumnMap,
    /// Lineage JSON does not describe `nodes` + `modified_set`
    InvalidLineage,
    NotFound,

    // Diff
    DeterminismViolation,

    // Integration/IO
    Io,
    Serialization,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidColumnMap => "ERR_INVALID_COLUMN_MAP",
            ExErrorKind::InvalidLineage => "ERR_INVALID_LINEAGE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DeterminismViolation => "ERR_DETERMINISM_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, entity, request) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
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
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a node id or a column name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
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

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

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
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
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

/// Domain errors raised at the parsing and lookup boundaries.
///
/// Merging and aggregation are total and never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaDiffError {
    /// Column map input is malformed
    #[error("Invalid column map: {reason}")]
    InvalidColumnMap { reason: String },

    /// Lineage input is malformed
    #[error("Invalid lineage: {reason}")]
    InvalidLineage { reason: String },

    /// A node id was requested that the lineage graph does not contain
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SchemaDiffError> for ExError {
    fn from(err: SchemaDiffError) -> Self {
        match err {
            SchemaDiffError::InvalidColumnMap { reason } => {
                ExError::new(ExErrorKind::InvalidColumnMap).with_message(reason)
            }
            SchemaDiffError::InvalidLineage { reason } => {
                ExError::new(ExErrorKind::InvalidLineage).with_message(reason)
            }
            SchemaDiffError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(node_id)
                .with_message("Node not found in lineage graph"),
            SchemaDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SchemaDiffError {
    fn from(err: serde_json::Error) -> Self {
        SchemaDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}
