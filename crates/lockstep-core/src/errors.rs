use lockstep_core_types::RequestId;

/// Result type alias using LsError
pub type Result<T> = std::result::Result<T, LsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Exactly these six kinds cross component boundaries; every internal
/// failure is translated to one of them before it becomes visible to a
/// caller. Each kind maps to a stable error code for programmatic handling
/// and to the HTTP status the front end returns for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsErrorKind {
    /// Bad or missing request fields; the client must fix the request
    Validation,
    /// Expected contention on the lease; retryable by the caller after backoff
    LockConflict,
    /// Infrastructure failure in the lock store; retryable
    LockService,
    /// Object-store failure while fetching a snapshot; retryable
    FetchFailed,
    /// Object-store failure while publishing a snapshot; retryable, but the
    /// durability of the attempted write is unknown to the caller
    PublishFailed,
    /// Statement failed against the engine; not retryable without changing
    /// the statement
    Execution,
}

impl LsErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LsErrorKind::Validation => "ERR_VALIDATION",
            LsErrorKind::LockConflict => "ERR_LOCK_CONFLICT",
            LsErrorKind::LockService => "ERR_LOCK_SERVICE",
            LsErrorKind::FetchFailed => "ERR_FETCH_FAILED",
            LsErrorKind::PublishFailed => "ERR_PUBLISH_FAILED",
            LsErrorKind::Execution => "ERR_EXECUTION",
        }
    }

    /// HTTP status the front end maps this kind to
    pub fn http_status(&self) -> u16 {
        match self {
            LsErrorKind::Validation => 400,
            LsErrorKind::LockConflict => 409,
            LsErrorKind::LockService
            | LsErrorKind::FetchFailed
            | LsErrorKind::PublishFailed
            | LsErrorKind::Execution => 500,
        }
    }

    /// Whether a caller may meaningfully retry the same request
    pub fn is_retryable(&self) -> bool {
        match self {
            LsErrorKind::LockConflict
            | LsErrorKind::LockService
            | LsErrorKind::FetchFailed
            | LsErrorKind::PublishFailed => true,
            LsErrorKind::Validation | LsErrorKind::Execution => false,
        }
    }
}

/// Canonical structured error type
///
/// Carries the kind plus the protocol context (operation, resource, holder,
/// request correlation) needed to interpret a failure without parsing the
/// message text.
#[derive(Debug, Clone)]
pub struct LsError {
    kind: LsErrorKind,
    op: Option<String>,
    resource_id: Option<String>,
    holder_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<LsError>>,
}

impl LsError {
    /// Create a new error with the specified kind
    pub fn new(kind: LsErrorKind) -> Self {
        Self {
            kind,
            op: None,
            resource_id: None,
            holder_id: None,
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

    /// Add resource ID context
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Add holder ID context
    pub fn with_holder_id(mut self, id: impl Into<String>) -> Self {
        self.holder_id = Some(id.into());
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
    pub fn with_source(mut self, source: LsError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> LsErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the HTTP status for this error's kind
    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the resource ID context, if any
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Get the holder ID context, if any
    pub fn holder_id(&self) -> Option<&str> {
        self.holder_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&LsError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for LsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(resource_id) = &self.resource_id {
            write!(f, " (resource_id: {})", resource_id)?;
        }
        if let Some(holder_id) = &self.holder_id {
            write!(f, " (holder_id: {})", holder_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for LsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========
