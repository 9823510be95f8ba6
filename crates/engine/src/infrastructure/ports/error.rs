//! Error types for port operations.

/// Host-store and renderer failures. Never retried by the engine: the
/// import aborts and the error is surfaced to the caller verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A store call failed - includes the operation name for tracing.
    #[error("Host store error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A referenced host object does not exist.
    #[error("{object} not found: {id}")]
    NotFound { object: &'static str, id: String },

    /// Template rendering failed.
    #[error("Render error in {template}: {message}")]
    Render {
        template: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a NotFound error with object type and id context.
    pub fn not_found(object: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            object,
            id: id.to_string(),
        }
    }

    /// Create a Render error with template context.
    pub fn render(template: &'static str, message: impl ToString) -> Self {
        Self::Render {
            template,
            message: message.to_string(),
        }
    }
}
