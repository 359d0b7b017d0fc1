//! Typed error handling for the shaping core
//!
//! Errors are split by who is at fault:
//!
//! - [`ValidationError`]: the caller sent an `orderBy`/`fields` clause or a
//!   payload that does not match the published resource contract (400)
//! - [`ConfigError`]: the deployment is inconsistent, e.g. a missing property
//!   mapping or a mapping that names a field the resource does not have (500)
//! - [`EntityError`]: a requested entity does not exist, or already exists
//! - [`StorageError`]: the storage collaborator failed
//!
//! # Example
//!
//! ```rust,ignore
//! match registry.mapping_for::<AuthorDto, Author>() {
//!     Ok(mapping) => apply_sort(authors, order_by, mapping)?,
//!     Err(ShapingError::Config(e)) => tracing::error!("deployment defect: {}", e),
//!     Err(e) => return Err(e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type of the crate
#[derive(Debug)]
pub enum ShapingError {
    /// Caller input errors
    Validation(ValidationError),

    /// Deployment / configuration defects
    Config(ConfigError),

    /// Entity lookup errors
    Entity(EntityError),

    /// Storage backend errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ShapingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapingError::Validation(e) => write!(f, "{}", e),
            ShapingError::Config(e) => write!(f, "{}", e),
            ShapingError::Entity(e) => write!(f, "{}", e),
            ShapingError::Storage(e) => write!(f, "{}", e),
            ShapingError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ShapingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapingError::Validation(e) => Some(e),
            ShapingError::Config(e) => Some(e),
            ShapingError::Entity(e) => Some(e),
            ShapingError::Storage(e) => Some(e),
            ShapingError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ShapingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShapingError::Validation(_) => StatusCode::BAD_REQUEST,
            ShapingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShapingError::Entity(e) => e.status_code(),
            ShapingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShapingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ShapingError::Validation(e) => e.error_code(),
            ShapingError::Config(_) => "CONFIG_ERROR",
            ShapingError::Entity(e) => e.error_code(),
            ShapingError::Storage(_) => "STORAGE_ERROR",
            ShapingError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for caller-input errors
    pub fn is_validation(&self) -> bool {
        matches!(self, ShapingError::Validation(_))
    }

    /// True for deployment defects
    pub fn is_config(&self) -> bool {
        matches!(self, ShapingError::Config(_))
    }

    /// Convert to an error response
    ///
    /// Server-side failures do not leak their message to the caller.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.status_code().is_server_error() {
            "Unexpected fault. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ShapingError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            ShapingError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ShapingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ShapingError::Config(e) => {
                tracing::error!(error = %e, "configuration defect while serving request");
            }
            e if status.is_server_error() => {
                tracing::error!(error = %e, "request failed");
            }
            e => {
                tracing::debug!(error = %e, status = %status, "request rejected");
            }
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors caused by caller input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An `orderBy` token is malformed (e.g. `"name sideways"`)
    MalformedOrderBy { token: String },

    /// An `orderBy` token names a field with no property mapping
    UnknownOrderByField { field: String },

    /// An `orderBy` clause failed the mapping check as a whole
    InvalidOrderBy { clause: String },

    /// A `fields` clause names a field the resource does not have
    UnknownFields { clause: String },

    /// Field-level payload errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MalformedOrderBy { token } => {
                write!(f, "Malformed orderBy clause near '{}'", token)
            }
            ValidationError::UnknownOrderByField { field } => {
                write!(f, "Cannot order by unknown field '{}'", field)
            }
            ValidationError::InvalidOrderBy { clause } => {
                write!(f, "orderBy clause '{}' references unknown fields", clause)
            }
            ValidationError::UnknownFields { clause } => {
                write!(f, "Requested fields '{}' do not exist on this resource", clause)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MalformedOrderBy { .. } => "INVALID_ORDER_BY",
            ValidationError::UnknownOrderByField { .. } => "INVALID_ORDER_BY",
            ValidationError::InvalidOrderBy { .. } => "INVALID_ORDER_BY",
            ValidationError::UnknownFields { .. } => "INVALID_FIELDS",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<ValidationError> for ShapingError {
    fn from(err: ValidationError) -> Self {
        ShapingError::Validation(err)
    }
}

// Nested payloads are flattened to paths like `books[0].title`
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            validator::ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldValidationError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            validator::ValidationErrorsKind::Struct(inner) => {
                collect_field_errors(&path, inner, out);
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = Vec::new();
        collect_field_errors("", &errors, &mut out);
        out.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(out)
    }
}

impl From<validator::ValidationErrors> for ShapingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ShapingError::Validation(errors.into())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Deployment defects: the registry, the resources and the config disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No mapping registered for a (source, destination) pair
    MissingMapping { source: String, destination: String },

    /// A (source, destination) pair was registered twice
    DuplicateMapping { source: String, destination: String },

    /// A public name was declared twice in one mapping
    DuplicateProperty { name: String },

    /// A mapping entry resolves to no storage field
    EmptyMapping { name: String },

    /// A mapping names a storage field the resource does not expose
    UnknownStorageField { resource: String, field: String },

    /// The shaper was asked for a field the resource does not have
    UnknownShapeField { resource: String, field: String },

    /// A declared field produced no value
    MissingFieldValue { resource: String, field: String },

    /// Invalid configuration value
    InvalidValue { field: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMapping {
                source,
                destination,
            } => {
                write!(
                    f,
                    "No property mapping registered for '{}' -> '{}'",
                    source, destination
                )
            }
            ConfigError::DuplicateMapping {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Property mapping '{}' -> '{}' is already registered",
                    source, destination
                )
            }
            ConfigError::DuplicateProperty { name } => {
                write!(f, "Property '{}' is mapped more than once", name)
            }
            ConfigError::EmptyMapping { name } => {
                write!(f, "Property '{}' maps to no storage field", name)
            }
            ConfigError::UnknownStorageField { resource, field } => {
                write!(f, "Resource '{}' has no storage field '{}'", resource, field)
            }
            ConfigError::UnknownShapeField { resource, field } => {
                write!(f, "Resource '{}' has no field '{}' to shape", resource, field)
            }
            ConfigError::MissingFieldValue { resource, field } => {
                write!(
                    f,
                    "Resource '{}' declares field '{}' but produced no value",
                    resource, field
                )
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ShapingError {
    fn from(err: ConfigError) -> Self {
        ShapingError::Config(err)
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// Entity was not found
    NotFound { entity_type: String, id: Uuid },

    /// Entity already exists (conflict)
    AlreadyExists { entity_type: String, id: Uuid },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::AlreadyExists { entity_type, id } => {
                write!(f, "{} with id '{}' already exists", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

impl From<EntityError> for ShapingError {
    fn from(err: EntityError) -> Self {
        ShapingError::Entity(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Operation failed in the backend
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Wrap a backend error for the given operation
    pub fn operation(operation: &str, err: anyhow::Error) -> Self {
        StorageError::OperationFailed {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for ShapingError {
    fn from(err: StorageError) -> Self {
        ShapingError::Storage(err)
    }
}

/// Result type alias for shaping operations
pub type ShapingResult<T> = Result<T, ShapingError>;
