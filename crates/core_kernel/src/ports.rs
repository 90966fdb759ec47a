//! Ports for external collaborators
//!
//! The accounting core never performs I/O. Persistence of charts and journals
//! is delegated to collaborators behind port traits defined in each domain
//! crate (`ChartStore`, `JournalStore`). This module holds what they share:
//! the marker trait and a unified error type.
//!
//! ```text
//!   domain_chart / domain_journal          (pure, synchronous)
//!              │  port traits
//!              ▼
//!   store adapters (SQL, in-memory)         (async, fallible, may be transient)
//! ```
//!
//! Core errors are deterministic. Only `PortError` has a transient class,
//! reported by [`PortError::is_transient`].

use std::fmt;
use thiserror::Error;

use crate::error::CoreError;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The request violated a domain rule
    #[error("Domain error: {0}")]
    Domain(#[from] CoreError),

    /// The request was rejected before reaching the store
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with stored data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The store is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// Stored data could not be mapped back into domain types
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across tasks, so implementations must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(PortError::connection("refused").is_transient());
        assert!(PortError::Timeout { operation: "fetch_chart".into(), duration_ms: 500 }.is_transient());
        assert!(!PortError::not_found("chart", "COA-1").is_transient());
        assert!(!PortError::from(CoreError::DummyAccountType).is_transient());
    }

    #[test]
    fn test_not_found_display() {
        let error = PortError::not_found("account", "1200");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Not found: account with id 1200");
    }
}
