//! Error taxonomy for the broker core.
//!
//! Adapters normalize every provider failure into [`AdapterError`]; the
//! orchestrator translates adapter outcomes into the small, stable
//! [`BrokerError`] set the lifecycle API understands. Nothing in the core
//! retries a failed remote call.

use thiserror::Error;

/// Normalized outcome of a provider call, raised by the adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The provider reports that the resource does not exist.
    #[error("provider resource does not exist")]
    NotFound,

    /// The provider rejected a well-formed request. Code and message are
    /// surfaced verbatim to the caller.
    #[error("{code}: {message}")]
    Provider { code: String, message: String },

    /// Network-level failure the core does not classify further.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Lifecycle-level error conditions exposed upward by the orchestrator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrokerError {
    #[error("service instance does not exist")]
    InstanceNotFound,

    #[error("service '{0}' not found")]
    ServiceNotFound(String),

    #[error("service plan '{0}' not found")]
    PlanNotFound(String),

    #[error("service instances of this service are not updateable")]
    NotUpdateable,

    #[error("service instances of this service are not bindable")]
    NotBindable,

    #[error("invalid value for parameter '{field}': expected a string")]
    InvalidParameters { field: String },

    #[error("this broker does not support asynchronous operations")]
    AsyncNotSupported,

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
