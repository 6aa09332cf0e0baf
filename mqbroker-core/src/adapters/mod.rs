//! Adapter contracts between the orchestrator and the resource providers.
//!
//! The orchestrator depends only on these traits; provider-specific clients
//! live behind them and can be swapped for test doubles.

use async_trait::async_trait;
use mqbroker_models::{AccessKey, QueueDetails, UserDetails};

use crate::errors::AdapterError;

mod iam;
mod sqs;

pub use iam::IamUser;
pub use sqs::SqsQueue;

/// Capability to manage a provider queue resource and its permission grants.
#[async_trait]
pub trait Queue: Send + Sync {
    /// Resolve the logical name and fetch all queue attributes. Fails with
    /// [`AdapterError::NotFound`] when the provider has no such queue.
    async fn describe(&self, queue_name: &str) -> Result<QueueDetails, AdapterError>;

    /// Create the queue. Only non-empty attributes in `details` are sent;
    /// absent attributes are left at provider defaults. Creating a name that
    /// already exists is a provider-level conflict.
    async fn create(&self, queue_name: &str, details: &QueueDetails) -> Result<(), AdapterError>;

    /// Update the same optional-attribute subset as [`Queue::create`] on an
    /// existing queue.
    async fn modify(&self, queue_name: &str, details: &QueueDetails) -> Result<(), AdapterError>;

    async fn delete(&self, queue_name: &str) -> Result<(), AdapterError>;

    /// Grant the named principals the given action set on the queue, scoped
    /// by `label` so the grant can be revoked independently later.
    async fn add_permission(
        &self,
        queue_name: &str,
        label: &str,
        principal_arns: &[String],
        actions: &[String],
    ) -> Result<(), AdapterError>;

    async fn remove_permission(&self, queue_name: &str, label: &str)
        -> Result<(), AdapterError>;
}

/// Capability to manage a provider principal and its access credentials.
///
/// Unlike [`Queue`], there is no implicit not-found convention here: the
/// orchestrator only operates on principals it has just created, so absence
/// surfaces as a plain provider error.
#[async_trait]
pub trait Identity: Send + Sync {
    async fn describe(&self, user_name: &str) -> Result<UserDetails, AdapterError>;

    /// Create the principal. A duplicate create is surfaced as a provider
    /// error, never swallowed.
    async fn create(&self, user_name: &str) -> Result<(), AdapterError>;

    async fn delete(&self, user_name: &str) -> Result<(), AdapterError>;

    /// List the ids of all access keys owned by the principal, in provider
    /// order.
    async fn list_access_keys(&self, user_name: &str) -> Result<Vec<String>, AdapterError>;

    /// Create an access key. The secret is provider-generated and returned
    /// exactly once.
    async fn create_access_key(&self, user_name: &str) -> Result<AccessKey, AdapterError>;

    async fn delete_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
    ) -> Result<(), AdapterError>;
}
