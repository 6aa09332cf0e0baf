//! Deterministic provider resource naming.
//!
//! The broker persists nothing: every provider resource name is a pure
//! function of the operator prefix and the caller-supplied identity, and is
//! recomputed on every lifecycle call.

/// Queue name for a service instance.
pub fn queue_name(prefix: &str, instance_id: &str) -> String {
    format!("{prefix}-{instance_id}")
}

/// Principal (user) name for a binding.
pub fn user_name(prefix: &str, binding_id: &str) -> String {
    format!("{prefix}-{binding_id}")
}

/// Label scoping a binding's permission grant, so it can be revoked
/// independently of other grants on the same queue.
pub fn permission_label(prefix: &str, binding_id: &str) -> String {
    format!("{prefix}-{binding_id}")
}
