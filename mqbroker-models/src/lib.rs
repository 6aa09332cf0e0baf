//! Shared data model for the message-queue service broker.
//!
//! Catalog/plan types are loaded once at startup and stay immutable for the
//! process lifetime. Queue, user and credential records are transient values
//! computed per lifecycle call and never cached.

use serde::{Deserialize, Serialize};

/// The six provider-tunable queue attributes a plan can pin.
///
/// Providers accept and return these as strings; an empty string means
/// "not set, use the provider default". No numeric validation happens here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueProperties {
    #[serde(default)]
    pub delay_seconds: String,
    #[serde(default)]
    pub maximum_message_size: String,
    #[serde(default)]
    pub message_retention_period: String,
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub receive_message_wait_time_seconds: String,
    #[serde(default)]
    pub visibility_timeout: String,
}

/// A single offerable plan within a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub queue_properties: QueueProperties,
}

/// An offerable service with its plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub bindable: bool,
    #[serde(default)]
    pub plan_updateable: bool,
    #[serde(default)]
    pub plans: Vec<ServicePlan>,
}

/// The static service catalog the broker offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Catalog {
    /// Find a service by its catalog id.
    pub fn find_service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// Find a plan by its catalog id, across all services.
    pub fn find_service_plan(&self, plan_id: &str) -> Option<&ServicePlan> {
        self.services
            .iter()
            .flat_map(|s| s.plans.iter())
            .find(|p| p.id == plan_id)
    }

    /// Check the catalog invariants: non-empty ids and names, unique service
    /// ids, and plan ids unique across the whole catalog.
    ///
    /// Run once at startup; the orchestrator assumes a validated catalog.
    pub fn validate(&self) -> Result<(), String> {
        let mut service_ids = std::collections::HashSet::new();
        let mut plan_ids = std::collections::HashSet::new();

        for service in &self.services {
            if service.id.is_empty() {
                return Err(format!("service '{}' must have a non-empty id", service.name));
            }
            if service.name.is_empty() {
                return Err(format!("service '{}' must have a non-empty name", service.id));
            }
            if !service_ids.insert(service.id.as_str()) {
                return Err(format!("duplicate service id '{}'", service.id));
            }
            for plan in &service.plans {
                if plan.id.is_empty() {
                    return Err(format!(
                        "plan '{}' of service '{}' must have a non-empty id",
                        plan.name, service.id
                    ));
                }
                if plan.name.is_empty() {
                    return Err(format!(
                        "plan '{}' of service '{}' must have a non-empty name",
                        plan.id, service.id
                    ));
                }
                if !plan_ids.insert(plan.id.as_str()) {
                    return Err(format!("duplicate plan id '{}'", plan.id));
                }
            }
        }

        Ok(())
    }
}

/// Provider-side attributes of a managed queue.
///
/// `queue_url` and `queue_arn` are provider-assigned and read-only; the
/// remaining fields map 1:1 to [`QueueProperties`]. Empty strings mean the
/// attribute is absent and should be left at the provider default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueDetails {
    pub queue_url: String,
    pub queue_arn: String,
    pub delay_seconds: String,
    pub maximum_message_size: String,
    pub message_retention_period: String,
    pub policy: String,
    pub receive_message_wait_time_seconds: String,
    pub visibility_timeout: String,
}

impl QueueDetails {
    /// Build details from a plan's defaults. Provider-assigned fields stay
    /// empty until the provider reports them.
    pub fn from_plan(properties: &QueueProperties) -> Self {
        Self {
            delay_seconds: properties.delay_seconds.clone(),
            maximum_message_size: properties.maximum_message_size.clone(),
            message_retention_period: properties.message_retention_period.clone(),
            policy: properties.policy.clone(),
            receive_message_wait_time_seconds: properties
                .receive_message_wait_time_seconds
                .clone(),
            visibility_timeout: properties.visibility_timeout.clone(),
            ..Self::default()
        }
    }
}

/// Provider-side attributes of a principal (user).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetails {
    pub user_name: String,
    pub arn: String,
    pub user_id: String,
}

/// A provider-generated credential pair. The secret is returned exactly once
/// at creation and is not retrievable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessKey {
    pub id: String,
    pub secret: String,
}

/// Credentials handed back to the caller at bind time; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub uri: String,
}

/// Caller-facing catalog plan shape: provider-internal queue properties are
/// not exposed through the lifecycle API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogPlan {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Caller-facing catalog service shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogService {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub bindable: bool,
    #[serde(default)]
    pub plan_updateable: bool,
    #[serde(default)]
    pub plans: Vec<CatalogPlan>,
}

/// Response shape for the lifecycle API's catalog listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogResponse {
    #[serde(default)]
    pub services: Vec<CatalogService>,
}

/// Provision request as received from the lifecycle API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProvisionRequest {
    pub service_id: String,
    pub plan_id: String,
    /// Raw caller-supplied parameter overrides, decoded only when the
    /// operator allows provision parameters.
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

/// Update request as received from the lifecycle API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateRequest {
    pub service_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
    /// Plan/service the instance was previously on; carried for API
    /// compatibility, the broker derives everything from the catalog.
    #[serde(default)]
    pub previous_values: Option<serde_json::Value>,
}

/// Bind request as received from the lifecycle API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BindRequest {
    pub service_id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}
