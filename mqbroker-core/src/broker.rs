//! The broker orchestrator.
//!
//! Stateless coordinator over the queue and identity adapters: it derives
//! provider resource names from instance/binding identities, merges plan
//! defaults with caller overrides, runs multi-step create sequences with
//! compensating rollback, and maps adapter outcomes onto the lifecycle
//! error taxonomy. The providers are the only source of truth; nothing is
//! cached between calls.

use std::sync::Arc;

use mqbroker_models::{
    AccessKey, BindRequest, Catalog, CatalogResponse, Credentials, ProvisionRequest, QueueDetails,
    UpdateRequest,
};
use tracing::{debug, error, warn};

use crate::adapters::{Identity, Queue};
use crate::errors::{AdapterError, BrokerError};
use crate::names;
use crate::params::QueueParameters;

/// Operator-level broker settings. The catalog is assumed validated before
/// it gets here.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub queue_prefix: String,
    pub allow_user_provision_parameters: bool,
    pub allow_user_update_parameters: bool,
    pub catalog: Catalog,
}

pub struct Broker {
    config: BrokerConfig,
    queue: Arc<dyn Queue>,
    identity: Arc<dyn Identity>,
}

/// Undo action recorded after each successful bind side effect. Executed in
/// reverse order when a later step fails; failures are logged and never
/// replace the error that triggered the rollback.
enum Undo {
    DeleteUser,
    DeleteAccessKey { key_id: String },
}

impl Broker {
    pub fn new(config: BrokerConfig, queue: Arc<dyn Queue>, identity: Arc<dyn Identity>) -> Self {
        Self {
            config,
            queue,
            identity,
        }
    }

    /// The static catalog in the lifecycle API's response shape. Pure, no
    /// provider calls; a transform failure (malformed catalog) yields an
    /// empty response since the catalog was validated before startup.
    pub fn services(&self) -> CatalogResponse {
        let value = match serde_json::to_value(&self.config.catalog) {
            Ok(value) => value,
            Err(err) => {
                error!(%err, "catalog-serialize-error");
                return CatalogResponse::default();
            }
        };

        match serde_json::from_value(value) {
            Ok(response) => response,
            Err(err) => {
                error!(%err, "catalog-transform-error");
                CatalogResponse::default()
            }
        }
    }

    pub async fn provision(
        &self,
        instance_id: &str,
        request: &ProvisionRequest,
        accepts_incomplete: bool,
    ) -> Result<(), BrokerError> {
        debug!(instance_id, ?request, accepts_incomplete, "provision");

        let plan = self
            .config
            .catalog
            .find_service_plan(&request.plan_id)
            .ok_or_else(|| BrokerError::PlanNotFound(request.plan_id.clone()))?;

        let parameters = self.provision_parameters(request.parameters.as_ref())?;

        let mut details = QueueDetails::from_plan(&plan.queue_properties);
        parameters.apply(&mut details);

        let queue_name = names::queue_name(&self.config.queue_prefix, instance_id);
        self.queue.create(&queue_name, &details).await?;

        Ok(())
    }

    pub async fn update(
        &self,
        instance_id: &str,
        request: &UpdateRequest,
        accepts_incomplete: bool,
    ) -> Result<(), BrokerError> {
        debug!(instance_id, ?request, accepts_incomplete, "update");

        let service = self
            .config
            .catalog
            .find_service(&request.service_id)
            .ok_or_else(|| BrokerError::ServiceNotFound(request.service_id.clone()))?;
        if !service.plan_updateable {
            return Err(BrokerError::NotUpdateable);
        }

        let plan = self
            .config
            .catalog
            .find_service_plan(&request.plan_id)
            .ok_or_else(|| BrokerError::PlanNotFound(request.plan_id.clone()))?;

        let parameters = self.update_parameters(request.parameters.as_ref())?;

        let mut details = QueueDetails::from_plan(&plan.queue_properties);
        parameters.apply(&mut details);

        let queue_name = names::queue_name(&self.config.queue_prefix, instance_id);
        self.queue
            .modify(&queue_name, &details)
            .await
            .map_err(instance_scoped)
    }

    pub async fn deprovision(&self, instance_id: &str) -> Result<(), BrokerError> {
        debug!(instance_id, "deprovision");

        let queue_name = names::queue_name(&self.config.queue_prefix, instance_id);
        self.queue.delete(&queue_name).await.map_err(instance_scoped)
    }

    /// Bind: describe queue, create user, create access key, resolve the
    /// user's ARN, grant the permission. Every side effect after the
    /// describe records an undo action; any later failure rolls them back in
    /// reverse before the original error is returned.
    pub async fn bind(
        &self,
        instance_id: &str,
        binding_id: &str,
        request: &BindRequest,
    ) -> Result<Credentials, BrokerError> {
        debug!(instance_id, binding_id, ?request, "bind");

        let service = self
            .config
            .catalog
            .find_service(&request.service_id)
            .ok_or_else(|| BrokerError::ServiceNotFound(request.service_id.clone()))?;
        if !service.bindable {
            return Err(BrokerError::NotBindable);
        }

        let queue_name = names::queue_name(&self.config.queue_prefix, instance_id);
        let user_name = names::user_name(&self.config.queue_prefix, binding_id);
        let label = names::permission_label(&self.config.queue_prefix, binding_id);

        // Terminal on failure: nothing has been created yet.
        let queue_details = self
            .queue
            .describe(&queue_name)
            .await
            .map_err(instance_scoped)?;

        self.identity.create(&user_name).await?;
        let mut undo = vec![Undo::DeleteUser];

        match self
            .grant_access(&queue_name, &user_name, &label, &mut undo)
            .await
        {
            Ok(access_key) => Ok(Credentials {
                username: access_key.id,
                password: access_key.secret,
                uri: queue_details.queue_url,
            }),
            Err(err) => {
                self.compensate(&user_name, undo).await;
                Err(err)
            }
        }
    }

    /// Unbind is a forward-only teardown: revoke the grant, delete every
    /// access key, delete the user. Earlier deletions are never undone when
    /// a later step fails; maximal cleanup wins over atomicity here.
    pub async fn unbind(&self, instance_id: &str, binding_id: &str) -> Result<(), BrokerError> {
        debug!(instance_id, binding_id, "unbind");

        let queue_name = names::queue_name(&self.config.queue_prefix, instance_id);
        let user_name = names::user_name(&self.config.queue_prefix, binding_id);
        let label = names::permission_label(&self.config.queue_prefix, binding_id);

        self.queue
            .remove_permission(&queue_name, &label)
            .await
            .map_err(instance_scoped)?;

        for key_id in self.identity.list_access_keys(&user_name).await? {
            self.identity.delete_access_key(&user_name, &key_id).await?;
        }

        self.identity.delete(&user_name).await?;

        Ok(())
    }

    /// This broker provisions synchronously; callers must not poll.
    pub async fn last_operation(&self, instance_id: &str) -> Result<(), BrokerError> {
        debug!(instance_id, "last-operation");

        Err(BrokerError::AsyncNotSupported)
    }

    fn provision_parameters(
        &self,
        raw: Option<&serde_json::Value>,
    ) -> Result<QueueParameters, BrokerError> {
        if self.config.allow_user_provision_parameters {
            QueueParameters::decode(raw)
        } else {
            // Toggle off: caller overrides are ignored entirely, not merely
            // validated away.
            Ok(QueueParameters::default())
        }
    }

    fn update_parameters(
        &self,
        raw: Option<&serde_json::Value>,
    ) -> Result<QueueParameters, BrokerError> {
        if self.config.allow_user_update_parameters {
            QueueParameters::decode(raw)
        } else {
            Ok(QueueParameters::default())
        }
    }

    async fn grant_access(
        &self,
        queue_name: &str,
        user_name: &str,
        label: &str,
        undo: &mut Vec<Undo>,
    ) -> Result<AccessKey, BrokerError> {
        let access_key = self.identity.create_access_key(user_name).await?;
        undo.push(Undo::DeleteAccessKey {
            key_id: access_key.id.clone(),
        });

        let user = self.identity.describe(user_name).await?;

        self.queue
            .add_permission(
                queue_name,
                label,
                std::slice::from_ref(&user.arn),
                &["*".to_string()],
            )
            .await
            .map_err(instance_scoped)?;

        Ok(access_key)
    }

    async fn compensate(&self, user_name: &str, undo: Vec<Undo>) {
        for action in undo.into_iter().rev() {
            let result = match &action {
                Undo::DeleteAccessKey { key_id } => {
                    self.identity.delete_access_key(user_name, key_id).await
                }
                Undo::DeleteUser => self.identity.delete(user_name).await,
            };
            if let Err(err) = result {
                warn!(user_name, %err, "bind-compensation-failed");
            }
        }
    }
}

/// Adapter `NotFound` on an instance-scoped call means the service instance
/// itself is gone.
fn instance_scoped(err: AdapterError) -> BrokerError {
    match err {
        AdapterError::NotFound => BrokerError::InstanceNotFound,
        other => BrokerError::Adapter(other),
    }
}
