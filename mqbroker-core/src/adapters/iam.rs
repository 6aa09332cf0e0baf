//! AWS IAM implementation of the identity adapter.

use async_trait::async_trait;
use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use mqbroker_models::{AccessKey, UserDetails};
use tracing::debug;

use crate::adapters::Identity;
use crate::errors::AdapterError;

#[derive(Debug, Clone)]
pub struct IamUser {
    client: aws_sdk_iam::Client,
}

impl IamUser {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Identity for IamUser {
    async fn describe(&self, user_name: &str) -> Result<UserDetails, AdapterError> {
        debug!(user_name, "get-user");

        let output = self
            .client
            .get_user()
            .user_name(user_name)
            .send()
            .await
            .map_err(normalize)?;

        let user = output
            .user
            .ok_or_else(|| AdapterError::Transport("provider returned no user record".to_string()))?;

        Ok(UserDetails {
            user_name: user.user_name,
            arn: user.arn,
            user_id: user.user_id,
        })
    }

    async fn create(&self, user_name: &str) -> Result<(), AdapterError> {
        debug!(user_name, "create-user");

        self.client
            .create_user()
            .user_name(user_name)
            .send()
            .await
            .map_err(normalize)?;

        Ok(())
    }

    async fn delete(&self, user_name: &str) -> Result<(), AdapterError> {
        debug!(user_name, "delete-user");

        self.client
            .delete_user()
            .user_name(user_name)
            .send()
            .await
            .map_err(normalize)?;

        Ok(())
    }

    async fn list_access_keys(&self, user_name: &str) -> Result<Vec<String>, AdapterError> {
        debug!(user_name, "list-access-keys");

        let output = self
            .client
            .list_access_keys()
            .user_name(user_name)
            .send()
            .await
            .map_err(normalize)?;

        Ok(output
            .access_key_metadata()
            .iter()
            .filter_map(|metadata| metadata.access_key_id().map(str::to_string))
            .collect())
    }

    async fn create_access_key(&self, user_name: &str) -> Result<AccessKey, AdapterError> {
        debug!(user_name, "create-access-key");

        let output = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .map_err(normalize)?;

        let access_key = output
            .access_key
            .ok_or_else(|| AdapterError::Transport("provider returned no access key".to_string()))?;

        Ok(AccessKey {
            id: access_key.access_key_id,
            secret: access_key.secret_access_key,
        })
    }

    async fn delete_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
    ) -> Result<(), AdapterError> {
        debug!(user_name, access_key_id, "delete-access-key");

        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(normalize)?;

        Ok(())
    }
}

/// No implicit not-found mapping here: the orchestrator only touches
/// principals it has just created, so absence is an ordinary provider error.
fn normalize<E>(err: SdkError<E>) -> AdapterError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let code_and_message = err.as_service_error().map(|service| {
        (
            service.code().unwrap_or("Unknown").to_string(),
            service.message().unwrap_or_default().to_string(),
        )
    });

    match code_and_message {
        Some((code, message)) => AdapterError::Provider { code, message },
        None => AdapterError::Transport(DisplayErrorContext(&err).to_string()),
    }
}
