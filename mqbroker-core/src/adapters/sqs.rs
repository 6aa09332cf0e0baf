//! AWS SQS implementation of the queue adapter.

use async_trait::async_trait;
use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sqs::types::QueueAttributeName;
use mqbroker_models::QueueDetails;
use tracing::debug;

use crate::adapters::Queue;
use crate::errors::AdapterError;

/// Error code SQS reports for operations against a queue that is gone.
/// The name lookup itself fails with the modeled `QueueDoesNotExist` error;
/// this code shows up when a resolved URL goes stale underneath us.
const NON_EXISTENT_QUEUE: &str = "AWS.SimpleQueueService.NonExistentQueue";

#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: aws_sdk_sqs::Client,
}

impl SqsQueue {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }

    async fn queue_url(&self, queue_name: &str) -> Result<String, AdapterError> {
        debug!(queue_name, "get-queue-url");

        let output = self
            .client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|err| {
                if matches!(err.as_service_error(), Some(e) if e.is_queue_does_not_exist()) {
                    AdapterError::NotFound
                } else {
                    normalize(err)
                }
            })?;

        output
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| AdapterError::Transport("provider returned no queue url".to_string()))
    }

    async fn set_queue_attributes(
        &self,
        queue_url: &str,
        details: &QueueDetails,
    ) -> Result<(), AdapterError> {
        debug!(queue_url, ?details, "set-queue-attributes");

        let mut request = self.client.set_queue_attributes().queue_url(queue_url);
        for (name, value) in attribute_pairs(details) {
            request = request.attributes(name, value);
        }
        request.send().await.map_err(normalize)?;

        Ok(())
    }
}

#[async_trait]
impl Queue for SqsQueue {
    async fn describe(&self, queue_name: &str) -> Result<QueueDetails, AdapterError> {
        let queue_url = self.queue_url(queue_name).await?;
        debug!(queue_name, queue_url, "get-queue-attributes");

        let output = self
            .client
            .get_queue_attributes()
            .queue_url(&queue_url)
            .attribute_names(QueueAttributeName::All)
            .send()
            .await
            .map_err(normalize)?;

        let attributes = output.attributes.unwrap_or_default();
        let attribute =
            |name: &QueueAttributeName| attributes.get(name).cloned().unwrap_or_default();

        Ok(QueueDetails {
            queue_arn: attribute(&QueueAttributeName::QueueArn),
            delay_seconds: attribute(&QueueAttributeName::DelaySeconds),
            maximum_message_size: attribute(&QueueAttributeName::MaximumMessageSize),
            message_retention_period: attribute(&QueueAttributeName::MessageRetentionPeriod),
            policy: attribute(&QueueAttributeName::Policy),
            receive_message_wait_time_seconds: attribute(
                &QueueAttributeName::ReceiveMessageWaitTimeSeconds,
            ),
            visibility_timeout: attribute(&QueueAttributeName::VisibilityTimeout),
            queue_url,
        })
    }

    async fn create(&self, queue_name: &str, details: &QueueDetails) -> Result<(), AdapterError> {
        debug!(queue_name, ?details, "create-queue");

        let mut request = self.client.create_queue().queue_name(queue_name);
        for (name, value) in attribute_pairs(details) {
            request = request.attributes(name, value);
        }
        request.send().await.map_err(normalize)?;

        Ok(())
    }

    async fn modify(&self, queue_name: &str, details: &QueueDetails) -> Result<(), AdapterError> {
        let queue_url = self.queue_url(queue_name).await?;
        self.set_queue_attributes(&queue_url, details).await
    }

    async fn delete(&self, queue_name: &str) -> Result<(), AdapterError> {
        let queue_url = self.queue_url(queue_name).await?;
        debug!(queue_name, queue_url, "delete-queue");

        self.client
            .delete_queue()
            .queue_url(&queue_url)
            .send()
            .await
            .map_err(normalize)?;

        Ok(())
    }

    async fn add_permission(
        &self,
        queue_name: &str,
        label: &str,
        principal_arns: &[String],
        actions: &[String],
    ) -> Result<(), AdapterError> {
        let queue_url = self.queue_url(queue_name).await?;
        debug!(queue_name, label, ?principal_arns, ?actions, "add-permission");

        let mut request = self
            .client
            .add_permission()
            .queue_url(&queue_url)
            .label(label);
        for principal in principal_arns {
            request = request.aws_account_ids(account_id(principal));
        }
        for action in actions {
            request = request.actions(action);
        }
        request.send().await.map_err(normalize)?;

        Ok(())
    }

    async fn remove_permission(&self, queue_name: &str, label: &str) -> Result<(), AdapterError> {
        let queue_url = self.queue_url(queue_name).await?;
        debug!(queue_name, label, "remove-permission");

        self.client
            .remove_permission()
            .queue_url(&queue_url)
            .label(label)
            .send()
            .await
            .map_err(normalize)?;

        Ok(())
    }
}

/// Attributes to send for a create/modify: only the non-empty subset, so
/// absent attributes stay at provider defaults.
fn attribute_pairs(details: &QueueDetails) -> Vec<(QueueAttributeName, String)> {
    let mut pairs = Vec::new();
    let mut push = |name: QueueAttributeName, value: &str| {
        if !value.is_empty() {
            pairs.push((name, value.to_string()));
        }
    };

    push(QueueAttributeName::DelaySeconds, &details.delay_seconds);
    push(
        QueueAttributeName::MaximumMessageSize,
        &details.maximum_message_size,
    );
    push(
        QueueAttributeName::MessageRetentionPeriod,
        &details.message_retention_period,
    );
    push(QueueAttributeName::Policy, &details.policy);
    push(
        QueueAttributeName::ReceiveMessageWaitTimeSeconds,
        &details.receive_message_wait_time_seconds,
    );
    push(
        QueueAttributeName::VisibilityTimeout,
        &details.visibility_timeout,
    );

    pairs
}

/// The SQS permission API addresses principals by account id. Callers hand
/// us full principal ARNs (`arn:aws:iam::123456789012:user/name`); reduce
/// them to the account part, passing anything unrecognized through as-is.
fn account_id(principal: &str) -> &str {
    principal
        .split(':')
        .nth(4)
        .filter(|part| !part.is_empty())
        .unwrap_or(principal)
}

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
        Some((code, _)) if code == NON_EXISTENT_QUEUE || code == "QueueDoesNotExist" => {
            AdapterError::NotFound
        }
        Some((code, message)) => AdapterError::Provider { code, message },
        None => AdapterError::Transport(DisplayErrorContext(&err).to_string()),
    }
}
