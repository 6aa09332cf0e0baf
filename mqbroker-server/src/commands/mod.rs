use std::sync::Arc;

use anyhow::Result;
use mqbroker_core::adapters::{IamUser, SqsQueue};
use mqbroker_core::{Broker, BrokerConfig};

use crate::config::Config;

pub mod binding;
pub mod catalog;
pub mod instance;

/// Build a broker wired to the real AWS adapters from the environment
/// configuration.
pub async fn build_broker() -> Result<Broker> {
    let config = Config::load()?;
    let catalog = config.load_catalog()?;
    tracing::debug!(
        region = %config.region,
        queue_prefix = %config.queue_prefix,
        services = catalog.services.len(),
        "broker-config-loaded"
    );

    let aws = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let queue = Arc::new(SqsQueue::new(aws_sdk_sqs::Client::new(&aws)));
    let identity = Arc::new(IamUser::new(aws_sdk_iam::Client::new(&aws)));

    Ok(Broker::new(
        BrokerConfig {
            queue_prefix: config.queue_prefix,
            allow_user_provision_parameters: config.allow_user_provision_parameters,
            allow_user_update_parameters: config.allow_user_update_parameters,
            catalog,
        },
        queue,
        identity,
    ))
}

/// Parse the optional `--parameters` JSON payload.
pub fn parse_parameters(raw: Option<String>) -> Result<Option<serde_json::Value>> {
    use anyhow::Context;

    raw.map(|raw| serde_json::from_str(&raw).context("--parameters must be valid JSON"))
        .transpose()
}
