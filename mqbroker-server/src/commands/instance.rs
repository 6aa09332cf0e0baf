use anyhow::Result;
use mqbroker_models::{ProvisionRequest, UpdateRequest};

pub async fn run_provision(
    instance_id: String,
    service: String,
    plan: String,
    parameters: Option<String>,
) -> Result<()> {
    let broker = super::build_broker().await?;
    let parameters = super::parse_parameters(parameters)?;

    let request = ProvisionRequest {
        service_id: service,
        plan_id: plan,
        parameters,
    };
    broker.provision(&instance_id, &request, false).await?;

    println!("Instance '{instance_id}' provisioned");
    Ok(())
}

pub async fn run_update(
    instance_id: String,
    service: String,
    plan: String,
    parameters: Option<String>,
) -> Result<()> {
    let broker = super::build_broker().await?;
    let parameters = super::parse_parameters(parameters)?;

    let request = UpdateRequest {
        service_id: service,
        plan_id: plan,
        parameters,
        previous_values: None,
    };
    broker.update(&instance_id, &request, false).await?;

    println!("Instance '{instance_id}' updated");
    Ok(())
}

pub async fn run_deprovision(instance_id: String) -> Result<()> {
    let broker = super::build_broker().await?;

    broker.deprovision(&instance_id).await?;

    println!("Instance '{instance_id}' deprovisioned");
    Ok(())
}

pub async fn run_last_operation(instance_id: String) -> Result<()> {
    let broker = super::build_broker().await?;

    // Always fails: the broker never provisions asynchronously.
    broker.last_operation(&instance_id).await?;
    Ok(())
}
