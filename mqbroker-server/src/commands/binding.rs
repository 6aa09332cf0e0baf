use anyhow::Result;
use mqbroker_models::BindRequest;

pub async fn run_bind(instance_id: String, binding_id: String, service: String) -> Result<()> {
    let broker = super::build_broker().await?;

    let request = BindRequest {
        service_id: service,
        ..BindRequest::default()
    };
    let credentials = broker.bind(&instance_id, &binding_id, &request).await?;

    // The secret is shown exactly once; it cannot be recovered later.
    println!("{}", serde_json::to_string_pretty(&credentials)?);
    Ok(())
}

pub async fn run_unbind(instance_id: String, binding_id: String) -> Result<()> {
    let broker = super::build_broker().await?;

    broker.unbind(&instance_id, &binding_id).await?;

    println!("Binding '{binding_id}' removed from instance '{instance_id}'");
    Ok(())
}
