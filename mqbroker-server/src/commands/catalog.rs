use anyhow::Result;

pub async fn run_services(output: String) -> Result<()> {
    let broker = super::build_broker().await?;
    let response = broker.services();

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        // Table format
        println!(
            "{:<14} {:<24} {:<10} {:<12} {:<20}",
            "SERVICE", "NAME", "BINDABLE", "UPDATEABLE", "PLANS"
        );
        println!("{}", "-".repeat(84));

        for service in &response.services {
            let plans = service
                .plans
                .iter()
                .map(|plan| plan.id.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            println!(
                "{:<14} {:<24} {:<10} {:<12} {}",
                service.id, service.name, service.bindable, service.plan_updateable, plans
            );
        }

        println!();
        println!("{} service(s) offered", response.services.len());
    }

    Ok(())
}
