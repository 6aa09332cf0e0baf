use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;

use cli::{Args, Mode};

/// Console tracing with an env-controlled filter; the default keeps the
/// broker crates at debug so every provider call is visible.
fn initialize_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,mqbroker_server=debug,mqbroker_core=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    initialize_tracing();

    match args.mode {
        Mode::Services { output } => commands::catalog::run_services(output).await,
        Mode::Provision {
            instance_id,
            service,
            plan,
            parameters,
        } => commands::instance::run_provision(instance_id, service, plan, parameters).await,
        Mode::Update {
            instance_id,
            service,
            plan,
            parameters,
        } => commands::instance::run_update(instance_id, service, plan, parameters).await,
        Mode::Deprovision { instance_id } => {
            commands::instance::run_deprovision(instance_id).await
        }
        Mode::Bind {
            instance_id,
            binding_id,
            service,
        } => commands::binding::run_bind(instance_id, binding_id, service).await,
        Mode::Unbind {
            instance_id,
            binding_id,
        } => commands::binding::run_unbind(instance_id, binding_id).await,
        Mode::LastOperation { instance_id } => {
            commands::instance::run_last_operation(instance_id).await
        }
    }
}
