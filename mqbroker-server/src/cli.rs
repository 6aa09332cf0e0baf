use clap::{Parser, Subcommand};

/// Message-queue service broker - lifecycle operations against AWS SQS/IAM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// List the service catalog
    Services {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Provision a service instance (creates the backing queue)
    Provision {
        /// Instance id; the queue is named <prefix>-<instance-id>
        instance_id: String,

        /// Catalog service id
        #[arg(long)]
        service: String,

        /// Catalog plan id
        #[arg(long)]
        plan: String,

        /// Caller parameter overrides as a JSON object
        #[arg(long)]
        parameters: Option<String>,
    },

    /// Update a provisioned instance to a plan's queue attributes
    Update {
        /// Instance id
        instance_id: String,

        /// Catalog service id
        #[arg(long)]
        service: String,

        /// Catalog plan id
        #[arg(long)]
        plan: String,

        /// Caller parameter overrides as a JSON object
        #[arg(long)]
        parameters: Option<String>,
    },

    /// Deprovision a service instance (deletes the backing queue)
    Deprovision {
        /// Instance id
        instance_id: String,
    },

    /// Bind: create a dedicated user, credentials, and a queue grant
    Bind {
        /// Instance id
        instance_id: String,

        /// Binding id; user and grant label are named <prefix>-<binding-id>
        binding_id: String,

        /// Catalog service id
        #[arg(long)]
        service: String,
    },

    /// Unbind: revoke the grant and delete the binding's credentials/user
    Unbind {
        /// Instance id
        instance_id: String,

        /// Binding id
        binding_id: String,
    },

    /// Poll an asynchronous operation (this broker is always synchronous)
    LastOperation {
        /// Instance id
        instance_id: String,
    },
}
