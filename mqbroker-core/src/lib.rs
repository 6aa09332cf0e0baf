//! Broker core: adapter contracts, AWS provider implementations, and the
//! lifecycle orchestrator.
//!
//! The orchestrator is stateless and synchronous: every lifecycle call is a
//! self-contained sequence of remote calls against the queue and identity
//! adapters, with the providers as the only source of truth.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mqbroker_core::adapters::{Identity, Queue};
//! use mqbroker_core::{Broker, BrokerConfig};
//!
//! # fn example(config: BrokerConfig, queue: Arc<dyn Queue>, identity: Arc<dyn Identity>) {
//! let broker = Broker::new(config, queue, identity);
//! let catalog = broker.services();
//! # }
//! ```

pub mod adapters;
pub mod broker;
pub mod errors;
pub mod names;
pub mod params;

pub use broker::{Broker, BrokerConfig};
pub use errors::{AdapterError, BrokerError};
