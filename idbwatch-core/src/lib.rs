//! Idbwatch Core Library
//!
//! This library enriches lists of IP addresses (or CIDR ranges) with host
//! intelligence from the Shodan InternetDB API, and can compare the results
//! against a previously persisted snapshot to report what changed.
//!
//! # Modules
//!
//! - [`client`] - InternetDB API client and the [`client::Fetcher`] trait
//! - [`pool`] - Bounded-concurrency worker pool with deterministic output order
//! - [`targets`] - Target IP/CIDR/range parsing and expansion
//! - [`snapshot`] - Durable JSON snapshot store
//! - [`diff`] - Snapshot diff engine (new ports / new vulnerabilities)
//! - [`output`] - Text and pair presenters
//! - [`nmap`] - External nmap service-detection runner
//! - [`types`] - Core data structures
//!
//! # Example
//!
//! ```no_run
//! use idbwatch_core::client::InternetDbClient;
//! use idbwatch_core::pool;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(InternetDbClient::new()?);
//! let targets = vec!["8.8.8.8".to_string()];
//! let records = pool::run(targets, 5, client).await;
//! let valid = pool::valid_records(records);
//! println!("{} hosts with data", valid.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod diff;
pub mod error;
pub mod nmap;
pub mod output;
pub mod pool;
pub mod snapshot;
pub mod targets;
pub mod types;

pub use error::{Error, Result};
