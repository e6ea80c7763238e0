//! Shodan InternetDB API client
//!
//! This module provides the record fetcher: one network lookup per host,
//! parsed into a [`HostRecord`]. The InternetDB API offers free access to
//! basic information about internet-connected devices:
//!
//! - Open ports
//! - Hostnames
//! - Tags (e.g., cloud providers, self-signed certificates)
//! - CPEs (Common Platform Enumeration identifiers)
//! - Vulnerabilities (CVEs)
//!
//! Failure is a data value here, not an exception: any transport or parse
//! failure degrades to the sentinel record, so the worker pool never has to
//! special-case errors. A lookup is all-or-nothing; there are no retries and
//! no partial-record recovery.
//!
//! # Example
//!
//! ```no_run
//! use idbwatch_core::client::{Fetcher, InternetDbClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InternetDbClient::new()?;
//! let record = client.fetch("8.8.8.8").await;
//! if record.is_present() {
//!     println!("Open ports: {:?}", record.ports);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::types::HostRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const INTERNETDB_API_BASE: &str = "https://internetdb.shodan.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A single-host record lookup
///
/// Implementations never fail: a lookup that cannot produce a valid record
/// returns [`HostRecord::empty`]. The worker pool is generic over this trait
/// so tests can substitute deterministic fetchers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Resolves one host identifier to its record, or the sentinel on failure
    async fn fetch(&self, target: &str) -> HostRecord;
}

/// Client for querying the Shodan InternetDB API
#[derive(Debug, Clone)]
pub struct InternetDbClient {
    client: Client,
    base_url: String,
}

impl InternetDbClient {
    /// Creates a new InternetDB client with the default endpoint and timeout
    ///
    /// # Examples
    ///
    /// ```
    /// use idbwatch_core::client::InternetDbClient;
    ///
    /// let client = InternetDbClient::new()?;
    /// # Ok::<(), idbwatch_core::error::Error>(())
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_base_url(INTERNETDB_API_BASE)
    }

    /// Creates a client against a custom endpoint
    ///
    /// Used by tests to point the client at a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Performs the single lookup attempt behind [`Fetcher::fetch`]
    async fn query_once(&self, target: &str) -> Result<HostRecord> {
        let url = format!("{}/{}", self.base_url, target);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // 404 carries a {"detail": ...} body; anything non-success means
            // no record for this host.
            debug!(%status, host = target, "lookup returned no data");
            return Ok(HostRecord::empty());
        }

        let record = serde_json::from_str::<HostRecord>(&body)?;
        Ok(record)
    }
}

#[async_trait]
impl Fetcher for InternetDbClient {
    async fn fetch(&self, target: &str) -> HostRecord {
        match self.query_once(target).await {
            Ok(record) => record,
            Err(e) => {
                debug!(host = target, error = %e, "lookup failed");
                HostRecord::empty()
            }
        }
    }
}
