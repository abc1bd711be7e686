//! Fetching the override document over HTTP.

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use reqwest::{Certificate, Identity};
use std::fs;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::Result;
use crate::pki::{identity_pem, CredentialSource};

use super::document::OverrideTable;

/// Fetches override documents, optionally presenting a client certificate.
pub struct OverrideFetcher {
    client: Client,
    timeout: Duration,
}

impl OverrideFetcher {
    /// Create an unauthenticated fetcher.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Self::builder(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Create a fetcher that authenticates with the given client
    /// certificate and trusts the given CA bundle.
    pub fn with_credentials(timeout: Duration, credentials: &dyn CredentialSource) -> Result<Self> {
        let identity = Identity::from_pem(&identity_pem(credentials)?)
            .context("Invalid client key or certificate")?;

        let ca_path = credentials.ca_path()?;
        let ca_bundle = fs::read(&ca_path)
            .with_context(|| format!("Failed to read CA bundle {}", ca_path.display()))?;
        let ca_certs = Certificate::from_pem_bundle(&ca_bundle)
            .with_context(|| format!("Invalid CA bundle {}", ca_path.display()))?;

        let mut builder = Self::builder(timeout).identity(identity);
        for cert in ca_certs {
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    fn builder(timeout: Duration) -> reqwest::blocking::ClientBuilder {
        Client::builder()
            .user_agent(concat!("ipydeps/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the raw document body.
    ///
    /// A non-success status is an error carrying the response body, which
    /// usually explains what the server disliked.
    pub fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))?;

        if !status.is_success() {
            bail!("HTTP {} fetching {}: {}", status, url, body.trim());
        }

        Ok(body)
    }

    /// Fetch and parse the override document.
    ///
    /// Network and decode failures are logged and produce an empty table.
    pub fn read_dependencies_json(&self, url: &str) -> OverrideTable {
        debug!("Fetching overrides from {}", url);

        let content = match self.fetch(url) {
            Ok(content) => content,
            Err(e) => {
                error!("{:#}", e);
                return OverrideTable::new();
            }
        };

        match OverrideTable::from_json(&content) {
            Ok(table) => table,
            Err(e) => {
                error!("Invalid dependencies JSON from {}: {}", url, e);
                OverrideTable::new()
            }
        }
    }
}
