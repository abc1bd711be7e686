//! Per-package override commands.
//!
//! Some packages need something other than a plain `pip install` on some
//! interpreters: a pinned version, a conda package, a pre-built wheel. A
//! site publishes those substitutions as a JSON document, which is fetched
//! once per install run.
//!
//! - [`document`] - document parsing and resolution by version tag
//! - [`fetch`] - HTTP retrieval, optionally with a client certificate
//! - [`run`] - executing the resolved commands

pub mod document;
pub mod fetch;
pub mod run;

use std::time::Duration;

use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::pki::CredentialSource;

pub use document::{
    case_insensitive_dependencies_json, OverrideCommand, OverrideCommands, OverrideTable,
    RawOverrideDocument,
};
pub use fetch::OverrideFetcher;
pub use run::{run_and_log_error, run_overrides};

/// Fetch the override table described by `settings`.
///
/// With no `dependencies_link` configured the table is empty. Credentials
/// are only consulted when `dependencies_link_requires_pki` is set.
pub fn load_overrides(
    settings: &Settings,
    credentials: Option<&dyn CredentialSource>,
) -> Result<OverrideTable> {
    let Some(url) = settings.dependencies_link.as_deref() else {
        debug!("No dependencies_link configured, skipping overrides");
        return Ok(OverrideTable::new());
    };

    let timeout = Duration::from_secs(settings.http_timeout_secs);

    let fetcher = match (settings.dependencies_link_requires_pki, credentials) {
        (true, Some(credentials)) => OverrideFetcher::with_credentials(timeout, credentials)?,
        (true, None) => {
            return Err(crate::error::IpydepsError::Pki {
                message: "dependencies_link_requires_pki is set but no credentials are configured"
                    .to_string(),
            })
        }
        (false, _) => OverrideFetcher::new(timeout)?,
    };

    Ok(fetcher.read_dependencies_json(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn no_link_means_no_overrides() {
        let settings = Settings::default();
        assert!(load_overrides(&settings, None).unwrap().is_empty());
    }

    #[test]
    fn pki_without_credentials_is_an_error() {
        let settings = Settings {
            dependencies_link: Some("https://example.invalid/deps.json".into()),
            dependencies_link_requires_pki: true,
            ..Default::default()
        };

        assert!(load_overrides(&settings, None).is_err());
    }

    #[test]
    fn fetches_configured_link() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/deps.json");
            then.status(200).body(r#"{"python-3": {"gdal": [["echo", "gdal"]]}}"#);
        });

        let settings = Settings {
            dependencies_link: Some(server.url("/deps.json")),
            ..Default::default()
        };

        let table = load_overrides(&settings, None).unwrap();
        assert!(table.version("python-3").unwrap().contains_key("gdal"));
    }
}
