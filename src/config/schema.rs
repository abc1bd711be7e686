//! Settings file schema.
//!
//! Maps `ipydeps.yml` in the config directory. Every field has a default
//! so an absent or empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::python::default_executable;

/// Root settings structure for `ipydeps.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL of the override document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies_link: Option<String>,

    /// Present the client certificate when fetching the override document.
    #[serde(skip_serializing_if = "is_false")]
    pub dependencies_link_requires_pki: bool,

    /// Interpreter whose environment is managed.
    pub python: String,

    /// Pause after invalidating caches, in milliseconds.
    pub settle_delay_ms: u64,

    /// Timeout for the override document request, in seconds.
    pub http_timeout_secs: u64,

    /// Client certificate material.
    #[serde(skip_serializing_if = "PkiSettings::is_empty")]
    pub pki: PkiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dependencies_link: None,
            dependencies_link_requires_pki: false,
            python: default_executable().to_string(),
            settle_delay_ms: 2000,
            http_timeout_secs: 30,
            pki: PkiSettings::default(),
        }
    }
}

/// Paths to PEM encoded key, certificate and CA bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PkiSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<PathBuf>,
}

impl PkiSettings {
    /// Whether no path is configured.
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.cert.is_none() && self.ca.is_none()
    }
}

fn is_false(b: &bool) -> bool {
    !b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.settle_delay_ms, 2000);
        assert_eq!(settings.http_timeout_secs, 30);
    }

    #[test]
    fn parses_full_settings() {
        let yaml = r#"
dependencies_link: https://pkgs.example.com/ipydeps/dependencies.json
dependencies_link_requires_pki: true
python: /opt/conda/bin/python
settle_delay_ms: 0
pki:
  key: /etc/pki/user.key
  cert: /etc/pki/user.crt
  ca: /etc/pki/ca.pem
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            settings.dependencies_link.as_deref(),
            Some("https://pkgs.example.com/ipydeps/dependencies.json")
        );
        assert!(settings.dependencies_link_requires_pki);
        assert_eq!(settings.python, "/opt/conda/bin/python");
        assert_eq!(settings.settle_delay_ms, 0);
        assert_eq!(settings.pki.ca, Some(PathBuf::from("/etc/pki/ca.pem")));
        assert!(!settings.pki.is_empty());
    }

    #[test]
    fn serializes_without_empty_fields() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(!yaml.contains("dependencies_link"));
        assert!(!yaml.contains("pki"));
        assert!(yaml.contains("python"));
    }
}
