//! Client certificate material for authenticated package index access.
//!
//! Where the key, certificate and CA bundle come from is left to a
//! [`CredentialSource`]. The default source reads PEM files named in the
//! settings file.

pub mod combined;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PkiSettings;
use crate::error::{IpydepsError, Result};

pub use combined::{combine_key_and_cert, identity_pem, TemporaryKeyCert};

/// Supplies the private key, certificate and CA bundle.
pub trait CredentialSource {
    /// PEM encoded private key.
    fn private_key_pem(&self) -> Result<Vec<u8>>;

    /// PEM encoded client certificate.
    fn certificate_pem(&self) -> Result<Vec<u8>>;

    /// Path to the PEM encoded CA bundle.
    fn ca_path(&self) -> Result<PathBuf>;
}

/// Credentials stored as PEM files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemFiles {
    key: PathBuf,
    cert: PathBuf,
    ca: PathBuf,
}

impl PemFiles {
    pub fn new(key: impl Into<PathBuf>, cert: impl Into<PathBuf>, ca: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            cert: cert.into(),
            ca: ca.into(),
        }
    }

    /// Build from the `pki` settings section; every path must be set.
    pub fn from_settings(settings: &PkiSettings) -> Result<Self> {
        let missing = |field: &str| IpydepsError::Pki {
            message: format!("pki.{} is not set in the ipydeps config", field),
        };

        Ok(Self::new(
            settings.key.clone().ok_or_else(|| missing("key"))?,
            settings.cert.clone().ok_or_else(|| missing("cert"))?,
            settings.ca.clone().ok_or_else(|| missing("ca"))?,
        ))
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| IpydepsError::Pki {
        message: format!("cannot read {} at {}: {}", what, path.display(), e),
    })
}

impl CredentialSource for PemFiles {
    fn private_key_pem(&self) -> Result<Vec<u8>> {
        read_pem(&self.key, "private key")
    }

    fn certificate_pem(&self) -> Result<Vec<u8>> {
        read_pem(&self.cert, "certificate")
    }

    fn ca_path(&self) -> Result<PathBuf> {
        if self.ca.is_file() {
            Ok(self.ca.clone())
        } else {
            Err(IpydepsError::Pki {
                message: format!("CA bundle not found at {}", self.ca.display()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn from_settings_requires_every_path() {
        let settings = PkiSettings {
            key: Some("key.pem".into()),
            cert: None,
            ca: Some("ca.pem".into()),
        };

        let err = PemFiles::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("pki.cert"));
    }

    #[test]
    fn reads_pem_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("key.pem"), "KEY").unwrap();
        fs::write(temp.path().join("cert.pem"), "CERT").unwrap();
        fs::write(temp.path().join("ca.pem"), "CA").unwrap();

        let files = PemFiles::new(
            temp.path().join("key.pem"),
            temp.path().join("cert.pem"),
            temp.path().join("ca.pem"),
        );

        assert_eq!(files.private_key_pem().unwrap(), b"KEY");
        assert_eq!(files.certificate_pem().unwrap(), b"CERT");
        assert_eq!(files.ca_path().unwrap(), temp.path().join("ca.pem"));
    }

    #[test]
    fn missing_files_are_pki_errors() {
        let files = PemFiles::new("/nope/key.pem", "/nope/cert.pem", "/nope/ca.pem");

        assert!(matches!(files.private_key_pem(), Err(IpydepsError::Pki { .. })));
        assert!(matches!(files.ca_path(), Err(IpydepsError::Pki { .. })));
    }
}
