//! Key and certificate combined into a single PEM.
//!
//! pip's `--client-cert` and reqwest's identity both want the private key
//! and the certificate in one blob.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

use super::CredentialSource;

/// Concatenate key and certificate PEM, keeping each block on its own lines.
pub fn combine_key_and_cert(key_pem: &[u8], cert_pem: &[u8]) -> Vec<u8> {
    let mut combined = Vec::with_capacity(key_pem.len() + cert_pem.len() + 1);
    combined.extend_from_slice(key_pem);
    if !combined.is_empty() && !combined.ends_with(b"\n") {
        combined.push(b'\n');
    }
    combined.extend_from_slice(cert_pem);
    combined
}

/// Combined key and certificate PEM from `source`.
pub fn identity_pem(source: &dyn CredentialSource) -> Result<Vec<u8>> {
    Ok(combine_key_and_cert(
        &source.private_key_pem()?,
        &source.certificate_pem()?,
    ))
}

/// Combined key and certificate written to a temporary file.
///
/// The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct TemporaryKeyCert {
    file: NamedTempFile,
}

impl TemporaryKeyCert {
    /// Write the combined PEM for `source` to a fresh temporary file.
    pub fn create(source: &dyn CredentialSource) -> Result<Self> {
        let pem = identity_pem(source)?;

        let mut file = tempfile::Builder::new()
            .prefix("ipydeps-")
            .suffix(".pem")
            .tempfile()?;
        file.write_all(&pem)?;
        file.flush()?;

        debug!("Wrote client certificate to {}", file.path().display());
        Ok(Self { file })
    }

    /// Location of the combined PEM.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
