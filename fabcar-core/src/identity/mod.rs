//! Identity records
//!
//! An identity is the credential material used to authenticate a gateway
//! connection: a label, the owning organization's MSP id, and an X.509
//! certificate plus private key in PEM form. Identities are constructed
//! once at startup and immutable thereafter; the actual signing happens on
//! the other side of the gateway seam.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use x509_parser::prelude::*;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Could not read {what} for {label}: {}", .path.display())]
    Unreadable {
        label: String,
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid certificate for {label}: {reason}")]
    InvalidCertificate { label: String, reason: String },

    #[error("Invalid private key for {label}: {reason}")]
    InvalidPrivateKey { label: String, reason: String },
}

/// An immutable identity record
#[derive(Debug, Clone)]
pub struct Identity {
    label: String,
    msp_id: String,
    certificate: String,
    private_key: String,
}

impl Identity {
    /// Build an identity from PEM text, validating both credential blocks.
    ///
    /// The certificate must be a `CERTIFICATE` block containing a parseable
    /// X.509 document; the key must be a PKCS#8 `PRIVATE KEY` or SEC1
    /// `EC PRIVATE KEY` block.
    pub fn from_pem(
        label: &str,
        msp_id: &str,
        certificate_pem: &str,
        private_key_pem: &str,
    ) -> Result<Self, IdentityError> {
        let certificate = ::pem::parse(certificate_pem).map_err(|e| {
            IdentityError::InvalidCertificate {
                label: label.to_string(),
                reason: e.to_string(),
            }
        })?;
        if certificate.tag != "CERTIFICATE" {
            return Err(IdentityError::InvalidCertificate {
                label: label.to_string(),
                reason: format!("unexpected PEM tag: {}", certificate.tag),
            });
        }
        parse_x509_certificate(&certificate.contents).map_err(|e| {
            IdentityError::InvalidCertificate {
                label: label.to_string(),
                reason: e.to_string(),
            }
        })?;

        let key = ::pem::parse(private_key_pem).map_err(|e| IdentityError::InvalidPrivateKey {
            label: label.to_string(),
            reason: e.to_string(),
        })?;
        if key.tag != "PRIVATE KEY" && key.tag != "EC PRIVATE KEY" {
            return Err(IdentityError::InvalidPrivateKey {
                label: label.to_string(),
                reason: format!("unexpected PEM tag: {}", key.tag),
            });
        }
        if key.contents.is_empty() {
            return Err(IdentityError::InvalidPrivateKey {
                label: label.to_string(),
                reason: "empty key material".to_string(),
            });
        }

        Ok(Self {
            label: label.to_string(),
            msp_id: msp_id.to_string(),
            certificate: certificate_pem.to_string(),
            private_key: private_key_pem.to_string(),
        })
    }

    /// Build an identity by reading certificate and key files.
    ///
    /// Each file is read in full before any parsing happens, so the
    /// handles are closed on every path, including parse failure.
    pub fn from_pem_files(
        label: &str,
        msp_id: &str,
        certificate_path: impl AsRef<Path>,
        private_key_path: impl AsRef<Path>,
    ) -> Result<Self, IdentityError> {
        let certificate_path = certificate_path.as_ref();
        let private_key_path = private_key_path.as_ref();

        let certificate_pem =
            fs::read_to_string(certificate_path).map_err(|source| IdentityError::Unreadable {
                label: label.to_string(),
                what: "certificate",
                path: certificate_path.to_path_buf(),
                source,
            })?;
        let private_key_pem =
            fs::read_to_string(private_key_path).map_err(|source| IdentityError::Unreadable {
                label: label.to_string(),
                what: "private key",
                path: private_key_path.to_path_buf(),
                source,
            })?;

        Self::from_pem(label, msp_id, &certificate_pem, &private_key_pem)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn certificate_pem(&self) -> &str {
        &self.certificate
    }

    pub fn private_key_pem(&self) -> &str {
        &self.private_key
    }
}
