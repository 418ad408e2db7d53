//! Directory-backed wallet
//!
//! Opens a pre-existing wallet directory in the external SDK's file
//! layout: one `<label>.id` JSON document per identity. The layout is
//! owned by the SDK; this program only opens and reads it, never writes.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use super::{Wallet, WalletError};
use crate::identity::Identity;

/// One `<label>.id` document in the SDK wallet layout
#[derive(Debug, Deserialize)]
struct IdentityFile {
    credentials: Credentials,
    #[serde(rename = "mspId")]
    msp_id: String,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    certificate: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

/// Read-only wallet backed by an existing directory
#[derive(Debug)]
pub struct FileWallet {
    base_path: PathBuf,
}

impl FileWallet {
    /// Open an existing wallet directory. Never creates one.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let base_path = base_path.into();
        let base_path = std::path::absolute(&base_path).map_err(|source| WalletError::Open {
            path: base_path.clone(),
            source,
        })?;

        let metadata = fs::metadata(&base_path).map_err(|source| WalletError::Open {
            path: base_path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(WalletError::Open {
                path: base_path,
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        debug!(path = %base_path.display(), "opened file wallet");
        Ok(Self { base_path })
    }

    fn entry_path(&self, label: &str) -> PathBuf {
        self.base_path.join(format!("{label}.id"))
    }
}

impl Wallet for FileWallet {
    fn get(&self, label: &str) -> Result<Identity, WalletError> {
        let path = self.entry_path(label);
        if !path.exists() {
            return Err(WalletError::NotFound(label.to_string()));
        }

        let data = fs::read_to_string(&path)?;
        let entry: IdentityFile =
            serde_json::from_str(&data).map_err(|e| WalletError::InvalidEntry {
                label: label.to_string(),
                reason: e.to_string(),
            })?;

        Identity::from_pem(
            label,
            &entry.msp_id,
            &entry.credentials.certificate,
            &entry.credentials.private_key,
        )
        .map_err(|e| WalletError::InvalidEntry {
            label: label.to_string(),
            reason: e.to_string(),
        })
    }

    fn put(&mut self, _identity: Identity) -> Result<(), WalletError> {
        Err(WalletError::ReadOnly(self.base_path.clone()))
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        let mut labels = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let filename = entry.file_name();
            let filename = filename.to_string_lossy();

            if let Some(label) = filename.strip_suffix(".id") {
                labels.push(label.to_string());
            }
        }

        Ok(labels)
    }
}
