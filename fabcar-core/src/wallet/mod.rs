//! Wallet module
//!
//! A wallet is a keyed collection of identities usable to authenticate
//! gateway connections. Two backings exist: a pre-existing directory in
//! the external SDK's file layout (opened read-only) and an in-memory map
//! built from a certificate/key pair at startup.

use std::path::PathBuf;

use thiserror::Error;

use crate::identity::Identity;

pub mod file_wallet;
pub mod memory_wallet;

pub use file_wallet::FileWallet;
pub use memory_wallet::MemoryWallet;

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Identity not found in wallet: {0}")]
    NotFound(String),

    #[error("Could not open wallet: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid wallet entry for {label}: {reason}")]
    InvalidEntry { label: String, reason: String },

    #[error("Wallet is read-only: {}", .0.display())]
    ReadOnly(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstract wallet trait
pub trait Wallet: Send + Sync {
    /// Load the identity stored under the given label
    fn get(&self, label: &str) -> Result<Identity, WalletError>;

    /// Store an identity under its label
    fn put(&mut self, identity: Identity) -> Result<(), WalletError>;

    /// List all stored labels
    fn list(&self) -> Result<Vec<String>, WalletError>;

    /// Whether an identity exists under the given label
    fn contains(&self, label: &str) -> bool {
        self.get(label).is_ok()
    }
}
