//! In-memory wallet
//!
//! Holds identities for the lifetime of the process. Used when the client
//! is given a raw certificate/key pair instead of a wallet directory, and
//! by tests.

use std::collections::HashMap;

use super::{Wallet, WalletError};
use crate::identity::Identity;

/// In-memory wallet (non-persistent)
#[derive(Debug, Default, Clone)]
pub struct MemoryWallet {
    identities: HashMap<String, Identity>,
}

impl MemoryWallet {
    /// Create an empty wallet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wallet holding exactly one identity
    pub fn with_identity(identity: Identity) -> Self {
        let mut wallet = Self::new();
        wallet.insert(identity);
        wallet
    }

    /// Store an identity; infallible for the in-memory backing
    pub fn insert(&mut self, identity: Identity) {
        self.identities.insert(identity.label().to_string(), identity);
    }
}

impl Wallet for MemoryWallet {
    fn get(&self, label: &str) -> Result<Identity, WalletError> {
        self.identities
            .get(label)
            .cloned()
            .ok_or_else(|| WalletError::NotFound(label.to_string()))
    }

    fn put(&mut self, identity: Identity) -> Result<(), WalletError> {
        self.insert(identity);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        Ok(self.identities.keys().cloned().collect())
    }
}
