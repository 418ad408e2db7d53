//! Argument/identity resolution
//!
//! Turns the fixed-arity command line into an immutable bundle of
//! everything the driver needs: the loaded connection profile, the
//! identity label, the resolved MSP id, and a wallet guaranteed to hold
//! (or be constructed to hold) that identity. Arity selects the wallet
//! mode: three arguments name an existing wallet directory, four name a
//! certificate and private key pair.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::identity::{Identity, IdentityError};
use crate::profile::{ConnectionProfile, ProfileError};
use crate::wallet::{FileWallet, MemoryWallet, Wallet, WalletError};

/// Usage string shown for a wrong argument count
pub const USAGE: &str = "Usage:\n\
    \tfabcar <connectionProfile> <identity> <walletDir>\n\
    \tfabcar <connectionProfile> <identity> <certificate> <privateKey>";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{}", USAGE)]
    Usage,

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("Could not open wallet: {}", .path.display())]
    WalletOpen {
        path: PathBuf,
        #[source]
        source: WalletError,
    },

    #[error(
        "Could not create wallet for {label} using the specified certificate and private key files: {} {}",
        .certificate.display(),
        .private_key.display()
    )]
    Credentials {
        label: String,
        certificate: PathBuf,
        private_key: PathBuf,
        #[source]
        source: IdentityError,
    },
}

/// Where the credential material comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// An existing wallet directory, opened read-only
    WalletDir(PathBuf),
    /// A raw certificate and private key pair, loaded into memory
    CertificateKey {
        certificate: PathBuf,
        private_key: PathBuf,
    },
}

impl CredentialSource {
    /// Select the mode from a raw argument array (program name excluded).
    ///
    /// Raises a usage error for any arity other than 3 or 4, before
    /// touching the filesystem.
    pub fn from_args(args: &[String]) -> Result<Self, ResolveError> {
        match args.len() {
            3 => Ok(CredentialSource::WalletDir(PathBuf::from(&args[2]))),
            4 => Ok(CredentialSource::CertificateKey {
                certificate: PathBuf::from(&args[2]),
                private_key: PathBuf::from(&args[3]),
            }),
            _ => Err(ResolveError::Usage),
        }
    }
}

/// Immutable bundle consumed by the transaction driver
pub struct ClientOptions {
    profile: ConnectionProfile,
    identity: String,
    msp_id: String,
    wallet: Box<dyn Wallet>,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("profile", &self.profile)
            .field("identity", &self.identity)
            .field("msp_id", &self.msp_id)
            .field("wallet", &"<dyn Wallet>")
            .finish()
    }
}

impl ClientOptions {
    /// Resolve a raw argument array (program name excluded)
    pub fn from_args(args: &[String]) -> Result<Self, ResolveError> {
        let source = CredentialSource::from_args(args)?;
        Self::resolve(&args[0], &args[1], source)
    }

    /// Resolve the bundle: load the profile, extract the MSP id, and
    /// open or construct the wallet for the given credential source.
    pub fn resolve(
        profile_path: impl AsRef<Path>,
        identity: &str,
        source: CredentialSource,
    ) -> Result<Self, ResolveError> {
        let profile = ConnectionProfile::load(profile_path)?;
        let msp_id = profile.msp_id()?;
        debug!(identity = identity, msp_id = %msp_id, "resolved organization");

        let wallet: Box<dyn Wallet> = match source {
            CredentialSource::WalletDir(path) => {
                let wallet =
                    FileWallet::open(&path).map_err(|source| ResolveError::WalletOpen {
                        path: path.clone(),
                        source,
                    })?;
                Box::new(wallet)
            }
            CredentialSource::CertificateKey {
                certificate,
                private_key,
            } => {
                let record =
                    Identity::from_pem_files(identity, &msp_id, &certificate, &private_key)
                        .map_err(|source| ResolveError::Credentials {
                            label: identity.to_string(),
                            certificate: certificate.clone(),
                            private_key: private_key.clone(),
                            source,
                        })?;
                Box::new(MemoryWallet::with_identity(record))
            }
        };

        Ok(Self {
            profile,
            identity: identity.to_string(),
            msp_id,
            wallet,
        })
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    pub fn identity_label(&self) -> &str {
        &self.identity
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn wallet(&self) -> &dyn Wallet {
        self.wallet.as_ref()
    }
}
