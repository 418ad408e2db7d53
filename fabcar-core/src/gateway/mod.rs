//! Gateway abstraction
//!
//! The narrow seam between this client and the external gateway SDK. The
//! ledger-side machinery (endorsement, ordering, peer discovery, TLS) is
//! entirely the remote collaborator's concern; these traits only describe
//! how the client uses it: connect, obtain a contract handle, evaluate or
//! submit named transactions, and observe structured failures that may
//! carry a response payload.
//!
//! Connections are scoped resources: dropping a [`Connection`] releases
//! the session, so release happens exactly once on every exit path.

use crate::profile::ConnectionProfile;
use crate::wallet::Wallet;

mod error;

pub mod http;
pub mod mock;

pub use error::GatewayError;
pub use http::HttpGateway;
pub use mock::MockGateway;

/// Options for opening a gateway connection
pub struct ConnectOptions<'a> {
    /// Wallet holding the authenticating identity
    pub wallet: &'a dyn Wallet,
    /// Label of the identity to authenticate as
    pub identity: &'a str,
    /// Network connection profile
    pub profile: &'a ConnectionProfile,
    /// Whether the remote side should use peer discovery
    pub discovery: bool,
}

/// Entry point to a gateway implementation
pub trait Gateway {
    /// Open an authenticated session to the ledger network
    fn connect(&self, options: ConnectOptions<'_>) -> Result<Box<dyn Connection>, GatewayError>;
}

/// An open, exclusively-owned session; dropped to release it
pub trait Connection {
    /// Obtain a handle to a named contract on a named channel
    fn contract(&self, channel: &str, name: &str)
        -> Result<Box<dyn Contract + '_>, GatewayError>;
}

/// A handle to one deployed contract
pub trait Contract {
    /// Read-only invocation; no ledger state change
    fn evaluate(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError>;

    /// State-changing invocation, endorsed and ordered by the network
    fn submit(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError>;
}
