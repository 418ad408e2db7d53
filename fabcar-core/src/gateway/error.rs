//! Gateway error types

use thiserror::Error;

/// Failures observed at the gateway seam
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The connection could not be opened
    #[error("Could not connect to gateway: {0}")]
    Connect(String),

    /// The authenticating identity was not available
    #[error("Identity not available for connection: {0}")]
    Identity(String),

    /// Any non-contract failure while the connection is open
    #[error("Transport failure during {transaction}: {reason}")]
    Transport { transaction: String, reason: String },

    /// The network rejected an evaluated or submitted transaction.
    ///
    /// `payload` carries the first available response payload bytes from
    /// the failure detail, when the remote side provided one.
    #[error("Transaction {transaction} was rejected: {message}")]
    ContractRejected {
        transaction: String,
        message: String,
        payload: Option<Vec<u8>>,
    },
}

impl GatewayError {
    /// Response payload bytes of a contract rejection, if any
    pub fn rejection_payload(&self) -> Option<&[u8]> {
        match self {
            GatewayError::ContractRejected {
                payload: Some(bytes),
                ..
            } => Some(bytes),
            _ => None,
        }
    }
}
