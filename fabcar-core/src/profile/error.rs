//! Connection profile error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Connection profile does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read connection profile: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse connection profile: {}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not find mspid in connection profile: {}", .0.display())]
    MissingMspId(PathBuf),

    #[error("Could not find a peer endpoint in connection profile: {}", .0.display())]
    MissingPeer(PathBuf),
}
