//! Connection profile interpretation
//!
//! The profile is an externally-defined JSON document describing the
//! network topology. It is loaded once, read-only, and only a handful of
//! fields are consumed: the client organization, that organization's MSP
//! id, and (for the shipped HTTP gateway adapter) the URL of the
//! organization's first peer.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

mod error;

pub use error::ProfileError;

/// A loaded network connection profile
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    path: PathBuf,
    document: Value,
}

impl ConnectionProfile {
    /// Load a profile from disk. The path is made absolute and must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = match std::path::absolute(path.as_ref()) {
            Ok(path) => path,
            Err(source) => {
                return Err(ProfileError::Unreadable {
                    path: path.as_ref().to_path_buf(),
                    source,
                })
            }
        };

        if !path.exists() {
            return Err(ProfileError::NotFound(path));
        }

        let data = fs::read_to_string(&path).map_err(|source| ProfileError::Unreadable {
            path: path.clone(),
            source,
        })?;

        let document = serde_json::from_str(&data).map_err(|source| ProfileError::Invalid {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, document })
    }

    /// Absolute path the profile was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The client organization named by the profile, if any
    pub fn organization(&self) -> Option<&str> {
        self.document["client"]["organization"].as_str()
    }

    /// Resolve the MSP id of the client organization.
    ///
    /// Follows `client.organization` into `organizations.<name>.mspid`; an
    /// absent or empty value is a configuration error naming the profile.
    pub fn msp_id(&self) -> Result<String, ProfileError> {
        let org = self.organization().unwrap_or("");
        let msp_id = self.document["organizations"][org]["mspid"]
            .as_str()
            .unwrap_or("");

        if msp_id.is_empty() {
            return Err(ProfileError::MissingMspId(self.path.clone()));
        }

        Ok(msp_id.to_string())
    }

    /// Resolve the HTTP endpoint of the client organization's first peer.
    ///
    /// `organizations.<org>.peers[0]` names an entry under `peers`, whose
    /// `url` field carries a gRPC scheme; `grpcs://` maps to `https://` and
    /// `grpc://` to `http://`.
    pub fn gateway_endpoint(&self) -> Result<String, ProfileError> {
        let org = self.organization().unwrap_or("");

        let peer_name = self.document["organizations"][org]["peers"]
            .as_array()
            .and_then(|peers| peers.first())
            .and_then(Value::as_str);

        let url = peer_name
            .and_then(|name| self.document["peers"][name]["url"].as_str())
            .ok_or_else(|| ProfileError::MissingPeer(self.path.clone()))?;

        if let Some(rest) = url.strip_prefix("grpcs://") {
            Ok(format!("https://{rest}"))
        } else if let Some(rest) = url.strip_prefix("grpc://") {
            Ok(format!("http://{rest}"))
        } else {
            Ok(url.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PROFILE: &str = r#"{
        "client": { "organization": "Org1" },
        "organizations": {
            "Org1": {
                "mspid": "Org1MSP",
                "peers": ["peer0.org1.example.com"]
            }
        },
        "peers": {
            "peer0.org1.example.com": { "url": "grpcs://localhost:7051" }
        }
    }"#;

    fn write_profile(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("connection.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_profile_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-profile.json");

        let err = ConnectionProfile::load(&path).unwrap_err();
        assert!(matches!(err, ProfileError::NotFound(_)));
        assert!(err.to_string().contains("no-such-profile.json"));
    }

    #[test]
    fn test_unparseable_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, "not json at all {");

        let err = ConnectionProfile::load(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Invalid { .. }));
        assert!(err.to_string().contains("connection.json"));
    }

    #[test]
    fn test_msp_id_resolution() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, PROFILE);

        let profile = ConnectionProfile::load(&path).unwrap();
        assert_eq!(profile.organization(), Some("Org1"));
        assert_eq!(profile.msp_id().unwrap(), "Org1MSP");
    }

    #[test]
    fn test_missing_organization_names_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, r#"{ "organizations": {} }"#);

        let profile = ConnectionProfile::load(&path).unwrap();
        let err = profile.msp_id().unwrap_err();
        assert!(matches!(err, ProfileError::MissingMspId(_)));
        assert!(err.to_string().contains("connection.json"));
    }

    #[test]
    fn test_missing_mspid_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(
            &dir,
            r#"{
                "client": { "organization": "Org1" },
                "organizations": { "Org1": {} }
            }"#,
        );

        let profile = ConnectionProfile::load(&path).unwrap();
        assert!(matches!(
            profile.msp_id(),
            Err(ProfileError::MissingMspId(_))
        ));
    }

    #[test]
    fn test_gateway_endpoint_scheme_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(&dir, PROFILE);

        let profile = ConnectionProfile::load(&path).unwrap();
        assert_eq!(
            profile.gateway_endpoint().unwrap(),
            "https://localhost:7051"
        );
    }

    #[test]
    fn test_gateway_endpoint_missing_peer() {
        let dir = TempDir::new().unwrap();
        let path = write_profile(
            &dir,
            r#"{
                "client": { "organization": "Org1" },
                "organizations": { "Org1": { "mspid": "Org1MSP" } }
            }"#,
        );

        let profile = ConnectionProfile::load(&path).unwrap();
        assert!(matches!(
            profile.gateway_endpoint(),
            Err(ProfileError::MissingPeer(_))
        ));
    }
}
