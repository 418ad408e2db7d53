//! HTTP gateway adapter
//!
//! The shipped stand-in for the external gateway SDK: blocking JSON calls
//! to a gateway proxy. `POST <endpoint>/evaluate` and `POST
//! <endpoint>/submit` carry the channel, contract, transaction name,
//! arguments and the caller's credential material; a non-2xx response with
//! a `{message, payload?}` body is a contract-level rejection, anything
//! else a transport failure. The endpoint comes from the connection
//! profile's first organization peer.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConnectOptions, Connection, Contract, Gateway, GatewayError};
use crate::identity::Identity;

/// Gateway implementation speaking JSON over HTTP(S)
#[derive(Debug, Default, Clone)]
pub struct HttpGateway {
    client: Client,
}

impl HttpGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Gateway for HttpGateway {
    fn connect(&self, options: ConnectOptions<'_>) -> Result<Box<dyn Connection>, GatewayError> {
        let identity = options
            .wallet
            .get(options.identity)
            .map_err(|e| GatewayError::Identity(e.to_string()))?;

        let endpoint = options
            .profile
            .gateway_endpoint()
            .map_err(|e| GatewayError::Connect(e.to_string()))?;

        debug!(endpoint = %endpoint, identity = %identity.label(), "opening gateway connection");

        Ok(Box::new(HttpConnection {
            client: self.client.clone(),
            endpoint,
            identity,
            discovery: options.discovery,
        }))
    }
}

struct HttpConnection {
    client: Client,
    endpoint: String,
    identity: Identity,
    discovery: bool,
}

impl Connection for HttpConnection {
    fn contract(
        &self,
        channel: &str,
        name: &str,
    ) -> Result<Box<dyn Contract + '_>, GatewayError> {
        Ok(Box::new(HttpContract {
            connection: self,
            channel: channel.to_string(),
            name: name.to_string(),
        }))
    }
}

impl Drop for HttpConnection {
    fn drop(&mut self) {
        debug!(endpoint = %self.endpoint, "gateway connection released");
    }
}

struct HttpContract<'a> {
    connection: &'a HttpConnection,
    channel: String,
    name: String,
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    channel: &'a str,
    contract: &'a str,
    transaction: &'a str,
    args: &'a [&'a str],
    #[serde(rename = "mspId")]
    msp_id: &'a str,
    certificate: &'a str,
    discovery: bool,
}

#[derive(Deserialize)]
struct RejectionBody {
    message: String,
    payload: Option<String>,
}

/// Map a non-2xx proxy response to the structured failure type
fn rejection(transaction: &str, status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<RejectionBody>(body) {
        Ok(rejection) => GatewayError::ContractRejected {
            transaction: transaction.to_string(),
            message: rejection.message,
            payload: rejection.payload.map(String::into_bytes),
        },
        Err(_) => GatewayError::Transport {
            transaction: transaction.to_string(),
            reason: format!("{status}: {body}"),
        },
    }
}

impl HttpContract<'_> {
    fn invoke(
        &self,
        operation: &str,
        transaction: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let connection = self.connection;
        let url = format!(
            "{}/{operation}",
            connection.endpoint.trim_end_matches('/')
        );

        let request = InvokeRequest {
            channel: &self.channel,
            contract: &self.name,
            transaction,
            args,
            msp_id: connection.identity.msp_id(),
            certificate: connection.identity.certificate_pem(),
            discovery: connection.discovery,
        };

        debug!(url = %url, transaction = transaction, "invoking transaction");

        let response = connection
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| GatewayError::Transport {
                transaction: transaction.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().map_err(|e| GatewayError::Transport {
                transaction: transaction.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(bytes.to_vec());
        }

        let body = response.text().unwrap_or_default();
        Err(rejection(transaction, status, &body))
    }
}

impl Contract for HttpContract<'_> {
    fn evaluate(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.invoke("evaluate", transaction, args)
    }

    fn submit(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.invoke("submit", transaction, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_body_with_payload() {
        let err = rejection(
            "queryCar",
            StatusCode::BAD_REQUEST,
            r#"{"message":"car not found","payload":"CAR999 does not exist"}"#,
        );
        match err {
            GatewayError::ContractRejected {
                transaction,
                message,
                payload,
            } => {
                assert_eq!(transaction, "queryCar");
                assert_eq!(message, "car not found");
                assert_eq!(payload.as_deref(), Some(&b"CAR999 does not exist"[..]));
            }
            other => panic!("expected ContractRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_body_without_payload() {
        let err = rejection(
            "queryCar",
            StatusCode::BAD_REQUEST,
            r#"{"message":"car not found"}"#,
        );
        assert!(matches!(
            err,
            GatewayError::ContractRejected { payload: None, .. }
        ));
    }

    #[test]
    fn test_unstructured_failure_is_transport() {
        let err = rejection("queryCar", StatusCode::BAD_GATEWAY, "upstream unavailable");
        match err {
            GatewayError::Transport { reason, .. } => {
                assert!(reason.contains("502"));
                assert!(reason.contains("upstream unavailable"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }
}
