//! Scripted transaction driver
//!
//! Runs the fixed fabcar demo sequence against a resolved client bundle:
//! query the full car list, create a car, query it, change its owner, and
//! finally query a car that is not expected to exist. The last query is
//! the only call that recovers from a contract-level rejection; it prints
//! the failure message and the response payload instead of propagating.
//!
//! The gateway connection is scoped to this sequence and released by drop
//! on every exit path.

use std::io::Write;

use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::{ConnectOptions, Gateway, GatewayError};
use crate::resolver::ClientOptions;

/// Channel the sample contract is deployed on
pub const CHANNEL: &str = "mychannel";

/// Name of the sample contract
pub const CONTRACT: &str = "fabcar";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Could not write transaction output: {0}")]
    Output(#[from] std::io::Error),
}

/// Run the scripted call sequence, writing each result to `out`.
pub fn run(
    gateway: &dyn Gateway,
    options: &ClientOptions,
    out: &mut dyn Write,
) -> Result<(), DriverError> {
    let connection = gateway.connect(ConnectOptions {
        wallet: options.wallet(),
        identity: options.identity_label(),
        profile: options.profile(),
        discovery: true,
    })?;
    info!(channel = CHANNEL, contract = CONTRACT, "connected to gateway");

    let contract = connection.contract(CHANNEL, CONTRACT)?;

    let result = contract.evaluate("queryAllCars", &[])?;
    writeln!(out, "{}", String::from_utf8_lossy(&result))?;

    contract.submit("createCar", &["CAR10", "VW", "Polo", "Grey", "Mary"])?;
    debug!(car = "CAR10", "created car");

    let result = contract.evaluate("queryCar", &["CAR10"])?;
    writeln!(out, "{}", String::from_utf8_lossy(&result))?;

    contract.submit("changeCarOwner", &["CAR10", "Archie"])?;
    debug!(car = "CAR10", owner = "Archie", "changed car owner");

    match contract.evaluate("queryCar", &["CAR999"]) {
        Ok(result) => writeln!(out, "{}", String::from_utf8_lossy(&result))?,
        Err(GatewayError::ContractRejected {
            message, payload, ..
        }) => {
            writeln!(out, "MESSAGE {message}")?;
            match payload {
                Some(bytes) => writeln!(out, "PAYLOAD {}", String::from_utf8_lossy(&bytes))?,
                None => writeln!(out, "PAYLOAD null")?,
            }
        }
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
