//! Mock gateway for testing
//!
//! Substitutes the external gateway SDK behind the same seam: responses
//! are scripted per transaction name, and the mock records the call
//! sequence plus how often connections were opened and released.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{ConnectOptions, Connection, Contract, Gateway, GatewayError};

/// Scripted outcome for one invocation
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return these bytes
    Success(Vec<u8>),
    /// Reject at contract level, optionally with a response payload
    Rejected {
        message: String,
        payload: Option<Vec<u8>>,
    },
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, VecDeque<MockOutcome>>,
    calls: Vec<String>,
    connects: usize,
    releases: usize,
}

/// Mock gateway with scripted responses
#[derive(Debug, Default, Clone)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next invocation of `transaction`.
    ///
    /// Outcomes queue per transaction name; an invocation with no queued
    /// outcome succeeds with empty bytes.
    pub fn respond(&self, transaction: &str, outcome: MockOutcome) {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(transaction.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// The invocations observed so far, as `"<operation> <transaction> <args...>"`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn connect_count(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases
    }
}

impl Gateway for MockGateway {
    fn connect(&self, options: ConnectOptions<'_>) -> Result<Box<dyn Connection>, GatewayError> {
        // The wallet must hold the identity before it can authenticate
        options
            .wallet
            .get(options.identity)
            .map_err(|e| GatewayError::Identity(e.to_string()))?;

        self.state.lock().unwrap().connects += 1;

        Ok(Box::new(MockConnection {
            state: self.state.clone(),
        }))
    }
}

struct MockConnection {
    state: Arc<Mutex<MockState>>,
}

impl Connection for MockConnection {
    fn contract(
        &self,
        _channel: &str,
        _name: &str,
    ) -> Result<Box<dyn Contract + '_>, GatewayError> {
        Ok(Box::new(MockContract {
            state: self.state.clone(),
        }))
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.releases += 1;
        }
    }
}

struct MockContract {
    state: Arc<Mutex<MockState>>,
}

impl MockContract {
    fn invoke(
        &self,
        operation: &str,
        transaction: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let mut state = self.state.lock().unwrap();

        let mut call = format!("{operation} {transaction}");
        if !args.is_empty() {
            call.push(' ');
            call.push_str(&args.join(" "));
        }
        state.calls.push(call);

        let outcome = state
            .responses
            .get_mut(transaction)
            .and_then(VecDeque::pop_front);

        match outcome {
            Some(MockOutcome::Success(bytes)) => Ok(bytes),
            Some(MockOutcome::Rejected { message, payload }) => {
                Err(GatewayError::ContractRejected {
                    transaction: transaction.to_string(),
                    message,
                    payload,
                })
            }
            None => Ok(Vec::new()),
        }
    }
}

impl Contract for MockContract {
    fn evaluate(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.invoke("evaluate", transaction, args)
    }

    fn submit(&self, transaction: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.invoke("submit", transaction, args)
    }
}
