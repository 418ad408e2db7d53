//! Core library for the fabcar ledger demo client.
//!
//! The interesting work of a permissioned-ledger network (endorsement,
//! ordering, discovery) happens on the other side of the [`gateway`]
//! seam. This crate covers everything the client does locally: connection
//! profile interpretation, identity and wallet handling, argument
//! resolution, and the scripted transaction sequence.

pub mod driver;
pub mod gateway;
pub mod identity;
pub mod logging;
pub mod profile;
pub mod resolver;
pub mod wallet;

pub use identity::Identity;
pub use profile::ConnectionProfile;
pub use resolver::ClientOptions;
