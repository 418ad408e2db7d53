//! End-to-end scenarios against a mocked gateway.

use std::fs;
use std::path::PathBuf;

use fabcar_core::driver::{self, DriverError};
use fabcar_core::gateway::mock::{MockGateway, MockOutcome};
use fabcar_core::gateway::GatewayError;
use fabcar_core::resolver::{ClientOptions, CredentialSource};
use tempfile::TempDir;

const CERT_PEM: &str = include_str!("fixtures/cert.pem");
const KEY_PEM: &str = include_str!("fixtures/key.pem");

const PROFILE: &str = r#"{
    "client": { "organization": "Org1" },
    "organizations": { "Org1": { "mspid": "Org1MSP" } }
}"#;

fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let profile = dir.path().join("connection.json");
    let cert = dir.path().join("cert.pem");
    let key = dir.path().join("key.pem");
    fs::write(&profile, PROFILE).unwrap();
    fs::write(&cert, CERT_PEM).unwrap();
    fs::write(&key, KEY_PEM).unwrap();
    (profile, cert, key)
}

fn options(dir: &TempDir) -> ClientOptions {
    let (profile, cert, key) = write_fixtures(dir);
    ClientOptions::resolve(
        &profile,
        "user1",
        CredentialSource::CertificateKey {
            certificate: cert,
            private_key: key,
        },
    )
    .unwrap()
}

#[test]
fn scripted_run_prints_results_and_rejection() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir);

    let gateway = MockGateway::new();
    gateway.respond("queryAllCars", MockOutcome::Success(b"[]".to_vec()));
    gateway.respond(
        "queryCar",
        MockOutcome::Success(b"{\"make\":\"VW\",\"owner\":\"Mary\"}".to_vec()),
    );
    gateway.respond(
        "queryCar",
        MockOutcome::Rejected {
            message: "car not found".to_string(),
            payload: None,
        },
    );

    let mut out = Vec::new();
    driver::run(&gateway, &options, &mut out).unwrap();

    let transcript = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[]",
            "{\"make\":\"VW\",\"owner\":\"Mary\"}",
            "MESSAGE car not found",
            "PAYLOAD null",
        ]
    );

    assert_eq!(
        gateway.calls(),
        vec![
            "evaluate queryAllCars".to_string(),
            "submit createCar CAR10 VW Polo Grey Mary".to_string(),
            "evaluate queryCar CAR10".to_string(),
            "submit changeCarOwner CAR10 Archie".to_string(),
            "evaluate queryCar CAR999".to_string(),
        ]
    );

    assert_eq!(gateway.connect_count(), 1);
    assert_eq!(gateway.release_count(), 1);
}

#[test]
fn final_rejection_payload_is_decoded() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir);

    let gateway = MockGateway::new();
    gateway.respond(
        "queryCar",
        MockOutcome::Success(b"{\"owner\":\"Mary\"}".to_vec()),
    );
    gateway.respond(
        "queryCar",
        MockOutcome::Rejected {
            message: "car not found".to_string(),
            payload: Some(b"CAR999 does not exist".to_vec()),
        },
    );

    let mut out = Vec::new();
    driver::run(&gateway, &options, &mut out).unwrap();

    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("MESSAGE car not found"));
    assert!(transcript.contains("PAYLOAD CAR999 does not exist"));
}

#[test]
fn early_rejection_propagates_and_releases_connection() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir);

    let gateway = MockGateway::new();
    gateway.respond(
        "queryAllCars",
        MockOutcome::Rejected {
            message: "access denied".to_string(),
            payload: None,
        },
    );

    let mut out = Vec::new();
    let err = driver::run(&gateway, &options, &mut out).unwrap_err();

    assert!(matches!(
        err,
        DriverError::Gateway(GatewayError::ContractRejected { .. })
    ));
    assert!(out.is_empty());

    // The scoped connection must be released exactly once on the error path
    assert_eq!(gateway.connect_count(), 1);
    assert_eq!(gateway.release_count(), 1);
}

#[test]
fn mid_script_rejection_stops_the_sequence() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir);

    let gateway = MockGateway::new();
    gateway.respond("queryAllCars", MockOutcome::Success(b"[]".to_vec()));
    gateway.respond(
        "createCar",
        MockOutcome::Rejected {
            message: "already exists".to_string(),
            payload: None,
        },
    );

    let mut out = Vec::new();
    let err = driver::run(&gateway, &options, &mut out).unwrap_err();

    assert!(matches!(err, DriverError::Gateway(_)));
    assert_eq!(
        gateway.calls(),
        vec![
            "evaluate queryAllCars".to_string(),
            "submit createCar CAR10 VW Polo Grey Mary".to_string(),
        ]
    );
    assert_eq!(gateway.release_count(), 1);
}

#[test]
fn driver_runs_from_file_wallet() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("connection.json");
    fs::write(&profile, PROFILE).unwrap();

    let wallet_dir = dir.path().join("wallet");
    fs::create_dir(&wallet_dir).unwrap();
    let entry = serde_json::json!({
        "credentials": { "certificate": CERT_PEM, "privateKey": KEY_PEM },
        "mspId": "Org1MSP",
        "type": "X.509",
        "version": 1,
    });
    fs::write(
        wallet_dir.join("user1.id"),
        serde_json::to_string(&entry).unwrap(),
    )
    .unwrap();

    let options = ClientOptions::resolve(
        &profile,
        "user1",
        CredentialSource::WalletDir(wallet_dir),
    )
    .unwrap();

    let gateway = MockGateway::new();
    gateway.respond("queryAllCars", MockOutcome::Success(b"[]".to_vec()));

    let mut out = Vec::new();
    driver::run(&gateway, &options, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("[]"));
}
