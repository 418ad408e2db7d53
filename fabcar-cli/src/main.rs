use anyhow::Result;
use clap::Parser;
use fabcar_core::driver;
use fabcar_core::gateway::HttpGateway;
use fabcar_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use fabcar_core::resolver::{ClientOptions, CredentialSource};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fabcar")]
#[command(author, version, about = "Demo client for the fabcar sample contract", long_about = None)]
struct Args {
    /// Network connection profile (JSON)
    connection_profile: String,

    /// Identity label to authenticate as
    identity: String,

    /// Wallet directory, or a certificate file when a private key is also given
    wallet_or_certificate: String,

    /// Private key file (switches from wallet mode to certificate/key mode)
    private_key: Option<String>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = LogLevel::from_str(&args.log_level).unwrap_or_else(|| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    init_logging_with_config(LogConfig::new(log_level).json_format(args.json_logs))?;

    let source = match args.private_key {
        Some(private_key) => CredentialSource::CertificateKey {
            certificate: args.wallet_or_certificate.into(),
            private_key: private_key.into(),
        },
        None => CredentialSource::WalletDir(args.wallet_or_certificate.into()),
    };

    let options = ClientOptions::resolve(&args.connection_profile, &args.identity, source)?;
    info!(
        identity = options.identity_label(),
        msp_id = options.msp_id(),
        "resolved client identity"
    );

    let gateway = HttpGateway::new();
    driver::run(&gateway, &options, &mut std::io::stdout())?;

    Ok(())
}
