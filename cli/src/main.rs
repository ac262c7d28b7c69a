//! `questify-cli`: terminal client for the Questify document assistant.
//!
//! Uses the same session rules and error notices as the web app, with a
//! `reqwest` transport and the token kept in a file.

mod commands;
mod error;
mod store;
mod transport;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use questify::{ApiClient, ClientConfig, Session};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::error::CliError;
use crate::store::FileTokenStore;
use crate::transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "questify-cli", about = "Questify document assistant CLI")]
struct Cli {
    /// Backend origin; defaults to the build profile's backend.
    #[arg(long, env = "QUESTIFY_BACKEND_URL")]
    base_url: Option<String>,

    /// Where the session token is kept.
    #[arg(long, env = "QUESTIFY_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{}", err.notice());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let token_path = cli.token_file.or_else(FileTokenStore::default_path).ok_or(CliError::NoTokenPath)?;
    let session = Session::new(FileTokenStore::new(token_path));
    let config = ClientConfig::from_override(cli.base_url.as_deref());
    let api = ApiClient::new(ReqwestTransport::new()?, session, config);
    commands::run(&api, cli.command).await
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
