//! ping_drive CLI - Ping a Google Drive URL.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use ping_drive::logging::init_logging;
use ping_drive::{DriveError, PingCommand, PingOptions};

/// Pings a Google Drive folder, Google Docs, Google Sheets or Google Slides URL.
#[derive(Parser)]
#[command(name = "ping_drive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The target item URL.
    url: String,

    /// Path to the application client secret file. If not given, it is read
    /// from a scapesettings.yaml file.
    #[arg(long, env = "PING_DRIVE_CLIENT_SECRET_FILE")]
    client_secret_file: Option<PathBuf>,

    /// Path to an access token file. The file may not exist. When set, the
    /// credentials are remembered and the next run needs no authentication.
    #[arg(long, env = "PING_DRIVE_ACCESS_TOKEN_FILE")]
    access_token_file: Option<PathBuf>,

    /// Ask to authenticate even if an access token exists.
    #[arg(long)]
    force_authenticate: bool,

    /// Print progress messages (-vv for debug output).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let working_dir = std::env::current_dir().context("Can't get the working directory path")?;

    let options = match PingOptions::resolve(
        cli.url,
        cli.client_secret_file,
        cli.access_token_file,
        cli.force_authenticate,
        &working_dir,
    ) {
        Ok(options) => options,
        Err(e @ DriveError::MissingClientSecret) => {
            eprintln!("[ERROR] {}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("[ERROR] Couldn't read a configuration file: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let command = PingCommand::new(options);
    let status = command
        .run(&mut io::stdin().lock(), &mut io::stdout(), &mut io::stderr())
        .await
        .context("Failed to write the output")?;

    Ok(ExitCode::from(status))
}
