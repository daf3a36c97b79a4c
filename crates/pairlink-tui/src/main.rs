//! Pairlink TUI entry point.

use std::path::PathBuf;

use clap::Parser;
use pairlink_app::Runtime;
use pairlink_core::SystemEnv;
use pairlink_session::transport;
use pairlink_tui::TerminalDriver;

/// Pairlink terminal UI client
#[derive(Parser, Debug)]
#[command(name = "pairlink-tui")]
#[command(about = "Terminal UI for the Pairlink memory game")]
#[command(version)]
struct Args {
    /// Peer address to link with (enables peer mode)
    ///
    /// If not provided, only single and daily modes are available.
    #[arg(short, long)]
    peer: Option<String>,

    /// Local address to bind the peer link to
    #[arg(short, long, default_value = "0.0.0.0:4760")]
    bind: String,

    /// Player name recorded in exported saves
    #[arg(short, long, default_value = "player")]
    name: String,

    /// Save file used by export and import
    #[arg(short, long, default_value = "pairlink-save.json")]
    save: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Raw mode owns stdout, so diagnostics go to stderr where a redirect
    // can pick them up.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut driver = TerminalDriver::new(args.save)?;
    if let Some(peer_addr) = &args.peer {
        let link = transport::connect(&args.bind, peer_addr).await?;
        driver = driver.with_link(link);
    }

    let runtime = Runtime::new(driver, SystemEnv::new(), args.name);
    Ok(runtime.run().await?)
}
