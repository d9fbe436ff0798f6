//! whois-query - send one whois query and print the raw response
//!
//! Logging goes to stderr so stdout carries only the server's answer.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use whois_tcp::{ConnectionParams, QueryHandler, SocketHandler};

/// Send a single whois query over TCP
#[derive(Parser, Debug)]
#[command(name = "whois-query", version, about)]
struct Cli {
    /// Query text, sent as-is followed by CRLF
    query: String,

    /// Whois server to ask
    #[arg(long, short = 'H', env = "WHOIS_HOST", default_value = "whois.iana.org")]
    host: String,

    /// Server port
    #[arg(long, short = 'p', env = "WHOIS_PORT", default_value_t = 43)]
    port: u16,

    /// Local address to bind before connecting
    #[arg(long)]
    bind_host: Option<String>,

    /// Local port to bind before connecting
    #[arg(long)]
    bind_port: Option<u16>,

    /// Connect timeout in seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long)]
    read_timeout: Option<u64>,

    /// Enable verbose logging (-v, -vv, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn init_tracing(&self) {
        let level = match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port,
            local_host: self.bind_host.clone(),
            local_port: self.bind_port,
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
            read_timeout: self.read_timeout.map(Duration::from_secs),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.init_tracing();

    let params = cli.connection_params();
    let response = SocketHandler::new()
        .execute(&cli.query, &params)
        .with_context(|| format!("query to {} failed", params.endpoint()))?;

    print!("{response}");
    Ok(())
}
