//! Ballot: command-line client for the on-chain governance contract.

mod app;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::bail;
use ballot_types::{ContractId, NetworkId, ProposalId};
use ballot_utils::LogFormat;
use clap::Parser;

use crate::app::App;
use crate::config::ClientConfig;

#[derive(Parser)]
#[command(name = "ballot", about = "List, inspect, create and vote on governance proposals")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Network: "mainnet", "testnet" or "devnet".
    #[arg(long, env = "BALLOT_NETWORK")]
    network: Option<NetworkId>,

    /// Stacks node API base URL (defaults to the network's public API).
    #[arg(long, env = "BALLOT_API_URL")]
    api_url: Option<String>,

    /// Voting contract as ADDRESS.NAME.
    #[arg(long, env = "BALLOT_CONTRACT")]
    contract: Option<ContractId>,

    /// Wallet service endpoint.
    #[arg(long, env = "BALLOT_WALLET_URL")]
    wallet_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Refresh and list all proposals.
    List,
    /// Show one proposal with its voting state.
    Show { id: ProposalId },
    /// Create a proposal.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Vote on a proposal.
    Vote {
        id: ProposalId,
        /// Vote in favour.
        #[arg(long = "for", conflicts_with = "against")]
        in_favor: bool,
        /// Vote against.
        #[arg(long)]
        against: bool,
        /// Submit even if voting looks closed.
        #[arg(long)]
        force: bool,
    },
    /// End voting on a proposal.
    End {
        id: ProposalId,
        /// Submit even if voting looks closed.
        #[arg(long)]
        force: bool,
    },
    /// Refresh the proposal list periodically until Ctrl-C.
    Watch {
        /// Seconds between refreshes (defaults to poll_interval_secs).
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Sign in through the wallet.
    Connect,
    /// Sign out and discard session state.
    Disconnect,
    /// Show the connected address.
    Status,
    /// List the contracts of the governance deployment.
    Contracts,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::default(),
    };

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(url) = &cli.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(contract) = &cli.contract {
        config.contract = contract.clone();
    }
    if let Some(url) = &cli.wallet_url {
        config.wallet_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    ballot_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }
    config.validate()?;

    tracing::debug!(
        network = config.network.as_str(),
        api_url = config.api_url(),
        contract = %config.contract,
        "starting ballot"
    );
    let app = App::new(config)?;

    let result = match cli.command {
        Command::List => app.list().await,
        Command::Show { id } => app.show(id).await,
        Command::Create { title, description } => app.create(title, description).await,
        Command::Vote {
            id,
            in_favor,
            against,
            force,
        } => {
            if !in_favor && !against {
                bail!("choose --for or --against");
            }
            app.vote(id, in_favor, force).await
        }
        Command::End { id, force } => app.end(id, force).await,
        Command::Watch { interval } => app.watch(interval).await,
        Command::Connect => app.connect().await,
        Command::Disconnect => app.disconnect().await,
        Command::Status => app.status().await,
        Command::Contracts => {
            app.contracts();
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
