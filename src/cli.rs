//! Definitions of CLI arguments and commands for the deploy scripts

use std::fmt::{self, Display};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ethers::providers::Middleware;

use crate::{
    client::HttpChainClient,
    commands::{deploy_contract, deploy_swap_system, show_address},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DB_DIR, DEFAULT_PACING_DELAY_MS},
    deployer::Deployer,
    errors::ScriptError,
};

/// Deploy and wire up the token swap contracts, caching deployed addresses
/// per network
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long)]
    pub rpc_url: String,

    /// Name of the target network, used to isolate cached addresses
    #[arg(short, long)]
    pub network: String,

    /// Directory holding the per-network address store files
    #[arg(long, default_value = DEFAULT_DB_DIR)]
    pub db_dir: String,

    /// Directory holding the contract ABI and bytecode artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: String,

    /// Milliseconds to wait before each deployment transaction
    #[arg(long, default_value_t = DEFAULT_PACING_DELAY_MS)]
    pub delay_ms: u64,

    /// Whether to redeploy contracts that already have a cached address;
    /// pass `--redeploy false` to reuse prior deployments
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub redeploy: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deploy script subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the full swap system: the old token (unless an address is
    /// provided), the swap, and the new token, then point the swap at the
    /// new token
    DeploySwap(DeploySwapArgs),
    /// Deploy (or reuse) a single contract
    Deploy(DeployArgs),
    /// Print the cached address of a contract on the target network
    ShowAddress(ShowAddressArgs),
}

impl Command {
    /// Runs the parsed command against the given orchestrator
    pub async fn run<M: Middleware + 'static>(
        self,
        deployer: Deployer<HttpChainClient<M>>,
        network: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeploySwap(args) => deploy_swap_system(args, &deployer, network).await,
            Command::Deploy(args) => deploy_contract(args, &deployer, network).await,
            Command::ShowAddress(args) => show_address(args, &deployer, network).await,
        }
    }
}

/// Arguments for the full swap-system deployment
#[derive(Args)]
pub struct DeploySwapArgs {
    /// Address of an already-deployed old token; a fresh one is deployed
    /// when omitted
    #[arg(long, env = "OLD_TOKEN")]
    pub old_token: Option<String>,

    /// Recipient address of the airdrop allocation
    #[arg(long, env = "AIRDROP_ADDRESS")]
    pub airdrop: String,

    /// Recipient address of the grants allocation
    #[arg(long, env = "GRANTS_ADDRESS")]
    pub grants: String,

    /// Recipient address of the liquidity allocation
    #[arg(long, env = "LIQUID_ADDRESS")]
    pub liquid: String,

    /// Recipient address of the treasury allocation
    #[arg(long, env = "TREASURY_ADDRESS")]
    pub treasury: String,
}

/// Arguments for a single-contract deployment
#[derive(Args)]
pub struct DeployArgs {
    /// The contract to deploy
    #[arg(short, long)]
    pub contract: TokenContract,

    /// Constructor arguments, as hex addresses in declaration order
    #[arg(long)]
    pub args: Vec<String>,
}

/// Arguments for the cached-address lookup
#[derive(Args)]
pub struct ShowAddressArgs {
    /// The contract to look up
    #[arg(short, long)]
    pub contract: TokenContract,
}

/// The contracts managed by these scripts
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenContract {
    /// The legacy token being swapped out
    OldToken,
    /// The swap contract exchanging old tokens for new
    Swap,
    /// The replacement token
    LadysToken,
}

impl TokenContract {
    /// The number of constructor arguments the contract takes
    pub const fn constructor_arity(self) -> usize {
        match self {
            TokenContract::OldToken => 0,
            TokenContract::Swap => 1,
            TokenContract::LadysToken => 5,
        }
    }
}

impl Display for TokenContract {
    // These names double as the store keys and the artifact file names
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenContract::OldToken => write!(f, "OldToken"),
            TokenContract::Swap => write!(f, "Swap"),
            TokenContract::LadysToken => write!(f, "LadysToken"),
        }
    }
}
