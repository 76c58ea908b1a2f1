//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hive-wallet",
    version,
    about = "Hive Wallet - build, sign and broadcast transactions",
    long_about = None
)]
pub struct Cli {
    /// Network to use: mainnet or testnet (overrides config)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Node JSON-RPC URL (overrides config)
    #[arg(long, global = true)]
    pub node_url: Option<String>,

    /// Chain id as 64 hex characters (overrides config)
    #[arg(long, global = true)]
    pub chain_id: Option<String>,

    /// Key-custody daemon URL (overrides config)
    #[arg(long, global = true)]
    pub beekeeper_url: Option<String>,

    /// Key-custody wallet name (overrides config)
    #[arg(long, global = true)]
    pub beekeeper_wallet: Option<String>,

    /// Profile name (overrides config)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize or inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Transfer liquid funds to another account
    Transfer {
        /// Sending account
        #[arg(long)]
        from: String,

        /// Receiving account
        #[arg(long)]
        to: String,

        /// Amount in legacy notation, e.g. "1.000 HIVE"
        #[arg(short, long)]
        amount: String,

        /// Transfer memo
        #[arg(short, long, default_value = "")]
        memo: String,

        /// Profile key alias to sign with
        #[arg(short, long)]
        sign_as: String,

        /// Key-custody wallet password (for unlock recovery)
        #[arg(short, long)]
        password: String,

        /// Broadcast after signing instead of printing the signed transaction
        #[arg(long)]
        broadcast: bool,
    },

    /// Show an account's balances
    Balance {
        /// Account name
        #[arg(short, long)]
        account: String,
    },

    /// Show the current chain head state
    Head,

    /// Show recent account history
    History {
        /// Account name
        #[arg(short, long)]
        account: String,

        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Show an account's resource credits
    Rc {
        /// Account name
        #[arg(short, long)]
        account: String,
    },

    /// Show an account's reputation
    Reputation {
        /// Account name
        #[arg(short, long)]
        account: String,
    },

    /// Look up the status of a broadcast transaction
    TxStatus {
        /// Transaction id (40 hex characters)
        #[arg(short, long)]
        id: String,
    },

    /// Key management via the key-custody daemon
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Wallet management via the key-custody daemon
    Wallets {
        #[command(subcommand)]
        action: WalletsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a fresh config file with network defaults
    Init {
        /// Network: mainnet or testnet
        #[arg(short, long, default_value = "mainnet")]
        network: String,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// List public keys held by the configured wallet
    List,

    /// Generate a new key inside the configured wallet
    Create,
}

#[derive(Subcommand, Debug)]
pub enum WalletsAction {
    /// List wallets known to the daemon with their lock state
    List,

    /// Create a new wallet in the daemon
    Create {
        /// Wallet password
        #[arg(short, long)]
        password: String,
    },

    /// Unlock the configured wallet
    Unlock {
        /// Wallet password
        #[arg(short, long)]
        password: String,
    },

    /// Show daemon time and session timeout
    Info,
}
