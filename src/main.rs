//! Hive Wallet CLI
//!
//! Command-line interface for building, signing and broadcasting
//! transactions against a Hive-style node and a local key-custody daemon

use clap::Parser;
use hive_wallet::cli::args::{Cli, Commands, ConfigAction, KeysAction, WalletsAction};
use hive_wallet::cli::commands;
use hive_wallet::config::{ConfigOverrides, NetworkType};
use std::process;

fn run_async<F>(future: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    // One command per invocation; a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    match runtime {
        Ok(rt) => rt.block_on(future),
        Err(e) => Err(format!("Failed to create async runtime: {}", e).into()),
    }
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    // Parse network string to NetworkType
    let network = cli.network.as_ref().and_then(|n| match n.as_str() {
        "mainnet" => Some(NetworkType::Mainnet),
        "testnet" => Some(NetworkType::Testnet),
        _ => {
            eprintln!("Error: Invalid network '{}'. Use: mainnet or testnet", n);
            process::exit(1);
        }
    });

    // Build config overrides from global arguments
    let overrides = ConfigOverrides {
        network,
        node_url: cli.node_url.clone(),
        chain_id: cli.chain_id.clone(),
        beekeeper_url: cli.beekeeper_url.clone(),
        beekeeper_wallet: cli.beekeeper_wallet.clone(),
        profile: cli.profile.clone(),
    };

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init { network } => {
                commands::config::init(&network).map_err(Into::into)
            }
            ConfigAction::Show => commands::config::show(overrides).map_err(Into::into),
        },

        Commands::Transfer {
            from,
            to,
            amount,
            memo,
            sign_as,
            password,
            broadcast,
        } => run_async(async {
            commands::transfer::transfer(
                &from, &to, &amount, &memo, &sign_as, &password, broadcast, overrides,
            )
            .await
            .map_err(Into::into)
        }),

        Commands::Balance { account } => run_async(async {
            commands::query::balance(&account, overrides)
                .await
                .map_err(Into::into)
        }),

        Commands::Head => run_async(async {
            commands::query::head(overrides).await.map_err(Into::into)
        }),

        Commands::History { account, limit } => run_async(async {
            commands::query::history(&account, limit, overrides)
                .await
                .map_err(Into::into)
        }),

        Commands::Rc { account } => run_async(async {
            commands::query::rc(&account, overrides)
                .await
                .map_err(Into::into)
        }),

        Commands::Reputation { account } => run_async(async {
            commands::query::reputation(&account, overrides)
                .await
                .map_err(Into::into)
        }),

        Commands::TxStatus { id } => run_async(async {
            commands::query::tx_status(&id, overrides)
                .await
                .map_err(Into::into)
        }),

        Commands::Keys { action } => match action {
            KeysAction::List => run_async(async {
                commands::keys::list_keys(overrides).await.map_err(Into::into)
            }),
            KeysAction::Create => run_async(async {
                commands::keys::create_key(overrides).await.map_err(Into::into)
            }),
        },

        Commands::Wallets { action } => match action {
            WalletsAction::List => run_async(async {
                commands::keys::list_wallets(overrides)
                    .await
                    .map_err(Into::into)
            }),
            WalletsAction::Create { password } => run_async(async {
                commands::keys::create_wallet(&password, overrides)
                    .await
                    .map_err(Into::into)
            }),
            WalletsAction::Unlock { password } => run_async(async {
                commands::keys::unlock_wallet(&password, overrides)
                    .await
                    .map_err(Into::into)
            }),
            WalletsAction::Info => run_async(async {
                commands::keys::daemon_info(overrides)
                    .await
                    .map_err(Into::into)
            }),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
