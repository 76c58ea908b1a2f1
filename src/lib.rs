//! Hive Wallet
//!
//! Wallet client for a Hive-style blockchain: assembles, signs and
//! broadcasts transactions through a node's JSON-RPC interface and a
//! local key-custody daemon (beekeeper).

pub mod assembler;
pub mod chain;
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod queries;
pub mod rpc;
