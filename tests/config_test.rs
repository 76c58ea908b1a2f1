//! Configuration loading, saving and override precedence tests

use hive_wallet::config::{
    load_config, save_config, ConfigOverrides, GlobalConfig, NetworkType, MAINNET_CHAIN_ID,
    TESTNET_CHAIN_ID,
};
use tempfile::TempDir;

#[test]
fn defaults_differ_per_network() {
    let mainnet = GlobalConfig::default_mainnet();
    assert_eq!(mainnet.node.chain_id, MAINNET_CHAIN_ID);
    assert_eq!(mainnet.node.url, "https://api.hive.blog");

    let testnet = GlobalConfig::default_testnet();
    assert_eq!(testnet.node.chain_id, TESTNET_CHAIN_ID);
    assert_ne!(testnet.node.url, mainnet.node.url);
    // Beekeeper settings are network-independent
    assert_eq!(testnet.beekeeper.url, mainnet.beekeeper.url);
}

#[test]
fn config_round_trips_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = GlobalConfig::default_mainnet();
    config.beekeeper.wallet = "trading".to_string();
    config
        .profile
        .key_aliases
        .insert("owner".to_string(), "STM5TestKey".to_string());
    save_config(&config, Some(&path)).unwrap();

    let loaded = load_config(Some(&path), ConfigOverrides::new()).unwrap();
    assert_eq!(loaded.beekeeper.wallet, "trading");
    assert_eq!(
        loaded.profile.key_aliases.get("owner").map(String::as_str),
        Some("STM5TestKey")
    );
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.json");

    save_config(&GlobalConfig::default_mainnet(), Some(&path)).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_file_falls_back_to_network_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let config = load_config(
        Some(&path),
        ConfigOverrides {
            network: Some(NetworkType::Testnet),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.node.chain_id, TESTNET_CHAIN_ID);
}

#[test]
fn cli_overrides_beat_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    save_config(&GlobalConfig::default_mainnet(), Some(&path)).unwrap();

    let overrides = ConfigOverrides {
        node_url: Some("https://node.example".to_string()),
        beekeeper_wallet: Some("cold-storage".to_string()),
        profile: Some("cold".to_string()),
        ..Default::default()
    };
    let config = load_config(Some(&path), overrides).unwrap();

    assert_eq!(config.node.url, "https://node.example");
    assert_eq!(config.beekeeper.wallet, "cold-storage");
    assert_eq!(config.profile.name, "cold");
}

#[test]
fn network_switch_swaps_url_and_chain_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    save_config(&GlobalConfig::default_mainnet(), Some(&path)).unwrap();

    let config = load_config(
        Some(&path),
        ConfigOverrides {
            network: Some(NetworkType::Testnet),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.node.chain_id, TESTNET_CHAIN_ID);
    assert_eq!(config.node.url, "https://testnet.openhive.network");
}

#[test]
fn explicit_url_survives_a_network_switch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    save_config(&GlobalConfig::default_mainnet(), Some(&path)).unwrap();

    let config = load_config(
        Some(&path),
        ConfigOverrides {
            network: Some(NetworkType::Testnet),
            node_url: Some("https://my-own-node.example".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    // The chain id follows the network, the URL stays as given
    assert_eq!(config.node.chain_id, TESTNET_CHAIN_ID);
    assert_eq!(config.node.url, "https://my-own-node.example");
}

#[test]
fn merge_prefers_the_right_hand_side() {
    let base = ConfigOverrides {
        node_url: Some("https://base.example".to_string()),
        profile: Some("base".to_string()),
        ..Default::default()
    };
    let extra = ConfigOverrides {
        node_url: Some("https://extra.example".to_string()),
        ..Default::default()
    };

    let merged = base.merge(extra);
    assert_eq!(merged.node_url.as_deref(), Some("https://extra.example"));
    // Fields the right side leaves unset keep the left side's value
    assert_eq!(merged.profile.as_deref(), Some("base"));
}
