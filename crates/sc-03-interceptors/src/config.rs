//! Interceptors configuration.
//!
//! Defaults are suitable for a production node; every field can be
//! overridden through `SC_*` environment variables.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::{is_valid_shard_id, Marshaller, ShardId, METACHAIN_SHARD_ID};

use crate::domain::{ProcessError, MAX_TX_NONCE_DELTA_ALLOWED};

/// Antiflood quotas, applied per reset interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntifloodConfig {
    /// Messages accepted from one peer.
    pub peer_max_messages: u32,
    /// Bytes accepted from one peer.
    pub peer_max_total_size: u64,
    /// Messages accepted from all peers together.
    pub global_max_messages: u32,
    /// Bytes accepted from all peers together.
    pub global_max_total_size: u64,
    /// Messages accepted from one peer on one topic.
    pub topic_max_messages_per_peer: u32,
    /// How long a penalized peer is refused.
    pub blacklist_duration_secs: u64,
}

impl Default for AntifloodConfig {
    fn default() -> Self {
        Self {
            peer_max_messages: 500,
            peer_max_total_size: 4 * 1024 * 1024,
            global_max_messages: 20_000,
            global_max_total_size: 64 * 1024 * 1024,
            topic_max_messages_per_peer: 300,
            blacklist_duration_secs: 3_600,
        }
    }
}

/// Transaction economics minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicsConfig {
    /// Lowest accepted gas price.
    pub min_gas_price: u64,
    /// Gas charged for an empty transaction.
    pub min_gas_limit: u64,
    /// Extra gas per byte of payload.
    pub gas_per_data_byte: u64,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            min_gas_price: 1_000_000_000,
            min_gas_limit: 50_000,
            gas_per_data_byte: 1_500,
        }
    }
}

/// Interceptors configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptorsConfig {
    /// Chain identifier every signed object must carry.
    pub chain_id: String,
    /// Number of shards, metachain excluded.
    pub number_of_shards: u32,
    /// Local shard, or the metachain sentinel.
    pub self_shard_id: ShardId,
    /// Wire encoding.
    pub marshaller: Marshaller,
    /// Highest accepted nonce distance ahead of the account nonce.
    pub max_tx_nonce_delta_allowed: u64,
    /// Shard committee size.
    pub consensus_group_size: usize,
    /// Metachain committee size.
    pub meta_consensus_group_size: usize,
    /// Messages processed concurrently across all interceptors.
    pub throttler_capacity: u32,
    /// Registers the peer shard announcement topic.
    pub enable_peer_shard_topic: bool,
    /// Penalizes peers that relay undecodable payloads.
    pub blacklist_on_decode_failure: bool,
    /// How long a bad header hash stays blacklisted.
    pub header_blacklist_duration_secs: u64,
    /// How long a requested hash stays whitelisted.
    pub white_list_span_secs: u64,
    /// Antiflood quotas.
    pub antiflood: AntifloodConfig,
    /// Economics minimums.
    pub economics: EconomicsConfig,
}

impl Default for InterceptorsConfig {
    fn default() -> Self {
        Self {
            chain_id: "shard-chain-local".to_string(),
            number_of_shards: 1,
            self_shard_id: 0,
            marshaller: Marshaller::default(),
            max_tx_nonce_delta_allowed: MAX_TX_NONCE_DELTA_ALLOWED,
            consensus_group_size: 63,
            meta_consensus_group_size: 400,
            throttler_capacity: 2_000,
            enable_peer_shard_topic: false,
            blacklist_on_decode_failure: true,
            header_blacklist_duration_secs: 3_600,
            white_list_span_secs: 300,
            antiflood: AntifloodConfig::default(),
            economics: EconomicsConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(default)
}

impl InterceptorsConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SC_CHAIN_ID`: Chain identifier
    /// - `SC_NUM_SHARDS`: Number of shards (default: 1)
    /// - `SC_SELF_SHARD`: Local shard id, or `META` (default: 0)
    /// - `SC_MAX_TX_NONCE_DELTA`: Nonce window (default: 15000)
    /// - `SC_CONSENSUS_GROUP_SIZE`, `SC_META_CONSENSUS_GROUP_SIZE`: Committee sizes
    /// - `SC_THROTTLER_CAPACITY`: Concurrent messages (default: 2000)
    /// - `SC_ENABLE_PEER_SHARD_TOPIC`: Register `peerShard` (default: false)
    /// - `SC_BLACKLIST_DURATION_SECS`: Peer penalty length (default: 3600)
    /// - `SC_MIN_GAS_PRICE`, `SC_MIN_GAS_LIMIT`: Economics minimums
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let self_shard_id = match env::var("SC_SELF_SHARD") {
            Ok(v) if v == "META" => METACHAIN_SHARD_ID,
            Ok(v) => v.parse().unwrap_or(defaults.self_shard_id),
            Err(_) => defaults.self_shard_id,
        };

        Self {
            chain_id: env::var("SC_CHAIN_ID").unwrap_or(defaults.chain_id),
            number_of_shards: env_parse("SC_NUM_SHARDS", defaults.number_of_shards),
            self_shard_id,
            max_tx_nonce_delta_allowed: env_parse(
                "SC_MAX_TX_NONCE_DELTA",
                defaults.max_tx_nonce_delta_allowed,
            ),
            consensus_group_size: env_parse(
                "SC_CONSENSUS_GROUP_SIZE",
                defaults.consensus_group_size,
            ),
            meta_consensus_group_size: env_parse(
                "SC_META_CONSENSUS_GROUP_SIZE",
                defaults.meta_consensus_group_size,
            ),
            throttler_capacity: env_parse("SC_THROTTLER_CAPACITY", defaults.throttler_capacity),
            enable_peer_shard_topic: env_flag(
                "SC_ENABLE_PEER_SHARD_TOPIC",
                defaults.enable_peer_shard_topic,
            ),
            antiflood: AntifloodConfig {
                blacklist_duration_secs: env_parse(
                    "SC_BLACKLIST_DURATION_SECS",
                    defaults.antiflood.blacklist_duration_secs,
                ),
                ..defaults.antiflood
            },
            economics: EconomicsConfig {
                min_gas_price: env_parse("SC_MIN_GAS_PRICE", defaults.economics.min_gas_price),
                min_gas_limit: env_parse("SC_MIN_GAS_LIMIT", defaults.economics.min_gas_limit),
                ..defaults.economics
            },
            ..defaults
        }
    }

    /// Parses and validates a JSON configuration file body.
    pub fn from_json(text: &str) -> Result<Self, ProcessError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ProcessError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the node cannot start with.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.chain_id.is_empty() {
            return Err(ProcessError::InvalidChainId);
        }
        if self.number_of_shards == 0 {
            return Err(ProcessError::InvalidConfig("number_of_shards must be > 0".into()));
        }
        if !is_valid_shard_id(self.self_shard_id, self.number_of_shards) {
            return Err(ProcessError::InvalidConfig(format!(
                "self shard {} outside {} shards",
                self.self_shard_id, self.number_of_shards
            )));
        }
        if self.throttler_capacity == 0 {
            return Err(ProcessError::InvalidConfig("throttler_capacity must be > 0".into()));
        }
        if self.consensus_group_size == 0 || self.meta_consensus_group_size == 0 {
            return Err(ProcessError::InvalidConfig(
                "consensus group sizes must be > 0".into(),
            ));
        }
        if self.max_tx_nonce_delta_allowed == 0 {
            return Err(ProcessError::InvalidConfig(
                "max_tx_nonce_delta_allowed must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Peer penalty span.
    pub fn blacklist_duration(&self) -> Duration {
        Duration::from_secs(self.antiflood.blacklist_duration_secs)
    }

    /// How long a bad header hash stays listed.
    pub fn header_blacklist_duration(&self) -> Duration {
        Duration::from_secs(self.header_blacklist_duration_secs)
    }

    /// Lifetime of a whitelisted request.
    pub fn white_list_span(&self) -> Duration {
        Duration::from_secs(self.white_list_span_secs)
    }
}
