//! Pool Configuration
//!
//! Construction parameters for a pool instance. Addresses are written as
//! `0x`-prefixed hex in JSON.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use ethpool_common::{is_zero_address, Address, DeploymentMode, PoolError, PoolResult};

/// Configuration for a pool instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolConfig {
    /// Creator; receives the Admin role
    #[serde(with = "hex_address")]
    pub admin: Address,
    /// Receives the Manager role
    #[serde(with = "hex_address")]
    pub manager: Address,
    /// Direct ledger or behind a dispatcher
    #[serde(default)]
    pub mode: DeploymentMode,
}

impl PoolConfig {
    /// Direct deployment config
    pub fn new(admin: Address, manager: Address) -> Self {
        Self { admin, manager, mode: DeploymentMode::Direct }
    }

    /// Dispatcher-backed deployment config
    pub fn upgradeable(admin: Address, manager: Address) -> Self {
        Self { admin, manager, mode: DeploymentMode::Upgradeable }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> PoolResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|_| PoolError::InvalidConfig { reason: "malformed pool config" })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> PoolResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|_| PoolError::InvalidConfig { reason: "unserializable pool config" })
    }

    pub fn validate(&self) -> PoolResult<()> {
        if is_zero_address(&self.admin) {
            return Err(PoolError::InvalidAddress { reason: "admin is the zero address" });
        }
        if is_zero_address(&self.manager) {
            return Err(PoolError::InvalidAddress { reason: "manager is the zero address" });
        }
        Ok(())
    }
}

/// Serde adapter writing addresses as `0x`-prefixed hex
pub mod hex_address {
    use ethpool_common::Address;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(address)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.strip_prefix("0x").unwrap_or(&raw);
        let mut address = [0u8; 32];
        hex::decode_to_slice(digits, &mut address).map_err(D::Error::custom)?;
        Ok(address)
    }
}
