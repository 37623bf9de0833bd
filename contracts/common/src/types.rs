//! Core Types for the ETHPool engine

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// 32-byte account identifier
pub type Address = [u8; 32];

/// Currency amount in base units
pub type Amount = u64;

/// 32-byte role identifier
pub type RoleId = [u8; 32];

/// The reserved all-zero address
pub const ZERO_ADDRESS: Address = [0u8; 32];

/// Returns true for the reserved all-zero address
pub fn is_zero_address(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// How a pool instance is packaged
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
#[serde(rename_all = "snake_case")]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum DeploymentMode {
    /// Ledger is called directly; no dispatcher guard
    #[default]
    Direct = 0,
    /// Ledger state lives behind a dispatcher; direct calls are rejected
    Upgradeable = 1,
}

/// Version of the logic installed behind a dispatcher
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, BorshSerialize,
    BorshDeserialize,
)]
pub struct ImplementationVersion(pub u32);

impl ImplementationVersion {
    /// Version installed at deployment
    pub const INITIAL: Self = Self(1);
}
