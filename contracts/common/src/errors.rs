//! Error Types for the ETHPool engine
//!
//! Every failure is a distinct, machine-matchable variant. An operation that
//! returns an error has made no state change.

use thiserror::Error;

use crate::access_control::Role;
use crate::types::{Address, Amount};

/// Result type alias for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Main error enum for all pool errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    // ============ Amount Errors ============
    /// Zero-value deposit or reward
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Reward deposited while nobody holds a balance
    #[error("no active users to receive the reward")]
    NoActiveUsers,

    /// Withdrawal requested with nothing owed
    #[error("account has no balance to withdraw")]
    ZeroBalance { account: Address },

    // ============ Authorization Errors ============
    /// Caller lacks the role required for this operation
    #[error("caller is missing role {role:?}")]
    Unauthorized { role: Role, caller: Address },

    /// Roles can only be renounced by the account holding them
    #[error("roles can only be renounced for self")]
    RenounceNotSelf { account: Address, caller: Address },

    /// Mutating call that did not arrive through the dispatcher
    #[error("function must be called through the dispatcher")]
    DirectCallForbidden,

    /// Mutating call issued while the pool state is borrowed by the same caller
    #[error("pool state is already borrowed by this call")]
    ReentrantCall,

    // ============ Math Errors ============
    /// Checked arithmetic failed
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    // ============ Registry Errors ============
    /// Registry read past its length
    #[error("index {index} out of range for {length} active members")]
    IndexOutOfRange { index: usize, length: usize },

    /// Account is already an active member
    #[error("account is already registered")]
    AlreadyRegistered { account: Address },

    /// Account is not an active member
    #[error("account is not registered")]
    NotRegistered { account: Address },

    // ============ Settlement Errors ============
    /// The external funds transfer for a withdrawal failed
    #[error("transfer of {amount} failed")]
    TransferFailed { to: Address, amount: Amount },

    // ============ Configuration Errors ============
    /// Invalid address (e.g., zero address)
    #[error("invalid address: {reason}")]
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    /// Invalid deployment configuration
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl PoolError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "E010_INVALID_AMOUNT",
            Self::NoActiveUsers => "E011_NO_ACTIVE_USERS",
            Self::ZeroBalance { .. } => "E012_ZERO_BALANCE",
            Self::Unauthorized { .. } => "E020_UNAUTHORIZED",
            Self::RenounceNotSelf { .. } => "E021_RENOUNCE_NOT_SELF",
            Self::DirectCallForbidden => "E022_DIRECT_CALL",
            Self::ReentrantCall => "E023_REENTRANT_CALL",
            Self::ArithmeticOverflow => "E030_OVERFLOW",
            Self::IndexOutOfRange { .. } => "E040_INDEX_OUT_OF_RANGE",
            Self::AlreadyRegistered { .. } => "E041_ALREADY_REGISTERED",
            Self::NotRegistered { .. } => "E042_NOT_REGISTERED",
            Self::TransferFailed { .. } => "E050_TRANSFER_FAILED",
            Self::InvalidAddress { .. } => "E060_INVALID_ADDRESS",
            Self::InvalidConfig { .. } => "E061_INVALID_CONFIG",
        }
    }

    /// Returns true if the caller can fix the condition and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount | Self::NoActiveUsers | Self::TransferFailed { .. }
        )
    }
}
