//! Pool Events
//!
//! Append-only audit log of every successful mutating operation. Events can
//! be indexed off-chain for building UIs, analytics and notifications.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::access_control::Role;
use crate::types::{Address, Amount, ImplementationVersion};
use crate::Vec;

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Ledger Events (0x01 - 0x1F)
    Deposit = 0x01,
    Withdrawal = 0x02,
    RewardDeposit = 0x03,

    // Access Control Events (0x20 - 0x3F)
    RoleGranted = 0x20,
    RoleRevoked = 0x21,

    // Dispatcher Events (0x40 - 0x5F)
    Upgraded = 0x40,
}

/// Main event enum containing all possible pool events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolEvent {
    /// Funds added to an account's balance
    Deposit { account: Address, amount: Amount },

    /// Full balance paid out to an account
    Withdrawal { account: Address, amount: Amount },

    /// Reward distributed across active members
    RewardDeposit { amount: Amount },

    /// Role granted; `sender` is the caller
    RoleGranted { role: Role, account: Address, sender: Address },

    /// Role revoked or renounced; `sender` is the caller
    RoleRevoked { role: Role, account: Address, sender: Address },

    /// New logic installed behind the dispatcher
    Upgraded { version: ImplementationVersion },
}

impl PoolEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Deposit { .. } => EventType::Deposit,
            Self::Withdrawal { .. } => EventType::Withdrawal,
            Self::RewardDeposit { .. } => EventType::RewardDeposit,
            Self::RoleGranted { .. } => EventType::RoleGranted,
            Self::RoleRevoked { .. } => EventType::RoleRevoked,
            Self::Upgraded { .. } => EventType::Upgraded,
        }
    }

    /// Account the event concerns, if any
    pub fn account(&self) -> Option<&Address> {
        match self {
            Self::Deposit { account, .. }
            | Self::Withdrawal { account, .. }
            | Self::RoleGranted { account, .. }
            | Self::RoleRevoked { account, .. } => Some(account),
            Self::RewardDeposit { .. } | Self::Upgraded { .. } => None,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// An event together with its position in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EventRecord {
    /// Monotonic sequence number, starting at 0
    pub sequence: u64,
    /// The event itself
    pub event: PoolEvent,
}

/// Append-only event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Emit an event (append to log)
    pub fn emit(&mut self, event: PoolEvent) {
        let sequence = self.records.len() as u64;
        self.records.push(EventRecord { sequence, event });
    }

    /// Get all events
    pub fn events(&self) -> &[EventRecord] {
        &self.records
    }

    /// Events recorded at or after `sequence`
    pub fn since(&self, sequence: u64) -> &[EventRecord] {
        let start = (sequence as usize).min(self.records.len());
        &self.records[start..]
    }

    /// Most recent event
    pub fn last(&self) -> Option<&PoolEvent> {
        self.records.last().map(|r| &r.event)
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|r| r.event.event_type() == event_type)
            .collect()
    }

    /// Events concerning `account`
    pub fn for_account(&self, account: &Address) -> Vec<&EventRecord> {
        self.records
            .iter()
            .filter(|r| r.event.account() == Some(account))
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.records.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
