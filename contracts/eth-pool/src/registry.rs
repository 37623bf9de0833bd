//! Active Member Registry
//!
//! Dense set of the addresses currently holding a positive balance.
//! Members live in a plain vector; a map from address to 1-based slot gives
//! O(1) lookup, insert and swap-pop removal. Slot order is not stable across
//! removals.

use std::collections::HashMap;

use ethpool_common::{Address, PoolError, PoolResult};

/// Record of a swap-pop removal, enough to undo it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// The removed member
    pub account: Address,
    /// 1-based slot it occupied
    pub slot: usize,
    /// Former last member moved into `slot`, if distinct from `account`
    pub moved: Option<Address>,
}

/// Active members with O(1) membership maintenance
#[derive(Debug, Clone, Default)]
pub struct ActiveMemberRegistry {
    members: Vec<Address>,
    positions: HashMap<Address, usize>,
}

impl ActiveMemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `account`; its position becomes the new length
    pub fn add(&mut self, account: Address) -> PoolResult<usize> {
        if self.contains(&account) {
            return Err(PoolError::AlreadyRegistered { account });
        }
        self.members.push(account);
        let slot = self.members.len();
        self.positions.insert(account, slot);
        Ok(slot)
    }

    /// Swap-pop `account` out of the set
    ///
    /// The last member moves into the vacated slot.
    pub fn remove(&mut self, account: &Address) -> PoolResult<Removal> {
        let slot = self
            .positions
            .remove(account)
            .ok_or(PoolError::NotRegistered { account: *account })?;

        let index = slot - 1;
        let last_index = self.members.len() - 1;
        let moved = if index != last_index {
            let last = self.members[last_index];
            self.members[index] = last;
            self.positions.insert(last, slot);
            Some(last)
        } else {
            None
        };
        self.members.pop();

        Ok(Removal { account: *account, slot, moved })
    }

    /// Put a removed member back
    ///
    /// Exactly inverts `remove` when nothing changed in between. If the set
    /// changed, the member still ends up registered and every invariant
    /// holds; only its slot may differ.
    pub fn restore(&mut self, removal: &Removal) -> PoolResult<usize> {
        if self.contains(&removal.account) {
            return Err(PoolError::AlreadyRegistered { account: removal.account });
        }

        let index = removal.slot - 1;
        if index >= self.members.len() {
            return self.add(removal.account);
        }

        // Occupant of the slot goes back to the end
        let occupant = self.members[index];
        self.members[index] = removal.account;
        self.positions.insert(removal.account, removal.slot);
        self.members.push(occupant);
        self.positions.insert(occupant, self.members.len());
        Ok(removal.slot)
    }

    /// 1-based slot of `account`, 0 if absent
    pub fn position(&self, account: &Address) -> usize {
        self.positions.get(account).copied().unwrap_or(0)
    }

    pub fn contains(&self, account: &Address) -> bool {
        self.positions.contains_key(account)
    }

    /// Number of active members
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at 0-based `index`
    pub fn member_at(&self, index: usize) -> PoolResult<Address> {
        self.members
            .get(index)
            .copied()
            .ok_or(PoolError::IndexOutOfRange { index, length: self.members.len() })
    }

    /// All members in slot order
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Check that every position points back at its member
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.members.len()
            && self
                .members
                .iter()
                .enumerate()
                .all(|(i, m)| self.positions.get(m) == Some(&(i + 1)))
    }
}
