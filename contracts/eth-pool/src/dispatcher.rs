//! Dispatcher
//!
//! Front door of an upgradeable pool. Owns the ledger state behind a single
//! lock, forwards every call with its dispatch token, and tracks which logic
//! version is installed.
//!
//! Every operation holds the lock from start to finish, withdrawals included,
//! so calls from other threads wait for the payout to settle or revert. The
//! lock is reentrant: a payee calling back into the dispatcher during its
//! transfer sees the committed withdrawal (its balance already zeroed), and a
//! failed transfer rolls back whatever those nested calls changed along with
//! the withdrawal itself.

use std::cell::{RefCell, RefMut};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use tracing::{info, warn};

use ethpool_common::constants::log_targets::DISPATCHER;
use ethpool_common::{
    Address, Amount, DeploymentMode, EventRecord, ImplementationVersion, PoolError, PoolResult,
    Role,
};

use crate::config::PoolConfig;
use crate::context::{CallContext, DispatchToken};
use crate::ledger::PoolLedger;
use crate::transfer::FundsTransfer;

#[derive(Clone)]
struct DispatchedState {
    ledger: PoolLedger,
    implementation: ImplementationVersion,
}

type StateGuard<'a> = ReentrantMutexGuard<'a, RefCell<DispatchedState>>;

/// Serialising, token-bearing front for a pool ledger
pub struct Dispatcher {
    token: DispatchToken,
    state: ReentrantMutex<RefCell<DispatchedState>>,
}

/// Exclusive access to the state under an already held lock
///
/// Fails instead of panicking when the same thread is already inside the
/// state, e.g. a mutating call issued from an `inspect` closure.
fn state_mut<'g>(guard: &'g StateGuard<'_>) -> PoolResult<RefMut<'g, DispatchedState>> {
    guard.try_borrow_mut().map_err(|_| PoolError::ReentrantCall)
}

impl Dispatcher {
    /// Initialise a pool behind a fresh dispatcher
    pub fn deploy(config: &PoolConfig) -> PoolResult<Self> {
        config.validate()?;
        if config.mode != DeploymentMode::Upgradeable {
            return Err(PoolError::InvalidConfig { reason: "dispatcher requires upgradeable mode" });
        }

        let token = DispatchToken::mint();
        let ledger = PoolLedger::bound(config.admin, config.manager, &token);
        info!(
            target: DISPATCHER,
            admin = %hex::encode(config.admin),
            manager = %hex::encode(config.manager),
            "pool deployed"
        );

        Ok(Self {
            token,
            state: ReentrantMutex::new(RefCell::new(DispatchedState {
                ledger,
                implementation: ImplementationVersion::INITIAL,
            })),
        })
    }

    fn context(&self, caller: Address) -> CallContext {
        CallContext::delegated(caller, &self.token)
    }

    /// Run one mutating ledger call under the lock
    fn mutate<R>(
        &self,
        caller: Address,
        op: impl FnOnce(&mut PoolLedger, &CallContext) -> PoolResult<R>,
    ) -> PoolResult<R> {
        let ctx = self.context(caller);
        let guard = self.state.lock();
        let mut state = state_mut(&guard)?;
        op(&mut state.ledger, &ctx)
    }

    fn read<R>(&self, op: impl FnOnce(&DispatchedState) -> R) -> R {
        let guard = self.state.lock();
        let state = guard.borrow();
        op(&state)
    }

    // ========================================================================
    // Mutating Operations
    // ========================================================================

    pub fn deposit(&self, caller: Address, amount: Amount) -> PoolResult<Amount> {
        self.mutate(caller, |ledger, ctx| ledger.deposit(ctx, amount))
    }

    pub fn deposit_reward(&self, caller: Address, amount: Amount) -> PoolResult<Amount> {
        self.mutate(caller, |ledger, ctx| ledger.deposit_reward(ctx, amount))
    }

    /// Withdraw `caller`'s full balance and pay it out through `transfer`
    ///
    /// The lock is held across the transfer. If it fails, the pool returns to
    /// its state from before the withdrawal, discarding nested calls made by
    /// the payee.
    pub fn withdraw<T>(&self, caller: Address, transfer: &mut T) -> PoolResult<Amount>
    where
        T: FundsTransfer + ?Sized,
    {
        let ctx = self.context(caller);
        let guard = self.state.lock();

        let (payout, snapshot) = {
            let mut state = state_mut(&guard)?;
            let snapshot = (*state).clone();
            (state.ledger.commit_withdrawal(&ctx)?, snapshot)
        };

        // State borrow released, lock still held
        let outcome = transfer.transfer(payout.account(), payout.amount());

        let mut state = state_mut(&guard)?;
        match outcome {
            Ok(()) => Ok(state.ledger.settle(payout)),
            Err(err) => {
                *state = snapshot;
                warn!(
                    target: DISPATCHER,
                    account = %hex::encode(caller),
                    code = err.code(),
                    "payout failed, pool restored"
                );
                Err(err)
            }
        }
    }

    pub fn grant_role(&self, caller: Address, role: Role, account: Address) -> PoolResult<()> {
        self.mutate(caller, |ledger, ctx| ledger.grant_role(ctx, role, account))
    }

    pub fn revoke_role(&self, caller: Address, role: Role, account: Address) -> PoolResult<()> {
        self.mutate(caller, |ledger, ctx| ledger.revoke_role(ctx, role, account))
    }

    pub fn renounce_role(&self, caller: Address, role: Role, account: Address) -> PoolResult<()> {
        self.mutate(caller, |ledger, ctx| ledger.renounce_role(ctx, role, account))
    }

    /// Install a newer logic version; Admin only
    pub fn upgrade_to(&self, caller: Address, version: ImplementationVersion) -> PoolResult<()> {
        let ctx = self.context(caller);
        let guard = self.state.lock();
        let mut state = state_mut(&guard)?;

        if !state.ledger.has_role(Role::Admin, &caller) {
            return Err(PoolError::Unauthorized { role: Role::Admin, caller });
        }
        if version <= state.implementation {
            return Err(PoolError::InvalidConfig { reason: "implementation version must increase" });
        }

        state.ledger.record_upgrade(&ctx, version)?;
        state.implementation = version;
        info!(target: DISPATCHER, version = version.0, "implementation upgraded");
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn implementation(&self) -> ImplementationVersion {
        self.read(|state| state.implementation)
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.read(|state| state.ledger.balance_of(account))
    }

    pub fn pool_balance(&self) -> Amount {
        self.read(|state| state.ledger.pool_balance())
    }

    pub fn active_member_at(&self, index: usize) -> PoolResult<Address> {
        self.read(|state| state.ledger.active_member_at(index))
    }

    pub fn active_member_position(&self, account: &Address) -> usize {
        self.read(|state| state.ledger.active_member_position(account))
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.read(|state| state.ledger.has_role(role, account))
    }

    pub fn role_admin(&self, role: Role) -> Role {
        self.read(|state| state.ledger.role_admin(role))
    }

    /// Copy of the event log
    pub fn events(&self) -> Vec<EventRecord> {
        self.read(|state| state.ledger.events().to_vec())
    }

    /// Run a read-only closure against the ledger
    ///
    /// Mutating calls made from inside `f` fail with `ReentrantCall`.
    pub fn inspect<R>(&self, f: impl FnOnce(&PoolLedger) -> R) -> R {
        self.read(|state| f(&state.ledger))
    }
}
