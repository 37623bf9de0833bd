//! Pool Ledger
//!
//! Balances, the aggregate pool total, and the deposit / reward / withdraw
//! state machine. Each account is either Inactive (zero balance, not
//! registered) or Active (positive balance, registered). Only a deposit can
//! activate an account; only a full withdrawal deactivates it.
//!
//! ## Reward distribution
//!
//! With `P` the pool balance before a reward round, every active member is
//! credited `floor(reward * balance / P)`. The pool balance grows by the full
//! reward, so the truncation remainder ("dust") stays in the pool without
//! belonging to anyone.
//!
//! ## Withdrawal ordering
//!
//! `withdraw` zeroes the balance, deregisters the account and lowers the pool
//! total before any funds move. The payout happens afterwards and the
//! `Withdrawal` event is only recorded once it succeeded. A failed payout
//! restores the account exactly as it was.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use ethpool_common::constants::log_targets::LEDGER;
use ethpool_common::{
    access_control, checked_add, checked_sub, proportional_share, Address, Amount,
    DeploymentMode, EventLog, EventRecord, ImplementationVersion, PoolError, PoolEvent,
    PoolResult, Role, RoleTable,
};

use crate::config::PoolConfig;
use crate::context::{CallContext, DispatchToken, Route};
use crate::registry::{ActiveMemberRegistry, Removal};
use crate::transfer::FundsTransfer;

/// A committed withdrawal whose funds have not moved yet
///
/// Must be either settled or reverted.
#[must_use = "a payout must be settled or reverted"]
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Payout {
    account: Address,
    amount: Amount,
    removal: Removal,
}

impl Payout {
    pub fn account(&self) -> Address {
        self.account
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// The pool accounting engine
#[derive(Debug, Clone)]
pub struct PoolLedger {
    balances: HashMap<Address, Amount>,
    pool_balance: Amount,
    registry: ActiveMemberRegistry,
    roles: RoleTable,
    events: EventLog,
    /// Dispatcher id required on mutating calls, if any
    dispatcher: Option<u64>,
}

impl PoolLedger {
    /// Directly deployed pool: `admin` holds Admin, `manager` holds Manager
    pub fn new(admin: Address, manager: Address) -> Self {
        Self {
            balances: HashMap::new(),
            pool_balance: 0,
            registry: ActiveMemberRegistry::new(),
            roles: RoleTable::new(admin, manager),
            events: EventLog::new(),
            dispatcher: None,
        }
    }

    /// Build a ledger from a validated config
    ///
    /// An upgradeable config yields a bare logic instance: it is bound to a
    /// dispatcher nobody holds, so every mutating call is rejected.
    pub fn from_config(config: &PoolConfig) -> PoolResult<Self> {
        config.validate()?;
        Ok(match config.mode {
            DeploymentMode::Direct => Self::new(config.admin, config.manager),
            DeploymentMode::Upgradeable => {
                Self::bound(config.admin, config.manager, &DispatchToken::mint())
            }
        })
    }

    /// Ledger that only accepts calls forwarded with `token`
    pub(crate) fn bound(admin: Address, manager: Address, token: &DispatchToken) -> Self {
        let mut ledger = Self::new(admin, manager);
        ledger.dispatcher = Some(token.id());
        ledger
    }

    pub fn mode(&self) -> DeploymentMode {
        match self.dispatcher {
            Some(_) => DeploymentMode::Upgradeable,
            None => DeploymentMode::Direct,
        }
    }

    fn ensure_routed(&self, ctx: &CallContext) -> PoolResult<()> {
        match (self.dispatcher, ctx.route()) {
            (None, _) => Ok(()),
            (Some(expected), Route::Delegated(id)) if id == expected => Ok(()),
            _ => {
                warn!(target: LEDGER, caller = %hex::encode(ctx.caller()), "rejected direct call");
                Err(PoolError::DirectCallForbidden)
            }
        }
    }

    // ========================================================================
    // Deposits
    // ========================================================================

    /// Add `amount` to the caller's balance; returns the new balance
    pub fn deposit(&mut self, ctx: &CallContext, amount: Amount) -> PoolResult<Amount> {
        self.ensure_routed(ctx)?;
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let account = ctx.caller();
        let balance = self.balance_of(&account);
        let new_balance = checked_add(balance, amount)?;
        let new_pool = checked_add(self.pool_balance, amount)?;

        if balance == 0 {
            self.registry.add(account)?;
        }
        self.balances.insert(account, new_balance);
        self.pool_balance = new_pool;
        self.events.emit(PoolEvent::Deposit { account, amount });

        debug!(
            target: LEDGER,
            account = %hex::encode(account),
            amount,
            balance = new_balance,
            pool_balance = new_pool,
            "deposit"
        );
        Ok(new_balance)
    }

    /// Distribute `amount` across active members pro rata
    ///
    /// Returns the sum actually credited to members, which is at most
    /// `amount`.
    pub fn deposit_reward(&mut self, ctx: &CallContext, amount: Amount) -> PoolResult<Amount> {
        self.ensure_routed(ctx)?;
        self.roles.check_role(Role::Distributor, &ctx.caller())?;
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }
        if self.registry.is_empty() {
            return Err(PoolError::NoActiveUsers);
        }

        let pool_before = self.pool_balance;
        let new_pool = checked_add(pool_before, amount)?;

        // Compute every credit against the pre-reward snapshot before writing
        let mut credited: Amount = 0;
        let mut updates = Vec::with_capacity(self.registry.count());
        for member in self.registry.members() {
            let balance = self.balance_of(member);
            let share = proportional_share(amount, balance, pool_before)?;
            credited = checked_add(credited, share)?;
            updates.push((*member, checked_add(balance, share)?));
        }

        for (member, balance) in updates {
            self.balances.insert(member, balance);
        }
        self.pool_balance = new_pool;
        self.events.emit(PoolEvent::RewardDeposit { amount });

        debug!(
            target: LEDGER,
            amount,
            credited,
            dust = amount - credited,
            members = self.registry.count(),
            pool_balance = new_pool,
            "reward distributed"
        );
        Ok(credited)
    }

    // ========================================================================
    // Withdrawals
    // ========================================================================

    /// Withdraw the caller's full balance and pay it out through `transfer`
    ///
    /// A failed transfer leaves the ledger exactly as it was.
    pub fn withdraw<T>(&mut self, ctx: &CallContext, transfer: &mut T) -> PoolResult<Amount>
    where
        T: FundsTransfer + ?Sized,
    {
        let payout = self.commit_withdrawal(ctx)?;
        match transfer.transfer(payout.account, payout.amount) {
            Ok(()) => Ok(self.settle(payout)),
            Err(err) => {
                self.revert_payout(payout)?;
                Err(err)
            }
        }
    }

    /// Commit a full withdrawal of the caller's balance
    ///
    /// State is final when this returns; the funds still have to move. Pass
    /// the result to `settle` after a successful transfer or to
    /// `revert_payout` after a failed one.
    pub(crate) fn commit_withdrawal(&mut self, ctx: &CallContext) -> PoolResult<Payout> {
        self.ensure_routed(ctx)?;

        let account = ctx.caller();
        let amount = self.balance_of(&account);
        if amount == 0 {
            return Err(PoolError::ZeroBalance { account });
        }
        let new_pool = checked_sub(self.pool_balance, amount)?;

        let removal = self.registry.remove(&account)?;
        self.balances.insert(account, 0);
        self.pool_balance = new_pool;

        debug!(
            target: LEDGER,
            account = %hex::encode(account),
            amount,
            pool_balance = new_pool,
            "withdrawal committed"
        );
        Ok(Payout { account, amount, removal })
    }

    /// Record a delivered payout; returns the amount paid
    pub(crate) fn settle(&mut self, payout: Payout) -> Amount {
        self.events.emit(PoolEvent::Withdrawal { account: payout.account, amount: payout.amount });
        payout.amount
    }

    /// Undo a withdrawal whose payout failed
    ///
    /// Re-credits the funds and re-registers the account in its old slot.
    pub(crate) fn revert_payout(&mut self, payout: Payout) -> PoolResult<()> {
        let balance = self.balance_of(&payout.account);
        let new_balance = checked_add(balance, payout.amount)?;
        let new_pool = checked_add(self.pool_balance, payout.amount)?;

        if balance == 0 {
            self.registry.restore(&payout.removal)?;
        }
        self.balances.insert(payout.account, new_balance);
        self.pool_balance = new_pool;

        warn!(
            target: LEDGER,
            account = %hex::encode(payout.account),
            amount = payout.amount,
            "payout failed, withdrawal reverted"
        );
        Ok(())
    }

    // ========================================================================
    // Role Management
    // ========================================================================

    /// Grant `role` to `account`; the caller must hold the role's admin role
    pub fn grant_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> PoolResult<()> {
        self.ensure_routed(ctx)?;
        let changed =
            access_control::grant_role(&mut self.roles, &mut self.events, ctx.caller(), role, account)?;
        if changed {
            info!(target: LEDGER, ?role, account = %hex::encode(account), "role granted");
        }
        Ok(())
    }

    /// Revoke `role` from `account`; the caller must hold the role's admin role
    pub fn revoke_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> PoolResult<()> {
        self.ensure_routed(ctx)?;
        let changed =
            access_control::revoke_role(&mut self.roles, &mut self.events, ctx.caller(), role, account)?;
        if changed {
            info!(target: LEDGER, ?role, account = %hex::encode(account), "role revoked");
        }
        Ok(())
    }

    /// Give up `role`; only `account` itself may renounce
    pub fn renounce_role(&mut self, ctx: &CallContext, role: Role, account: Address) -> PoolResult<()> {
        self.ensure_routed(ctx)?;
        let changed =
            access_control::renounce_role(&mut self.roles, &mut self.events, ctx.caller(), role, account)?;
        if changed {
            info!(target: LEDGER, ?role, account = %hex::encode(account), "role renounced");
        }
        Ok(())
    }

    /// Record a logic upgrade performed by the dispatcher
    pub(crate) fn record_upgrade(
        &mut self,
        ctx: &CallContext,
        version: ImplementationVersion,
    ) -> PoolResult<()> {
        self.ensure_routed(ctx)?;
        self.roles.check_role(Role::Admin, &ctx.caller())?;
        self.events.emit(PoolEvent::Upgraded { version });
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn pool_balance(&self) -> Amount {
        self.pool_balance
    }

    /// Active member at 0-based `index`
    pub fn active_member_at(&self, index: usize) -> PoolResult<Address> {
        self.registry.member_at(index)
    }

    /// 1-based position of `account`, 0 if inactive
    pub fn active_member_position(&self, account: &Address) -> usize {
        self.registry.position(account)
    }

    pub fn active_member_count(&self) -> usize {
        self.registry.count()
    }

    pub fn active_members(&self) -> &[Address] {
        self.registry.members()
    }

    /// Sum of every member balance
    pub fn total_member_balances(&self) -> u128 {
        self.registry
            .members()
            .iter()
            .map(|m| self.balance_of(m) as u128)
            .sum()
    }

    /// Pool funds not attributed to any member
    pub fn unattributed_dust(&self) -> u128 {
        (self.pool_balance as u128).saturating_sub(self.total_member_balances())
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles.has_role(role, account)
    }

    pub fn role_admin(&self, role: Role) -> Role {
        self.roles.role_admin(role)
    }

    pub fn roles_of(&self, account: &Address) -> Vec<Role> {
        access_control::roles_of(&self.roles, account)
    }

    pub fn events(&self) -> &[EventRecord] {
        self.events.events()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    /// Check the membership and conservation invariants
    pub fn is_consistent(&self) -> bool {
        let positive = self.balances.values().filter(|b| **b > 0).count();
        self.registry.is_consistent()
            && positive == self.registry.count()
            && self.registry.members().iter().all(|m| self.balance_of(m) > 0)
            && self.total_member_balances() <= self.pool_balance as u128
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::PayoutRecorder;
    use ethpool_common::EventType;

    fn admin() -> Address {
        [1u8; 32]
    }

    fn manager() -> Address {
        [2u8; 32]
    }

    fn team() -> Address {
        [3u8; 32]
    }

    fn user_a() -> Address {
        [0xA; 32]
    }

    fn user_b() -> Address {
        [0xB; 32]
    }

    fn user_c() -> Address {
        [0xC; 32]
    }

    fn ctx(caller: Address) -> CallContext {
        CallContext::direct(caller)
    }

    fn setup() -> PoolLedger {
        let mut ledger = PoolLedger::new(admin(), manager());
        ledger.grant_role(&ctx(manager()), Role::Distributor, team()).unwrap();
        ledger
    }

    #[test]
    fn test_construction_roles() {
        let ledger = setup();

        assert!(ledger.has_role(Role::Admin, &admin()));
        assert!(!ledger.has_role(Role::Manager, &admin()));
        assert!(ledger.has_role(Role::Manager, &manager()));
        assert!(!ledger.has_role(Role::Distributor, &manager()));
        assert!(ledger.has_role(Role::Distributor, &team()));
        assert_eq!(ledger.role_admin(Role::Distributor), Role::Manager);
        assert_eq!(ledger.mode(), DeploymentMode::Direct);
    }

    #[test]
    fn test_deposit() {
        let mut ledger = setup();

        let balance = ledger.deposit(&ctx(user_a()), 100).unwrap();
        assert_eq!(balance, 100);
        ledger.deposit(&ctx(user_a()), 50).unwrap();

        assert_eq!(ledger.balance_of(&user_a()), 150);
        assert_eq!(ledger.pool_balance(), 150);
        assert_eq!(ledger.active_member_count(), 1);
        assert_eq!(ledger.active_member_position(&user_a()), 1);
        assert_eq!(
            ledger.event_log().last(),
            Some(&PoolEvent::Deposit { account: user_a(), amount: 50 })
        );
    }

    #[test]
    fn test_deposit_zero_rejected() {
        let mut ledger = setup();
        let events_before = ledger.events().len();

        assert_eq!(ledger.deposit(&ctx(user_a()), 0), Err(PoolError::InvalidAmount));
        assert_eq!(ledger.pool_balance(), 0);
        assert_eq!(ledger.active_member_count(), 0);
        assert_eq!(ledger.events().len(), events_before);
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), Amount::MAX).unwrap();

        assert_eq!(ledger.deposit(&ctx(user_b()), 1), Err(PoolError::ArithmeticOverflow));
        assert_eq!(ledger.balance_of(&user_b()), 0);
        assert_eq!(ledger.active_member_position(&user_b()), 0);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_deposit_registers_in_order() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 10).unwrap();
        ledger.deposit(&ctx(user_b()), 20).unwrap();

        assert_eq!(ledger.active_member_at(0), Ok(user_a()));
        assert_eq!(ledger.active_member_at(1), Ok(user_b()));
        assert_eq!(
            ledger.active_member_at(2),
            Err(PoolError::IndexOutOfRange { index: 2, length: 2 })
        );
    }

    #[test]
    fn test_reward_requires_distributor() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();

        for caller in [admin(), manager(), user_a()] {
            assert_eq!(
                ledger.deposit_reward(&ctx(caller), 10),
                Err(PoolError::Unauthorized { role: Role::Distributor, caller })
            );
        }
        assert_eq!(ledger.pool_balance(), 100);
    }

    #[test]
    fn test_reward_zero_rejected() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();
        assert_eq!(ledger.deposit_reward(&ctx(team()), 0), Err(PoolError::InvalidAmount));
    }

    #[test]
    fn test_reward_without_members_rejected() {
        let mut ledger = setup();
        assert_eq!(ledger.deposit_reward(&ctx(team()), 10), Err(PoolError::NoActiveUsers));
    }

    #[test]
    fn test_reward_single_member_gets_everything() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 333).unwrap();

        let credited = ledger.deposit_reward(&ctx(team()), 1_001).unwrap();
        assert_eq!(credited, 1_001);
        assert_eq!(ledger.balance_of(&user_a()), 1_334);
        assert_eq!(ledger.pool_balance(), 1_334);
        assert_eq!(ledger.unattributed_dust(), 0);
    }

    #[test]
    fn test_reward_equal_deposits() {
        let mut ledger = setup();
        for user in [user_a(), user_b(), user_c()] {
            ledger.deposit(&ctx(user), 500).unwrap();
        }

        let credited = ledger.deposit_reward(&ctx(team()), 100).unwrap();

        // floor(100 / 3) = 33 each, 1 unit of dust
        for user in [user_a(), user_b(), user_c()] {
            assert_eq!(ledger.balance_of(&user), 533);
        }
        assert_eq!(credited, 99);
        assert_eq!(ledger.pool_balance(), 1_600);
        assert_eq!(ledger.unattributed_dust(), 1);
    }

    #[test]
    fn test_reward_proportional_deposits() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();
        ledger.deposit(&ctx(user_b()), 200).unwrap();
        ledger.deposit(&ctx(user_c()), 300).unwrap();

        ledger.deposit_reward(&ctx(team()), 60).unwrap();

        assert_eq!(ledger.balance_of(&user_a()), 110);
        assert_eq!(ledger.balance_of(&user_b()), 220);
        assert_eq!(ledger.balance_of(&user_c()), 330);
        assert_eq!(ledger.pool_balance(), 660);
        assert_eq!(ledger.event_log().last(), Some(&PoolEvent::RewardDeposit { amount: 60 }));
    }

    #[test]
    fn test_reward_uses_pre_reward_snapshot() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 7).unwrap();
        ledger.deposit(&ctx(user_b()), 13).unwrap();

        ledger.deposit_reward(&ctx(team()), 11).unwrap();

        // floor(11*7/20) = 3, floor(11*13/20) = 7
        assert_eq!(ledger.balance_of(&user_a()), 10);
        assert_eq!(ledger.balance_of(&user_b()), 20);
        assert_eq!(ledger.pool_balance(), 31);
        assert_eq!(ledger.unattributed_dust(), 1);
    }

    #[test]
    fn test_reward_overflow_leaves_state() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), Amount::MAX - 5).unwrap();

        assert_eq!(ledger.deposit_reward(&ctx(team()), 10), Err(PoolError::ArithmeticOverflow));
        assert_eq!(ledger.balance_of(&user_a()), Amount::MAX - 5);
        assert_eq!(ledger.pool_balance(), Amount::MAX - 5);
    }

    #[test]
    fn test_withdraw() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();
        ledger.deposit(&ctx(user_b()), 200).unwrap();
        let mut recorder = PayoutRecorder::new();

        let paid = ledger.withdraw(&ctx(user_a()), &mut recorder).unwrap();

        assert_eq!(paid, 100);
        assert_eq!(recorder.payouts(), &[(user_a(), 100)]);
        assert_eq!(ledger.balance_of(&user_a()), 0);
        assert_eq!(ledger.pool_balance(), 200);
        assert_eq!(ledger.active_member_position(&user_a()), 0);
        assert_eq!(ledger.active_member_position(&user_b()), 1);
        assert_eq!(
            ledger.event_log().last(),
            Some(&PoolEvent::Withdrawal { account: user_a(), amount: 100 })
        );
    }

    #[test]
    fn test_withdraw_zero_balance() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_b()), 200).unwrap();
        let mut recorder = PayoutRecorder::new();

        let result = ledger.withdraw(&ctx(user_a()), &mut recorder);

        assert_eq!(result, Err(PoolError::ZeroBalance { account: user_a() }));
        assert!(recorder.payouts().is_empty());
        assert_eq!(ledger.pool_balance(), 200);
    }

    #[test]
    fn test_withdraw_commits_before_transfer() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();

        let payout = ledger.commit_withdrawal(&ctx(user_a())).unwrap();

        // Second attempt sees the balance already gone
        assert_eq!(
            ledger.commit_withdrawal(&ctx(user_a())),
            Err(PoolError::ZeroBalance { account: user_a() })
        );
        assert_eq!(ledger.pool_balance(), 0);
        assert_eq!(ledger.filter_withdrawals(), 0);

        assert_eq!(ledger.settle(payout), 100);
        assert_eq!(ledger.filter_withdrawals(), 1);
    }

    #[test]
    fn test_failed_transfer_reverts_exactly() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();
        ledger.deposit(&ctx(user_b()), 200).unwrap();
        ledger.deposit(&ctx(user_c()), 300).unwrap();
        let events_before = ledger.events().len();

        let mut failing = |to: Address, amount: Amount| -> PoolResult<()> {
            Err(PoolError::TransferFailed { to, amount })
        };
        let result = ledger.withdraw(&ctx(user_a()), &mut failing);

        assert_eq!(result, Err(PoolError::TransferFailed { to: user_a(), amount: 100 }));
        assert_eq!(ledger.balance_of(&user_a()), 100);
        assert_eq!(ledger.pool_balance(), 600);
        assert_eq!(ledger.active_members(), &[user_a(), user_b(), user_c()]);
        assert_eq!(ledger.events().len(), events_before);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_rewards_after_withdraw_skip_withdrawn() {
        let mut ledger = setup();
        ledger.deposit(&ctx(user_a()), 100).unwrap();
        ledger.deposit(&ctx(user_b()), 100).unwrap();
        let mut recorder = PayoutRecorder::new();
        ledger.withdraw(&ctx(user_a()), &mut recorder).unwrap();

        ledger.deposit_reward(&ctx(team()), 40).unwrap();

        assert_eq!(ledger.balance_of(&user_a()), 0);
        assert_eq!(ledger.balance_of(&user_b()), 140);
    }

    #[test]
    fn test_role_changes_through_ledger() {
        let mut ledger = setup();

        assert_eq!(
            ledger.grant_role(&ctx(admin()), Role::Distributor, user_a()),
            Err(PoolError::Unauthorized { role: Role::Manager, caller: admin() })
        );

        ledger.revoke_role(&ctx(manager()), Role::Distributor, team()).unwrap();
        assert_eq!(
            ledger.deposit_reward(&ctx(team()), 1),
            Err(PoolError::Unauthorized { role: Role::Distributor, caller: team() })
        );

        ledger.renounce_role(&ctx(manager()), Role::Manager, manager()).unwrap();
        assert!(ledger.roles_of(&manager()).is_empty());
        assert_eq!(ledger.event_log().filter_by_type(EventType::RoleRevoked).len(), 2);
    }

    #[test]
    fn test_role_noops_leave_log_untouched() {
        let mut ledger = setup();
        let events_before = ledger.events().len();

        ledger.grant_role(&ctx(manager()), Role::Distributor, team()).unwrap();
        ledger.revoke_role(&ctx(manager()), Role::Distributor, user_a()).unwrap();
        ledger.renounce_role(&ctx(user_b()), Role::Manager, user_b()).unwrap();

        assert_eq!(ledger.events().len(), events_before);
        assert_eq!(ledger.roles_of(&team()), vec![Role::Distributor]);
    }

    #[test]
    fn test_logic_instance_rejects_direct_calls() {
        let config = PoolConfig::upgradeable(admin(), manager());
        let mut logic = PoolLedger::from_config(&config).unwrap();
        assert_eq!(logic.mode(), DeploymentMode::Upgradeable);

        assert_eq!(logic.deposit(&ctx(user_a()), 10), Err(PoolError::DirectCallForbidden));
        let mut recorder = PayoutRecorder::new();
        assert_eq!(
            logic.withdraw(&ctx(user_a()), &mut recorder),
            Err(PoolError::DirectCallForbidden)
        );
        assert_eq!(logic.deposit_reward(&ctx(team()), 10), Err(PoolError::DirectCallForbidden));
        assert_eq!(
            logic.grant_role(&ctx(manager()), Role::Distributor, team()),
            Err(PoolError::DirectCallForbidden)
        );

        // Reads stay available
        assert!(logic.has_role(Role::Manager, &manager()));
        assert_eq!(logic.pool_balance(), 0);
    }

    #[test]
    fn test_foreign_token_rejected() {
        let token = DispatchToken::mint();
        let other = DispatchToken::mint();
        let mut ledger = PoolLedger::bound(admin(), manager(), &token);

        let foreign = CallContext::delegated(user_a(), &other);
        assert_eq!(ledger.deposit(&foreign, 10), Err(PoolError::DirectCallForbidden));

        let routed = CallContext::delegated(user_a(), &token);
        assert_eq!(ledger.deposit(&routed, 10), Ok(10));
    }

    impl PoolLedger {
        fn filter_withdrawals(&self) -> usize {
            self.events.filter_by_type(EventType::Withdrawal).len()
        }
    }
}
