//! ETHPool - Custodial Reward Pool
//!
//! Depositors pool funds; a Distributor periodically adds rewards that are
//! split across every active depositor in proportion to their balance at
//! that instant. Depositors withdraw their full balance at any time.
//!
//! ## Components
//!
//! - [`registry::ActiveMemberRegistry`]: dense set of positive-balance
//!   accounts with O(1) swap-pop removal
//! - [`ledger::PoolLedger`]: balances, pool total, deposit / reward /
//!   withdraw, role management
//! - [`dispatcher::Dispatcher`]: single-lock front for upgradeable
//!   deployments; the ledger rejects calls that bypass it
//!
//! ```
//! use ethpool::{CallContext, PoolLedger, PayoutRecorder, Role};
//!
//! let (admin, manager, team, alice) = ([1u8; 32], [2u8; 32], [3u8; 32], [4u8; 32]);
//! let mut pool = PoolLedger::new(admin, manager);
//! pool.grant_role(&CallContext::direct(manager), Role::Distributor, team).unwrap();
//!
//! pool.deposit(&CallContext::direct(alice), 100).unwrap();
//! pool.deposit_reward(&CallContext::direct(team), 10).unwrap();
//! assert_eq!(pool.balance_of(&alice), 110);
//!
//! let mut payouts = PayoutRecorder::new();
//! pool.withdraw(&CallContext::direct(alice), &mut payouts).unwrap();
//! assert_eq!(payouts.payouts(), &[(alice, 110)]);
//! ```

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod ledger;
pub mod registry;
pub mod transfer;


pub use config::PoolConfig;
pub use context::{CallContext, DispatchToken, Route};
pub use dispatcher::Dispatcher;
pub use ledger::PoolLedger;
pub use registry::{ActiveMemberRegistry, Removal};
pub use transfer::{FundsTransfer, PayoutRecorder};

pub use ethpool_common::{
    Address, Amount, DeploymentMode, EventRecord, EventType, ImplementationVersion, PoolError,
    PoolEvent, PoolResult, Role,
};
