//! Hidden rewards and achievements for the FRACTALIX.LAB site.
//!
//! The core is framework-free apart from [`toast`]'s reducer: the browser
//! shell owns a [`RewardLedger`], forwards DOM events into the triggers and
//! renders [`LedgerSnapshot`]s.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod sequence;
pub mod storage;
pub mod toast;
pub mod triggers;

pub use catalog::{Reward, achievements, hidden_rewards};
pub use clock::{Clock, SystemClock};
pub use config::RewardsConfig;
pub use error::{RewardError, StorageError};
pub use ledger::{DiscoveryResult, LedgerSnapshot, RewardLedger, SubscriptionId};
pub use sequence::{KONAMI_CODE, SequenceMatcher};
pub use storage::{BrowserStorage, KeyValueStore, MemoryStorage};
pub use toast::{FlagAction, TimedFlag, ToastAction, ToastSlot};
