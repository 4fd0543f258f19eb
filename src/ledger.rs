//! Reward ledger
//!
//! Owns a fixed catalog, tracks which entries the visitor has unlocked,
//! persists that to a [`KeyValueStore`] and notifies subscribers on each new
//! discovery. Discovery is idempotent: triggers like the scroll listener fire
//! the same id many times per second.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Reward;
use crate::clock::{Clock, SystemClock};
use crate::error::RewardError;
use crate::storage::KeyValueStore;

/// Outcome of [`RewardLedger::discover`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryResult {
    NewlyDiscovered(Reward),
    AlreadyDiscovered,
    NotFound,
}

impl DiscoveryResult {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::NewlyDiscovered(_))
    }
}

/// Read-only view for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerSnapshot {
    pub total_discovered: usize,
    /// Discovered rewards, catalog order.
    pub collected: Vec<Reward>,
    pub all: Vec<Reward>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn Fn(&Reward)>;

/// On-disk record per reward id.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedEntry {
    #[serde(default)]
    discovered: bool,
    #[serde(
        default,
        deserialize_with = "timestamp_if_string",
        skip_serializing_if = "Option::is_none"
    )]
    discovered_at: Option<String>,
}

/// A non-string `discoveredAt` is dropped rather than failing the whole entry.
fn timestamp_if_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

pub struct RewardLedger<S = Box<dyn KeyValueStore>, C = SystemClock> {
    rewards: Vec<Reward>,
    store: S,
    clock: C,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore, C: Clock> RewardLedger<S, C> {
    /// Builds a ledger over `catalog` and immediately hydrates it from `key`.
    pub fn new(catalog: Vec<Reward>, store: S, clock: C, key: impl Into<String>) -> Self {
        let rewards = catalog
            .into_iter()
            .map(|mut r| {
                r.discovered = false;
                r.discovered_at = None;
                r
            })
            .collect();
        let mut ledger = Self {
            rewards,
            store,
            clock,
            key: key.into(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        ledger.restore();
        ledger
    }

    /// Applies persisted unlocks on top of the current state. Any failure means
    /// "nothing persisted".
    pub fn restore(&mut self) {
        let saved = match self.load() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(key = %self.key, "ignoring persisted rewards: {e}");
                return;
            }
        };
        let mut restored = 0usize;
        for reward in &mut self.rewards {
            let Some(value) = saved.get(reward.id) else {
                continue;
            };
            let entry: PersistedEntry = match serde_json::from_value(value.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(id = reward.id, "skipping malformed entry: {e}");
                    continue;
                }
            };
            if !entry.discovered {
                continue;
            }
            reward.discovered = true;
            reward.discovered_at = entry.discovered_at.as_deref().and_then(parse_timestamp);
            restored += 1;
        }
        tracing::debug!(key = %self.key, restored, "rewards restored");
    }

    /// Unlocks `id`, persisting and notifying on the first call only.
    pub fn discover(&mut self, id: &str) -> DiscoveryResult {
        match self.try_discover(id) {
            Ok(reward) => DiscoveryResult::NewlyDiscovered(reward),
            Err(RewardError::AlreadyDiscovered(_)) => DiscoveryResult::AlreadyDiscovered,
            Err(e @ RewardError::NotFound(_)) => {
                tracing::debug!("{e}");
                DiscoveryResult::NotFound
            }
            // try_discover logs and absorbs storage failures itself.
            Err(
                e @ (RewardError::PersistenceUnavailable(_)
                | RewardError::MalformedPersistedState(_)),
            ) => {
                tracing::warn!(id, "{e}");
                if self.is_discovered(id) {
                    DiscoveryResult::AlreadyDiscovered
                } else {
                    DiscoveryResult::NotFound
                }
            }
        }
    }

    /// Like [`discover`](Self::discover) but reports no-ops as errors. Storage
    /// failures are still swallowed: the unlock holds in memory.
    pub fn try_discover(&mut self, id: &str) -> Result<Reward, RewardError> {
        let now = self.clock.now();
        let reward = self
            .rewards
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RewardError::NotFound(id.to_string()))?;
        if reward.discovered {
            return Err(RewardError::AlreadyDiscovered(id.to_string()));
        }
        reward.discovered = true;
        reward.discovered_at = Some(now);
        let reward = reward.clone();
        tracing::info!(id = reward.id, name = reward.name, "reward discovered");

        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, "reward unlocked for this session only: {e}");
        }
        for (_, listener) in &self.listeners {
            listener(&reward);
        }
        Ok(reward)
    }

    pub fn query(&self) -> LedgerSnapshot {
        let collected: Vec<Reward> = self.rewards.iter().filter(|r| r.discovered).cloned().collect();
        LedgerSnapshot {
            total_discovered: collected.len(),
            collected,
            all: self.rewards.clone(),
        }
    }

    pub fn total_discovered(&self) -> usize {
        self.rewards.iter().filter(|r| r.discovered).count()
    }

    pub fn reward(&self, id: &str) -> Option<&Reward> {
        self.rewards.iter().find(|r| r.id == id)
    }

    pub fn is_discovered(&self, id: &str) -> bool {
        self.reward(id).is_some_and(|r| r.discovered)
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&Reward) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<HashMap<String, serde_json::Value>, RewardError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(HashMap::new());
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes every catalog entry, discovered or not.
    fn persist(&mut self) -> Result<(), RewardError> {
        let entries: BTreeMap<&str, PersistedEntry> = self
            .rewards
            .iter()
            .map(|r| {
                let entry = PersistedEntry {
                    discovered: r.discovered,
                    discovered_at: r
                        .discovered_at
                        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
                };
                (r.id, entry)
            })
            .collect();
        let raw = serde_json::to_string(&entries)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{achievements, hidden_rewards, ids};
    use crate::clock::testing::FixedClock;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    const KEY: &str = "fractalix-rewards";

    fn fresh() -> RewardLedger<MemoryStorage, FixedClock> {
        RewardLedger::new(
            hidden_rewards(),
            MemoryStorage::new(),
            FixedClock::at("2025-03-14T15:09:26Z"),
            KEY,
        )
    }

    /// Backend that refuses every operation, like Safari private mode.
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write(format!("{key}: QuotaExceededError")))
        }
    }

    #[test]
    fn first_click_end_to_end() {
        let mut ledger = fresh();
        assert!(ledger.discover(ids::FIRST_CLICK).is_new());
        assert_eq!(ledger.total_discovered(), 1);
        assert_eq!(ledger.discover(ids::FIRST_CLICK), DiscoveryResult::AlreadyDiscovered);
        assert_eq!(ledger.total_discovered(), 1);

        let store = ledger.store().clone();
        let restored = RewardLedger::new(
            hidden_rewards(),
            store,
            FixedClock::at("2025-03-15T00:00:00Z"),
            KEY,
        );
        assert_eq!(restored.total_discovered(), 1);
        assert!(restored.is_discovered(ids::FIRST_CLICK));
    }

    #[test]
    fn rediscovery_keeps_original_timestamp() {
        let mut ledger = fresh();
        ledger.discover(ids::SCROLL_MASTER);
        let first = ledger.reward(ids::SCROLL_MASTER).unwrap().discovered_at;
        assert!(first.is_some());

        ledger.clock.advance_secs(60);
        for _ in 0..5 {
            assert_eq!(ledger.discover(ids::SCROLL_MASTER), DiscoveryResult::AlreadyDiscovered);
        }
        assert_eq!(ledger.reward(ids::SCROLL_MASTER).unwrap().discovered_at, first);
    }

    #[test]
    fn unknown_id_neither_mutates_nor_persists() {
        let mut ledger = fresh();
        assert_eq!(ledger.discover("KONAMI_MASTER"), DiscoveryResult::NotFound);
        assert_eq!(ledger.total_discovered(), 0);
        assert_eq!(ledger.store().get(KEY).unwrap(), None);
        assert!(matches!(ledger.try_discover("nope"), Err(RewardError::NotFound(_))));
    }

    #[test]
    fn round_trip_preserves_subset_and_seconds() {
        let mut ledger = fresh();
        ledger.discover(ids::GLOBE_EXPLORER);
        ledger.clock.advance_secs(42);
        ledger.discover(ids::LONG_READER);
        let before = ledger.query();

        let restored = RewardLedger::new(
            hidden_rewards(),
            ledger.store().clone(),
            FixedClock::at("2030-01-01T00:00:00Z"),
            KEY,
        );
        let after = restored.query();
        let ids_of = |s: &LedgerSnapshot| s.collected.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids_of(&after), vec![ids::GLOBE_EXPLORER, ids::LONG_READER]);
        for (a, b) in before.collected.iter().zip(after.collected.iter()) {
            assert_eq!(
                a.discovered_at.map(|t| t.timestamp()),
                b.discovered_at.map(|t| t.timestamp())
            );
        }
    }

    #[test]
    fn persisted_layout_uses_camel_case_and_lists_every_entry() {
        let mut ledger = fresh();
        ledger.discover(ids::FIRST_CLICK);
        let raw = ledger.store().get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 8);
        assert_eq!(map[ids::FIRST_CLICK]["discovered"], true);
        assert_eq!(map[ids::FIRST_CLICK]["discoveredAt"], "2025-03-14T15:09:26.000Z");
        assert_eq!(map[ids::MENU_MASTER]["discovered"], false);
        assert!(map[ids::MENU_MASTER].get("discoveredAt").is_none());
    }

    #[test]
    fn restores_browser_written_state() {
        let saved = r#"{
            "NIGHT_VISITOR": {"discovered": true, "discoveredAt": "2024-11-02T02:13:45.120Z"},
            "AUDIT_TYPO": {"discovered": true},
            "TERRAIN_ARTIST": {"discovered": false}
        }"#;
        let ledger = RewardLedger::new(
            hidden_rewards(),
            MemoryStorage::new().with_entry(KEY, saved),
            FixedClock::at("2025-01-01T12:00:00Z"),
            KEY,
        );
        assert_eq!(ledger.total_discovered(), 1);
        let night = ledger.reward(ids::NIGHT_VISITOR).unwrap();
        assert_eq!(
            night.discovered_at.map(|t| t.to_rfc3339()),
            Some("2024-11-02T02:13:45.120+00:00".to_string())
        );
    }

    #[test]
    fn malformed_state_means_nothing_discovered() {
        for saved in ["{not json", "[1, 2, 3]", "\"FIRST_CLICK\"", "null"] {
            let ledger = RewardLedger::new(
                hidden_rewards(),
                MemoryStorage::new().with_entry(KEY, saved),
                FixedClock::at("2025-01-01T12:00:00Z"),
                KEY,
            );
            assert_eq!(ledger.total_discovered(), 0, "input: {saved}");
        }
    }

    #[test]
    fn malformed_entry_only_skips_that_entry() {
        let saved = r#"{
            "FIRST_CLICK": 7,
            "SCROLL_MASTER": {"discovered": true, "discoveredAt": "yesterday"}
        }"#;
        let ledger = RewardLedger::new(
            hidden_rewards(),
            MemoryStorage::new().with_entry(KEY, saved),
            FixedClock::at("2025-01-01T12:00:00Z"),
            KEY,
        );
        assert!(!ledger.is_discovered(ids::FIRST_CLICK));
        let scroll = ledger.reward(ids::SCROLL_MASTER).unwrap();
        assert!(scroll.discovered);
        assert_eq!(scroll.discovered_at, None);
    }

    #[test]
    fn non_string_timestamp_keeps_entry_discovered() {
        for stamp in ["1731000000000", "{\"ms\": 5}", "true", "null"] {
            let saved = format!(
                r#"{{"SCROLL_MASTER": {{"discovered": true, "discoveredAt": {stamp}}}}}"#
            );
            let ledger = RewardLedger::new(
                hidden_rewards(),
                MemoryStorage::new().with_entry(KEY, &saved),
                FixedClock::at("2025-01-01T12:00:00Z"),
                KEY,
            );
            let scroll = ledger.reward(ids::SCROLL_MASTER).unwrap();
            assert!(scroll.discovered, "discoveredAt: {stamp}");
            assert_eq!(scroll.discovered_at, None);
            assert_eq!(ledger.total_discovered(), 1);
        }
    }

    #[test]
    fn storage_failure_does_not_escape_discovery() {
        let mut ledger = RewardLedger::new(
            hidden_rewards(),
            BrokenStorage,
            FixedClock::at("2025-01-01T12:00:00Z"),
            KEY,
        );
        let reward = ledger.try_discover(ids::LONG_READER).unwrap();
        assert!(reward.discovered);
        assert!(matches!(
            ledger.try_discover(ids::LONG_READER),
            Err(RewardError::AlreadyDiscovered(_))
        ));
        assert_eq!(ledger.discover("MISSING"), DiscoveryResult::NotFound);
    }

    #[test]
    fn broken_storage_keeps_session_state() {
        let mut ledger = RewardLedger::new(
            hidden_rewards(),
            BrokenStorage,
            FixedClock::at("2025-01-01T12:00:00Z"),
            KEY,
        );
        assert!(ledger.discover(ids::CONTACT_READY).is_new());
        assert!(ledger.is_discovered(ids::CONTACT_READY));
        assert_eq!(ledger.discover(ids::CONTACT_READY), DiscoveryResult::AlreadyDiscovered);
    }

    #[test]
    fn catalog_state_is_reset_on_construction() {
        let mut catalog = achievements();
        catalog[0].discovered = true;
        let ledger = RewardLedger::new(
            catalog,
            MemoryStorage::new(),
            FixedClock::at("2025-01-01T12:00:00Z"),
            "fractalix-achievements",
        );
        assert_eq!(ledger.total_discovered(), 0);
    }

    #[test]
    fn subscribers_hear_only_new_discoveries() {
        let mut ledger = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = seen.clone();
            ledger.subscribe(move |r| seen.borrow_mut().push(r.id))
        };
        ledger.discover(ids::FIRST_CLICK);
        ledger.discover(ids::FIRST_CLICK);
        ledger.discover("UNKNOWN");
        assert!(ledger.unsubscribe(sub));
        ledger.discover(ids::MENU_MASTER);
        assert_eq!(*seen.borrow(), vec![ids::FIRST_CLICK]);
        assert!(!ledger.unsubscribe(sub));
    }

    #[test]
    fn query_lists_collected_in_catalog_order() {
        let mut ledger = fresh();
        ledger.discover(ids::CONTACT_READY);
        ledger.discover(ids::FIRST_CLICK);
        let snap = ledger.query();
        assert_eq!(snap.total_discovered, 2);
        assert_eq!(snap.all.len(), ledger.len());
        let order: Vec<_> = snap.collected.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![ids::FIRST_CLICK, ids::CONTACT_READY]);
    }
}
