//! Tunables for the reward triggers.
//!
//! Defaults match the live site. A JSON object under [`SETTINGS_KEY`] may
//! override any subset of fields; anything unreadable falls back to defaults.

use serde::Deserialize;

use crate::storage::KeyValueStore;

pub const SETTINGS_KEY: &str = "fractalix-settings";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RewardsConfig {
    /// Storage key for the promo rewards ledger
    #[serde(default = "default_rewards_key")]
    pub rewards_key: String,

    /// Storage key for the achievements ledger
    #[serde(default = "default_achievements_key")]
    pub achievements_key: String,

    /// How long a discovery toast stays up
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u32,

    #[serde(default = "default_scroll_epsilon_px")]
    pub scroll_epsilon_px: f64,

    /// Seconds on site before LONG_READER unlocks
    #[serde(default = "default_long_read_secs")]
    pub long_read_secs: u64,

    /// Delay before the night reward pops, so it does not collide with the boot screen
    #[serde(default = "default_night_visitor_delay_ms")]
    pub night_visitor_delay_ms: u32,

    /// Distinct CTA buttons to hover for CONTACT_READY
    #[serde(default = "default_cta_required")]
    pub cta_required: usize,

    /// Fan menu entries; opening all of them unlocks MENU_MASTER
    #[serde(default = "default_menu_items")]
    pub menu_items: Vec<String>,

    #[serde(default = "default_konami_overlay_secs")]
    pub konami_overlay_secs: u32,
}

fn default_rewards_key() -> String {
    "fractalix-rewards".to_string()
}

fn default_achievements_key() -> String {
    "fractalix-achievements".to_string()
}

fn default_notification_secs() -> u32 {
    8
}

fn default_scroll_epsilon_px() -> f64 {
    crate::triggers::DEFAULT_SCROLL_EPSILON_PX
}

fn default_long_read_secs() -> u64 {
    180
}

fn default_night_visitor_delay_ms() -> u32 {
    2000
}

fn default_cta_required() -> usize {
    3
}

fn default_menu_items() -> Vec<String> {
    ["hub", "services", "research", "ventures", "join", "contact"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_konami_overlay_secs() -> u32 {
    5
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            rewards_key: default_rewards_key(),
            achievements_key: default_achievements_key(),
            notification_secs: default_notification_secs(),
            scroll_epsilon_px: default_scroll_epsilon_px(),
            long_read_secs: default_long_read_secs(),
            night_visitor_delay_ms: default_night_visitor_delay_ms(),
            cta_required: default_cta_required(),
            menu_items: default_menu_items(),
            konami_overlay_secs: default_konami_overlay_secs(),
        }
    }
}

impl RewardsConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!("invalid {SETTINGS_KEY}, using defaults: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::debug!("settings unavailable: {e}");
                Self::default()
            }
        }
    }

    pub fn notification_ms(&self) -> u32 {
        self.notification_secs.saturating_mul(1000)
    }
}
