//! Unlock conditions fed by the shell's timers and listeners.
//!
//! Everything here is a pure predicate or a tiny counter. Positive results are
//! forwarded to [`RewardLedger::discover`](crate::ledger::RewardLedger::discover),
//! whose idempotence absorbs repeats.

use std::collections::HashSet;

use crate::catalog::ids;

pub const DEFAULT_SCROLL_EPSILON_PX: f64 = 100.0;

/// Midnight up to (not including) 06:00.
pub fn is_night_window(hour: u32) -> bool {
    hour < 6
}

/// 04:00 up to 06:00. Overlaps the night window on purpose.
pub fn is_early_bird_window(hour: u32) -> bool {
    (4..6).contains(&hour)
}

/// Reward ids unlocked by visiting at `hour`. Evaluated once per page load.
pub fn time_gated_rewards(hour: u32) -> Vec<&'static str> {
    let mut out = Vec::new();
    if is_night_window(hour) {
        out.push(ids::NIGHT_VISITOR);
        out.push(ids::NIGHT_OWL);
    }
    if is_early_bird_window(hour) {
        out.push(ids::EARLY_BIRD);
    }
    out
}

/// True when the viewport bottom is within `epsilon_px` of the document end.
/// Runs on every scroll event.
#[inline]
pub fn is_at_bottom(
    scroll_top: f64,
    viewport_height: f64,
    document_height: f64,
    epsilon_px: f64,
) -> bool {
    scroll_top + viewport_height >= document_height - epsilon_px
}

/// Counts seconds on site and fires once the threshold is reached.
#[derive(Debug, Clone)]
pub struct DwellTrigger {
    threshold_secs: u64,
    elapsed_secs: u64,
    fired: bool,
}

impl DwellTrigger {
    pub fn new(threshold_secs: u64) -> Self {
        Self {
            threshold_secs,
            elapsed_secs: 0,
            fired: false,
        }
    }

    /// Call once per elapsed second. True exactly once.
    pub fn tick(&mut self) -> bool {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        if !self.fired && self.elapsed_secs >= self.threshold_secs {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }
}

/// Fires once the visitor has touched `required` distinct things (CTA buttons,
/// menu entries).
#[derive(Debug, Clone)]
pub struct DistinctVisitTrigger {
    required: usize,
    seen: HashSet<String>,
    fired: bool,
}

impl DistinctVisitTrigger {
    pub fn new(required: usize) -> Self {
        Self {
            required,
            seen: HashSet::new(),
            fired: false,
        }
    }

    pub fn visit(&mut self, id: &str) -> bool {
        if self.fired {
            return false;
        }
        self.seen.insert(id.to_string());
        if self.seen.len() >= self.required {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn visited(&self) -> usize {
        self.seen.len()
    }
}
