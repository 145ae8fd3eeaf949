use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::animation::spring::{Spring, SpringConfig};

/// Handle to one spring owned by a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpringId(u64);

/// Per-element entrance delay: `base + index * increment` seconds.
#[must_use]
pub fn stagger_delay(index: usize, base_seconds: f64, increment_seconds: f64) -> f64 {
    base_seconds + index as f64 * increment_seconds
}

#[derive(Debug, Clone, PartialEq)]
struct TimelineEntry {
    spring: Spring,
    /// Target applied once the timeline clock reaches `due_at`.
    pending: Option<(f64, f64)>,
}

/// Clock-driven set of independently addressable springs.
///
/// The timeline owns the continuous time model: callers feed frame deltas via
/// [`Timeline::tick`] and the timeline activates delayed targets and steps
/// every live spring. Removing an entry cancels both its spring evolution and
/// any pending delayed target, so no callbacks outlive their element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    now_seconds: f64,
    next_id: u64,
    entries: IndexMap<SpringId, TimelineEntry>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_seconds(&self) -> f64 {
        self.now_seconds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn spawn(&mut self, initial: f64, config: SpringConfig) -> SpringId {
        let id = SpringId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            TimelineEntry {
                spring: Spring::new(initial, config),
                pending: None,
            },
        );
        id
    }

    /// Spawns a spring that holds `initial` until `delay_seconds` elapse, then
    /// animates toward `target`. Used for staggered entrance sequences.
    pub fn spawn_delayed(
        &mut self,
        initial: f64,
        target: f64,
        delay_seconds: f64,
        config: SpringConfig,
    ) -> SpringId {
        let id = self.spawn(initial, config);
        let due_at = self.now_seconds + delay_seconds.max(0.0);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.pending = Some((due_at, target));
        }
        id
    }

    /// Retargets a spring immediately, superseding any pending delayed target.
    pub fn retarget(&mut self, id: SpringId, target: f64) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.pending = None;
            entry.spring.set_target(target);
        }
    }

    pub fn jump(&mut self, id: SpringId, value: f64) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.pending = None;
            entry.spring.jump(value);
        }
    }

    /// Cancels the spring and any pending delayed target.
    pub fn remove(&mut self, id: SpringId) {
        self.entries.shift_remove(&id);
    }

    #[must_use]
    pub fn value(&self, id: SpringId) -> Option<f64> {
        self.entries.get(&id).map(|entry| entry.spring.current())
    }

    #[must_use]
    pub fn is_at_rest(&self, id: SpringId) -> Option<bool> {
        self.entries
            .get(&id)
            .map(|entry| entry.spring.is_at_rest() && entry.pending.is_none())
    }

    /// True when every spring has settled and no delayed target is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries
            .values()
            .all(|entry| entry.spring.is_at_rest() && entry.pending.is_none())
    }

    /// Advances the clock, activates due delayed targets, steps all springs.
    pub fn tick(&mut self, delta_seconds: f64) {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return;
        }
        self.now_seconds += delta_seconds;
        let now = self.now_seconds;
        for entry in self.entries.values_mut() {
            if let Some((due_at, target)) = entry.pending
                && now >= due_at
            {
                entry.pending = None;
                entry.spring.set_target(target);
            }
            entry.spring.step(delta_seconds);
        }
    }
}
