//! Viewport trigger: maps observed elements to at-most-once firing.
//!
//! The browser's visibility primitive only reports "intersecting or not"; the
//! registry decides what that means. Check-and-set happens inside one call on
//! the single event-loop thread, so a one-shot watch can never fire twice no
//! matter how often intersection toggles.

use std::collections::BTreeMap;

use crate::api::types::WatchId;

/// How a watch reacts to repeated intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Fire on the first intersection, then stop observing.
    Once,
    /// Fire on every intersection and keep observing (reveal classing).
    Repeat,
}

/// What the host should do with an intersection report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Ignore,
    /// Run the action. `first` is set on the first firing for this element.
    Fire { first: bool },
    /// Run the action once and unobserve the element.
    FireAndUnobserve,
}

/// Options for the visibility observer backing a group of watches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportOptions {
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before intersecting.
    pub bottom_margin_px: f64,
}

impl ViewportOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            bottom_margin_px: 0.0,
        }
    }

    pub fn with_bottom_margin(mut self, px: f64) -> Self {
        self.bottom_margin_px = px;
        self
    }

    /// CSS `rootMargin` string, e.g. `0px 0px -100px 0px`.
    pub fn root_margin(&self) -> String {
        let bottom = if self.bottom_margin_px == 0.0 { 0.0 } else { -self.bottom_margin_px };
        format!("0px 0px {bottom}px 0px")
    }
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    mode: WatchMode,
    fired: bool,
}

/// Registry of watched elements and their fired flags.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    watches: BTreeMap<WatchId, Watch>,
    next_id: u32,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mode: WatchMode) -> WatchId {
        let id = WatchId(self.next_id);
        self.next_id += 1;
        self.watches.insert(id, Watch { mode, fired: false });
        id
    }

    /// Feed one intersection report. Unknown ids and non-intersecting reports are ignored.
    pub fn on_intersection(&mut self, id: WatchId, intersecting: bool) -> Trigger {
        if !intersecting {
            return Trigger::Ignore;
        }
        let Some(watch) = self.watches.get_mut(&id) else {
            return Trigger::Ignore;
        };
        let first = !watch.fired;
        watch.fired = true;
        match (watch.mode, first) {
            (WatchMode::Once, true) => Trigger::FireAndUnobserve,
            (WatchMode::Once, false) => Trigger::Ignore,
            (WatchMode::Repeat, first) => Trigger::Fire { first },
        }
    }

    /// Claim a watch's one firing without an intersection report, e.g. a counter
    /// nested inside a revealed element. Returns `true` only the first time.
    pub fn claim(&mut self, id: WatchId) -> bool {
        match self.watches.get_mut(&id) {
            Some(watch) if !watch.fired => {
                watch.fired = true;
                true
            }
            _ => false,
        }
    }

    pub fn has_fired(&self, id: WatchId) -> bool {
        self.watches.get(&id).is_some_and(|w| w.fired)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_a_single_time() {
        let mut reg = WatchRegistry::new();
        let id = reg.register(WatchMode::Once);
        assert_eq!(reg.on_intersection(id, false), Trigger::Ignore);
        assert_eq!(reg.on_intersection(id, true), Trigger::FireAndUnobserve);
        for _ in 0..5 {
            assert_eq!(reg.on_intersection(id, false), Trigger::Ignore);
            assert_eq!(reg.on_intersection(id, true), Trigger::Ignore);
        }
    }

    #[test]
    fn repeat_fires_every_time() {
        let mut reg = WatchRegistry::new();
        let id = reg.register(WatchMode::Repeat);
        assert_eq!(reg.on_intersection(id, true), Trigger::Fire { first: true });
        assert_eq!(reg.on_intersection(id, true), Trigger::Fire { first: false });
        assert!(reg.has_fired(id));
    }

    #[test]
    fn claim_is_at_most_once() {
        let mut reg = WatchRegistry::new();
        let id = reg.register(WatchMode::Once);
        assert!(reg.claim(id));
        assert!(!reg.claim(id));
        assert_eq!(reg.on_intersection(id, true), Trigger::Ignore);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut reg = WatchRegistry::new();
        assert_eq!(reg.on_intersection(WatchId(77), true), Trigger::Ignore);
        assert!(!reg.claim(WatchId(77)));
    }

    #[test]
    fn ids_are_distinct() {
        let mut reg = WatchRegistry::new();
        let a = reg.register(WatchMode::Once);
        let b = reg.register(WatchMode::Repeat);
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn root_margin_is_negative_bottom() {
        let opts = ViewportOptions::new(0.1).with_bottom_margin(100.0);
        assert_eq!(opts.root_margin(), "0px 0px -100px 0px");
        assert_eq!(ViewportOptions::new(0.5).root_margin(), "0px 0px 0px 0px");
    }
}
