//! Numeric counters that count up from zero when first revealed.

use std::collections::BTreeMap;

use crate::api::config::CounterConfig;
use crate::api::types::{PageEvent, WatchId};
use crate::core::time::{Sequencer, Step};

/// One counter animation: adds `target / ticks` per tick, shows the floor of the
/// running total, and lands exactly on `target`.
#[derive(Debug, Clone)]
pub struct Counter {
    id: WatchId,
    target: i64,
    increment: f64,
    current: f64,
    tick_ms: f64,
    done: bool,
}

impl Counter {
    pub fn new(id: WatchId, target: i64, config: &CounterConfig) -> Self {
        Self {
            id,
            target,
            increment: target as f64 / config.ticks(),
            current: 0.0,
            tick_ms: config.tick_ms,
            done: false,
        }
    }

    /// Parse a `data-target` attribute. Anything that is not a plain integer is rejected.
    pub fn parse_target(raw: &str) -> Option<i64> {
        raw.trim().parse().ok()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Value currently displayed.
    pub fn display(&self) -> i64 {
        if self.done {
            self.target
        } else {
            self.current.floor() as i64
        }
    }
}

impl Step for Counter {
    type Output = PageEvent;

    fn step(&mut self, out: &mut Vec<PageEvent>) -> Option<f64> {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.done = true;
        }
        out.push(PageEvent::Counter {
            id: self.id,
            text: self.display().to_string(),
        });
        (!self.done).then_some(self.tick_ms)
    }
}

/// All running counters plus the set of elements that have already been counted.
#[derive(Debug, Default)]
pub struct CounterSet {
    running: BTreeMap<WatchId, (Sequencer, Counter)>,
    config: CounterConfig,
}

impl CounterSet {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            running: BTreeMap::new(),
            config,
        }
    }

    /// Start counting `id` up to the integer in `raw_target`.
    /// A malformed target is shown verbatim instead of animated; a missing one
    /// leaves the element as it is.
    pub fn start(&mut self, id: WatchId, raw_target: Option<&str>, out: &mut Vec<PageEvent>) {
        let Some(raw_target) = raw_target else {
            log::warn!("counter {:?}: no target", id);
            return;
        };
        match Counter::parse_target(raw_target) {
            Some(target) => {
                log::debug!("counter {:?} -> {target}", id);
                let counter = Counter::new(id, target, &self.config);
                self.running.insert(id, (Sequencer::new(self.config.tick_ms), counter));
            }
            None => {
                log::warn!("counter {:?}: non-numeric target {raw_target:?}", id);
                out.push(PageEvent::Counter {
                    id,
                    text: raw_target.to_string(),
                });
            }
        }
    }

    /// Stop a counter whose element went away. No further events are emitted for it.
    pub fn cancel(&mut self, id: WatchId) -> bool {
        self.running.remove(&id).is_some()
    }

    pub fn tick(&mut self, dt: f64, out: &mut Vec<PageEvent>) {
        for (seq, counter) in self.running.values_mut() {
            seq.advance(dt, counter, out);
        }
        self.running.retain(|_, (_, counter)| !counter.is_done());
    }

    pub fn is_running(&self, id: WatchId) -> bool {
        self.running.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_to_end(target: i64) -> Vec<i64> {
        let mut counter = Counter::new(WatchId(1), target, &CounterConfig::default());
        let mut out = Vec::new();
        let mut shown = Vec::new();
        for _ in 0..10_000 {
            let next = counter.step(&mut out);
            shown.push(counter.display());
            if next.is_none() {
                return shown;
            }
        }
        panic!("counter never finished");
    }

    #[test]
    fn lands_exactly_on_target() {
        let shown = run_to_end(1234);
        assert_eq!(*shown.last().unwrap(), 1234);
        assert!(shown.len() >= 125 && shown.len() <= 126, "took {} ticks", shown.len());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        assert_eq!(run_to_end(0), vec![0]);
    }

    #[test]
    fn small_target_never_overshoots() {
        let shown = run_to_end(7);
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));
        assert!(shown.iter().all(|&v| v <= 7));
        assert_eq!(*shown.last().unwrap(), 7);
    }

    #[test]
    fn parse_target_rejects_garbage() {
        assert_eq!(Counter::parse_target(" 42 "), Some(42));
        assert_eq!(Counter::parse_target("42%"), None);
        assert_eq!(Counter::parse_target(""), None);
    }

    #[test]
    fn set_runs_for_two_seconds() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        set.start(WatchId(9), Some("500"), &mut out);
        assert!(set.is_running(WatchId(9)));
        for _ in 0..130 {
            set.tick(16.0, &mut out);
        }
        assert!(set.is_empty());
        assert_eq!(
            out.last(),
            Some(&PageEvent::Counter { id: WatchId(9), text: "500".into() })
        );
    }

    #[test]
    fn malformed_target_shows_raw_text() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        set.start(WatchId(2), Some("n/a"), &mut out);
        assert!(set.is_empty());
        assert_eq!(out, vec![PageEvent::Counter { id: WatchId(2), text: "n/a".into() }]);
    }

    #[test]
    fn missing_target_leaves_element_alone() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        set.start(WatchId(1), None, &mut out);
        set.tick(100.0, &mut out);
        assert!(set.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn empty_target_is_shown_as_is() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        set.start(WatchId(1), Some(""), &mut out);
        assert_eq!(out, vec![PageEvent::Counter { id: WatchId(1), text: String::new() }]);
    }

    #[test]
    fn long_frame_is_capped_at_ten_ticks() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        // increment 10 per tick; a 250 ms frame is 15 ticks due, only 10 run
        set.start(WatchId(5), Some("1250"), &mut out);
        set.tick(250.0, &mut out);
        assert_eq!(out.len(), 10);
        assert_eq!(
            out.last(),
            Some(&PageEvent::Counter { id: WatchId(5), text: "100".into() })
        );
    }

    #[test]
    fn cancel_stops_events() {
        let mut set = CounterSet::new(CounterConfig::default());
        let mut out = Vec::new();
        set.start(WatchId(4), Some("100"), &mut out);
        set.tick(32.0, &mut out);
        assert!(set.cancel(WatchId(4)));
        let before = out.len();
        set.tick(1000.0, &mut out);
        assert_eq!(out.len(), before);
    }

    proptest! {
        #[test]
        fn display_strictly_increases_then_stops_at_target(target in 125i64..1_000_000) {
            let shown = run_to_end(target);
            prop_assert!(shown.windows(2).all(|w| w[0] < w[1]), "not strictly increasing");
            prop_assert!(shown.iter().all(|&v| v <= target));
            prop_assert_eq!(*shown.last().unwrap(), target);
        }
    }
}
