//! Trailing key buffer and the hue-rotation easter egg it unlocks.

use std::collections::VecDeque;

use crate::api::config::EasterEggConfig;
use crate::api::types::PageEvent;
use crate::core::time::{Sequencer, Step};

/// Matches the last `target.len()` key names against a fixed sequence.
#[derive(Debug, Clone)]
pub struct KeySequence {
    target: Vec<String>,
    recent: VecDeque<String>,
}

impl KeySequence {
    pub fn new(target: Vec<String>) -> Self {
        let recent = VecDeque::with_capacity(target.len());
        Self { target, recent }
    }

    /// Record a key press. Returns `true` when the trailing keys equal the target.
    pub fn push(&mut self, key: &str) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.recent.len() == self.target.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key.to_string());
        self.recent.iter().eq(self.target.iter())
    }
}

/// Switches the effect off once its time is up.
#[derive(Debug, Clone, Copy, Default)]
struct EffectOff;

impl Step for EffectOff {
    type Output = PageEvent;

    fn step(&mut self, out: &mut Vec<PageEvent>) -> Option<f64> {
        out.push(PageEvent::EasterEgg { active: false });
        None
    }
}

/// Konami-style easter egg: the sequence turns the effect on for a fixed time.
#[derive(Debug, Clone)]
pub struct EasterEgg {
    keys: KeySequence,
    timer: Sequencer,
    duration_ms: f64,
}

impl EasterEgg {
    pub fn new(config: &EasterEggConfig) -> Self {
        Self {
            keys: KeySequence::new(config.sequence.clone()),
            timer: Sequencer::idle(),
            duration_ms: config.duration_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_armed()
    }

    /// Feed a key press. Completing the sequence (re)starts the effect window.
    pub fn on_key(&mut self, key: &str, out: &mut Vec<PageEvent>) {
        if self.keys.push(key) {
            log::info!("easter egg unlocked");
            if !self.is_active() {
                out.push(PageEvent::EasterEgg { active: true });
            }
            self.timer.arm(self.duration_ms);
        }
    }

    pub fn tick(&mut self, dt: f64, out: &mut Vec<PageEvent>) {
        self.timer.advance(dt, &mut EffectOff, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(egg: &mut EasterEgg, out: &mut Vec<PageEvent>) {
        for key in EasterEggConfig::default().sequence {
            egg.on_key(&key, out);
        }
    }

    #[test]
    fn matches_only_exact_trailing_sequence() {
        let target: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut seq = KeySequence::new(target);
        assert!(!seq.push("a"));
        assert!(!seq.push("b"));
        assert!(!seq.push("x"));
        assert!(!seq.push("a"));
        assert!(!seq.push("b"));
        assert!(seq.push("c"));
        assert!(!seq.push("c"));
    }

    #[test]
    fn element_wise_not_concatenated() {
        let target: Vec<String> = ["ab", "c"].iter().map(|s| s.to_string()).collect();
        let mut seq = KeySequence::new(target);
        seq.push("a");
        assert!(!seq.push("bc"));
    }

    #[test]
    fn empty_sequence_never_matches() {
        let mut seq = KeySequence::new(Vec::new());
        assert!(!seq.push("a"));
    }

    #[test]
    fn effect_runs_for_five_seconds() {
        let mut egg = EasterEgg::new(&EasterEggConfig::default());
        let mut out = Vec::new();
        press_all(&mut egg, &mut out);
        assert_eq!(out, vec![PageEvent::EasterEgg { active: true }]);
        assert!(egg.is_active());

        for _ in 0..49 {
            egg.tick(100.0, &mut out);
        }
        assert!(egg.is_active());
        egg.tick(100.0, &mut out);
        assert!(!egg.is_active());
        assert_eq!(out.last(), Some(&PageEvent::EasterEgg { active: false }));
    }

    #[test]
    fn retrigger_extends_window_without_duplicate_start() {
        let mut egg = EasterEgg::new(&EasterEggConfig::default());
        let mut out = Vec::new();
        press_all(&mut egg, &mut out);
        for _ in 0..30 {
            egg.tick(100.0, &mut out);
        }
        press_all(&mut egg, &mut out);
        for _ in 0..30 {
            egg.tick(100.0, &mut out);
        }
        assert!(egg.is_active(), "window restarted at 3 s");
        assert_eq!(out, vec![PageEvent::EasterEgg { active: true }]);
    }
}
