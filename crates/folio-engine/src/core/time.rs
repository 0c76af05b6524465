/// Upper bound on a single frame delta in milliseconds.
/// A backgrounded tab can hand us multi-second deltas; those are clamped so
/// every player resumes where it paused instead of fast-forwarding.
pub const MAX_FRAME_MS: f64 = 250.0;

/// Cap on steps executed by one `Sequencer::advance` call.
/// A counter stepping every 16 ms loses ticks when a frame takes longer than 160 ms.
pub const MAX_STEPS_PER_ADVANCE: u32 = 10;

/// A timed state machine.
///
/// Each call performs exactly one transition, pushes whatever it produced
/// into `out`, and returns the delay in milliseconds until the next call.
/// `None` means the machine is finished and should not be stepped again.
pub trait Step {
    type Output;

    fn step(&mut self, out: &mut Vec<Self::Output>) -> Option<f64>;
}

/// Variable-step accumulator that drives a [`Step`] machine from frame deltas.
///
/// The host feeds elapsed milliseconds; whenever the pending delay runs out the
/// machine is stepped and the delay it returns is added back. Steps are strictly
/// sequential: a step never runs before the previous one returned.
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// Milliseconds left before the next step. Meaningless while idle.
    wait: f64,
    armed: bool,
}

impl Sequencer {
    /// A sequencer that fires its first step after `delay` milliseconds.
    pub fn new(delay: f64) -> Self {
        Self {
            wait: delay.max(0.0),
            armed: true,
        }
    }

    /// A sequencer that does nothing until [`arm`](Self::arm) is called.
    pub fn idle() -> Self {
        Self {
            wait: 0.0,
            armed: false,
        }
    }

    /// (Re)schedule the next step `delay` milliseconds from now.
    pub fn arm(&mut self, delay: f64) {
        self.wait = delay.max(0.0);
        self.armed = true;
    }

    /// Stop stepping. Pending delay is discarded.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.wait = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds until the next step, if armed.
    pub fn remaining(&self) -> Option<f64> {
        self.armed.then_some(self.wait)
    }

    /// Advance by `dt` milliseconds and step `machine` as many times as are due.
    /// Returns the number of steps executed.
    pub fn advance<S: Step>(&mut self, dt: f64, machine: &mut S, out: &mut Vec<S::Output>) -> u32 {
        if !self.armed {
            return 0;
        }

        self.wait -= dt.clamp(0.0, MAX_FRAME_MS);
        let mut steps = 0;
        while self.wait <= 0.0 {
            if steps == MAX_STEPS_PER_ADVANCE {
                // Drop the backlog rather than spiral.
                self.wait = 0.0;
                break;
            }
            steps += 1;
            match machine.step(out) {
                Some(next) => self.wait += next.max(0.0),
                None => {
                    self.disarm();
                    break;
                }
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits its step number, waits `delay` between steps, stops after `limit`.
    struct Ticker {
        n: u32,
        limit: u32,
        delay: f64,
    }

    impl Step for Ticker {
        type Output = u32;

        fn step(&mut self, out: &mut Vec<u32>) -> Option<f64> {
            self.n += 1;
            out.push(self.n);
            (self.n < self.limit).then_some(self.delay)
        }
    }

    fn ticker(limit: u32, delay: f64) -> Ticker {
        Ticker { n: 0, limit, delay }
    }

    #[test]
    fn waits_for_initial_delay() {
        let mut seq = Sequencer::new(100.0);
        let mut t = ticker(5, 10.0);
        let mut out = Vec::new();
        assert_eq!(seq.advance(99.0, &mut t, &mut out), 0);
        assert_eq!(seq.advance(1.0, &mut t, &mut out), 1);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn runs_multiple_due_steps_in_one_advance() {
        let mut seq = Sequencer::new(0.0);
        let mut t = ticker(100, 16.0);
        let mut out = Vec::new();
        // 0 ms, 16 ms, 32 ms are all due at t = 40.
        assert_eq!(seq.advance(40.0, &mut t, &mut out), 3);
        assert_eq!(seq.remaining(), Some(8.0));
    }

    #[test]
    fn finishing_disarms() {
        let mut seq = Sequencer::new(0.0);
        let mut t = ticker(2, 5.0);
        let mut out = Vec::new();
        seq.advance(100.0, &mut t, &mut out);
        assert_eq!(out, vec![1, 2]);
        assert!(!seq.is_armed());
        assert_eq!(seq.advance(100.0, &mut t, &mut out), 0);
    }

    #[test]
    fn caps_steps_per_advance() {
        let mut seq = Sequencer::new(0.0);
        let mut t = ticker(1000, 1.0);
        let mut out = Vec::new();
        assert_eq!(seq.advance(200.0, &mut t, &mut out), MAX_STEPS_PER_ADVANCE);
        assert_eq!(seq.remaining(), Some(0.0));
    }

    #[test]
    fn clamps_huge_frame_delta() {
        let mut seq = Sequencer::new(1000.0);
        let mut t = ticker(10, 10.0);
        let mut out = Vec::new();
        seq.advance(60_000.0, &mut t, &mut out);
        assert!(out.is_empty(), "a stalled frame must not skip the delay");
        assert_eq!(seq.remaining(), Some(1000.0 - MAX_FRAME_MS));
    }

    #[test]
    fn idle_until_armed() {
        let mut seq = Sequencer::idle();
        let mut t = ticker(3, 1.0);
        let mut out = Vec::new();
        assert_eq!(seq.advance(50.0, &mut t, &mut out), 0);
        seq.arm(10.0);
        assert_eq!(seq.advance(10.0, &mut t, &mut out), 1);
    }
}
