//! Fixed-rate tick pacing
//!
//! One simulation tick per frame at [`FPS`]. When running in real time the
//! pacer sleeps off whatever is left of the frame budget; when it falls
//! behind it resynchronises instead of trying to catch up.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::FPS;

/// Duration of one tick at the contract rate
pub const TICK_DURATION: Duration = Duration::from_micros(1_000_000 / FPS as u64);

/// Behind schedule by more than this and the deadline is reset to now
const MAX_LAG: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct TickPacer {
    realtime: bool,
    next_deadline: Instant,
    ticks: u64,
}

impl TickPacer {
    pub fn new(realtime: bool) -> Self {
        Self {
            realtime,
            next_deadline: Instant::now() + TICK_DURATION,
            ticks: 0,
        }
    }

    /// Pacer that never sleeps (tests, headless fast-forward)
    pub fn unpaced() -> Self {
        Self::new(false)
    }

    /// Frames waited for so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Restart the schedule, e.g. after a blocking screen
    pub fn reset(&mut self) {
        self.next_deadline = Instant::now() + TICK_DURATION;
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        self.ticks += 1;
        if !self.realtime {
            return;
        }

        let now = Instant::now();
        if now < self.next_deadline {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += TICK_DURATION;
        } else if now - self.next_deadline > MAX_LAG {
            log::debug!("Tick pacer fell behind, resyncing");
            self.next_deadline = now + TICK_DURATION;
        } else {
            self.next_deadline += TICK_DURATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(TICK_DURATION, Duration::from_micros(16_666));
    }

    #[test]
    fn test_unpaced_does_not_sleep() {
        let mut pacer = TickPacer::unpaced();
        let start = Instant::now();
        for _ in 0..1000 {
            pacer.wait();
        }
        assert_eq!(pacer.ticks(), 1000);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_realtime_paces_ticks() {
        let mut pacer = TickPacer::new(true);
        let start = Instant::now();
        for _ in 0..3 {
            pacer.wait();
        }
        assert!(start.elapsed() >= TICK_DURATION * 2);
    }
}
