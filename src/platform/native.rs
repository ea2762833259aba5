//! Native host: headless frame budget and log-backed counter

use std::thread;
use std::time::{Duration, Instant};

use super::{CounterSink, FrameScheduler};

/// Display refresh interval used for real-time pacing (60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Grants a fixed number of frames, optionally paced to real time
#[derive(Debug)]
pub struct FrameBudget {
    remaining: u64,
    pace: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FrameBudget {
    /// Run `frames` frames back to back
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            pace: None,
            last_frame: None,
        }
    }

    /// Sleep so frames start at most once per `FRAME_INTERVAL`
    pub fn realtime(mut self) -> Self {
        self.pace = Some(FRAME_INTERVAL);
        self
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for FrameBudget {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;

        if let Some(pace) = self.pace {
            if let Some(last) = self.last_frame {
                let elapsed = last.elapsed();
                if elapsed < pace {
                    thread::sleep(pace - elapsed);
                }
            }
            self.last_frame = Some(Instant::now());
        }
        true
    }
}

/// Keeps the latest count and logs whenever it changes
#[derive(Debug, Default)]
pub struct LogCounter {
    latest: Option<u32>,
    publishes: u64,
}

impl LogCounter {
    pub fn latest(&self) -> Option<u32> {
        self.latest
    }

    /// How many times a value was published (one per frame)
    pub fn publishes(&self) -> u64 {
        self.publishes
    }
}

impl CounterSink for LogCounter {
    fn publish(&mut self, live_count: u32) {
        if self.latest != Some(live_count) {
            log::debug!("Ball count: {}", live_count);
        }
        self.latest = Some(live_count);
        self.publishes += 1;
    }
}
