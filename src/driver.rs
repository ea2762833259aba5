//! Simulation driver
//!
//! Owns the simulation state and the queue of pending hunter commands. Key presses are
//! queued as they arrive and drained at the start of the next frame, so every press is
//! exactly one hunter step. After each frame the live count goes to the counter sink.

use std::collections::VecDeque;

use crate::platform::{CounterSink, FrameScheduler};
use crate::renderer::Surface;
use crate::settings::{Settings, SettingsError};
use crate::sim::{Bounds, FrameReport, HunterCommand, SimState, TickInput, tick};

/// Result of asking the driver for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Frame ran; schedule another
    Continue(FrameReport),
    /// [`Simulation::stop`] was called; no frame ran
    Stopped,
}

/// A running simulation plus its pending input
#[derive(Debug)]
pub struct Simulation {
    state: SimState,
    commands: VecDeque<HunterCommand>,
    idle_mode: bool,
    stopped: bool,
}

impl Simulation {
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            commands: VecDeque::new(),
            idle_mode: false,
            stopped: false,
        }
    }

    /// Build the initial world for a canvas of the given size
    pub fn start(settings: &Settings, bounds: Bounds, seed: u64) -> Result<Self, SettingsError> {
        SimState::new(seed, bounds, settings).map(Self::new)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Queue one hunter step for the next frame
    pub fn queue_command(&mut self, command: HunterCommand) {
        self.commands.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Handle a key press; returns `true` if the key means something here
    pub fn handle_key(&mut self, key: &str) -> bool {
        if let Some(command) = HunterCommand::from_key(key) {
            self.queue_command(command);
            return true;
        }
        match key {
            "i" | "I" => {
                self.set_idle_mode(!self.idle_mode);
                true
            }
            _ => false,
        }
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn set_idle_mode(&mut self, enabled: bool) {
        if self.idle_mode != enabled {
            log::info!("Idle mode: {}", enabled);
        }
        self.idle_mode = enabled;
    }

    /// Stop the loop; later frames return [`FrameStatus::Stopped`]
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("Simulation stopped after {} frames", self.state.frame);
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run one frame cycle and publish the live count
    pub fn frame(&mut self, surface: &mut impl Surface, sink: &mut impl CounterSink) -> FrameStatus {
        if self.stopped {
            return FrameStatus::Stopped;
        }

        let input = TickInput {
            commands: self.commands.drain(..).collect(),
            idle_mode: self.idle_mode,
        };
        let report = tick(&mut self.state, &input, surface);
        sink.publish(report.live_count);

        FrameStatus::Continue(report)
    }
}

/// Drive frames until the scheduler or the simulation stops
///
/// `after_frame` runs after every completed frame; it may stop the simulation or
/// reset the surface. Returns the number of frames run.
pub fn run<S, C, F>(
    sim: &mut Simulation,
    surface: &mut S,
    sink: &mut C,
    scheduler: &mut impl FrameScheduler,
    mut after_frame: F,
) -> u64
where
    S: Surface,
    C: CounterSink,
    F: FnMut(&mut Simulation, &mut S, &FrameReport),
{
    let mut frames = 0;
    while !sim.is_stopped() && scheduler.next_frame() {
        let FrameStatus::Continue(report) = sim.frame(surface, sink) else {
            break;
        };
        frames += 1;
        after_frame(sim, surface, &report);
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;
    use glam::Vec2;

    struct Frames(u32);

    impl FrameScheduler for Frames {
        fn next_frame(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    fn sim() -> Simulation {
        Simulation::start(&Settings::default(), Bounds::new(800, 600), 4242).unwrap()
    }

    #[test]
    fn test_count_published_every_frame() {
        let mut sim = sim();
        let mut surface = RecordingSurface::new(800, 600);
        let mut published: Vec<u32> = Vec::new();

        let frames = run(&mut sim, &mut surface, &mut published, &mut Frames(10), |_, s, _| {
            s.clear()
        });

        assert_eq!(frames, 10);
        assert_eq!(published.len(), 10);
        assert_eq!(published.last().copied(), Some(sim.state().live_count.get()));
        assert!(published.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_key_presses_drain_once() {
        let mut sim = sim();
        assert!(sim.handle_key("d"));
        assert!(sim.handle_key("d"));
        assert!(!sim.handle_key("q"));
        assert_eq!(sim.pending_commands(), 2);

        sim.state.hunter.pos = Vec2::new(400.0, 300.0);
        let mut surface = RecordingSurface::new(800, 600);
        let mut published: Vec<u32> = Vec::new();
        sim.frame(&mut surface, &mut published);

        assert_eq!(sim.pending_commands(), 0);
        assert_eq!(sim.state().hunter.pos, Vec2::new(440.0, 300.0));

        sim.frame(&mut surface, &mut published);
        assert_eq!(sim.state().hunter.pos, Vec2::new(440.0, 300.0));
    }

    #[test]
    fn test_idle_toggle() {
        let mut sim = sim();
        assert!(!sim.idle_mode());
        assert!(sim.handle_key("i"));
        assert!(sim.idle_mode());
        assert!(sim.handle_key("I"));
        assert!(!sim.idle_mode());
    }

    #[test]
    fn test_stop_ends_run() {
        let mut sim = sim();
        let mut surface = RecordingSurface::new(800, 600);
        let mut published: Vec<u32> = Vec::new();

        let frames = run(&mut sim, &mut surface, &mut published, &mut Frames(100), |sim, _, r| {
            if r.frame == 5 {
                sim.stop();
            }
        });

        assert_eq!(frames, 5);
        assert!(sim.is_stopped());
        assert_eq!(sim.frame(&mut surface, &mut published), FrameStatus::Stopped);
        assert_eq!(published.len(), 5);
    }

    #[test]
    fn test_invalid_canvas_rejected() {
        assert!(Simulation::start(&Settings::default(), Bounds::new(50, 50), 1).is_err());
    }
}
