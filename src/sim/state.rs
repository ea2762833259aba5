//! Simulation state and core bookkeeping types
//!
//! `SimState` exclusively owns every entity, the live-ball count and the RNG.

use std::fmt;

use rand_pcg::Pcg32;
use serde::Serialize;

use super::entity::{Ball, Bounds, Hunter};
use super::rng;
use crate::settings::{Settings, SettingsError};

/// Lifecycle phase of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimPhase {
    /// Spawning entities
    Initializing,
    /// Steady per-frame cycle; there is no terminal phase
    Running,
}

/// Number of balls still alive
///
/// Starts at the spawned population and only ever goes down, once per kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveCount(u32);

impl LiveCount {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Record one alive -> dead transition
    pub fn record_destroyed(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }
}

/// A broken state invariant, found by [`SimState::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Live count disagrees with the alive flags
    LiveCountMismatch { counted: u32, alive: u32 },
    /// Balls were added to or removed from the collection
    BallCountChanged { spawned: u32, present: u32 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiveCountMismatch { counted, alive } => write!(
                f,
                "live count is {counted} but {alive} ball(s) are alive"
            ),
            Self::BallCountChanged { spawned, present } => write!(
                f,
                "{spawned} ball(s) spawned but {present} in the collection"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub settings: Settings,
    pub bounds: Bounds,
    pub phase: SimPhase,
    /// Frames completed
    pub frame: u64,
    /// Every ball ever spawned; dead ones stay in place
    pub balls: Vec<Ball>,
    pub hunter: Hunter,
    pub live_count: LiveCount,
}

impl SimState {
    /// Spawn the hunter and the ball population, then enter `Running`
    pub fn new(seed: u64, bounds: Bounds, settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate(bounds)?;

        let mut rng = rng::seeded(seed);
        let hunter = Hunter::spawn(&mut rng, bounds, settings);
        let mut state = Self {
            seed,
            rng,
            settings: settings.clone(),
            bounds,
            phase: SimPhase::Initializing,
            frame: 0,
            balls: Vec::with_capacity(settings.ball_count as usize),
            hunter,
            live_count: LiveCount::new(0),
        };

        state.populate();
        state.phase = SimPhase::Running;

        log::info!(
            "Simulation initialized: seed {}, {}x{} canvas, {} balls",
            seed,
            bounds.width,
            bounds.height,
            state.balls.len()
        );

        Ok(state)
    }

    fn populate(&mut self) {
        while (self.balls.len() as u32) < self.settings.ball_count {
            let ball = Ball::spawn(&mut self.rng, self.bounds, &self.settings);
            self.balls.push(ball);
        }
        self.live_count = LiveCount::new(self.balls.len() as u32);
    }

    /// Count balls with the alive flag set
    pub fn alive_balls(&self) -> u32 {
        self.balls.iter().filter(|b| b.alive).count() as u32
    }

    /// Check the live-count and tombstone invariants
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let present = self.balls.len() as u32;
        if present != self.settings.ball_count {
            return Err(InvariantViolation::BallCountChanged {
                spawned: self.settings.ball_count,
                present,
            });
        }

        let alive = self.alive_balls();
        if self.live_count.get() != alive {
            return Err(InvariantViolation::LiveCountMismatch {
                counted: self.live_count.get(),
                alive,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canvas() -> Bounds {
        Bounds::new(800, 600)
    }

    #[test]
    fn test_new_spawns_full_population() {
        let state = SimState::new(12345, canvas(), &Settings::default()).unwrap();
        assert_eq!(state.phase, SimPhase::Running);
        assert_eq!(state.balls.len(), 26);
        assert_eq!(state.live_count.get(), 26);
        assert!(state.balls.iter().all(|b| b.alive));
        assert_eq!(state.frame, 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_hunter_uses_settings() {
        let state = SimState::new(1, canvas(), &Settings::default()).unwrap();
        let h = &state.hunter;
        assert_eq!(h.radius, 30.0);
        assert_eq!(h.step, glam::Vec2::splat(20.0));
        assert!(h.pos.x >= 0.0 && h.pos.x <= 800.0);
        assert!(h.pos.y >= 0.0 && h.pos.y <= 600.0);
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = SimState::new(99, canvas(), &Settings::default()).unwrap();
        let b = SimState::new(99, canvas(), &Settings::default()).unwrap();
        for (x, y) in a.balls.iter().zip(&b.balls) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.color, y.color);
        }
        assert_eq!(a.hunter.pos, b.hunter.pos);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            ball_radius_max: 400,
            ..Default::default()
        };
        assert!(matches!(
            SimState::new(1, canvas(), &settings),
            Err(SettingsError::BallTooLarge { .. })
        ));
    }

    #[test]
    fn test_huge_ball_count_rejected_before_allocating() {
        let settings = Settings {
            ball_count: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            SimState::new(1, canvas(), &settings),
            Err(SettingsError::TooManyBalls { .. })
        ));
    }

    #[test]
    fn test_validate_detects_mismatch() {
        let mut state = SimState::new(3, canvas(), &Settings::default()).unwrap();
        state.balls[4].alive = false;
        assert_eq!(
            state.validate(),
            Err(InvariantViolation::LiveCountMismatch {
                counted: 26,
                alive: 25
            })
        );

        state.live_count.record_destroyed();
        assert!(state.validate().is_ok());

        state.balls.pop();
        assert!(matches!(
            state.validate(),
            Err(InvariantViolation::BallCountChanged { .. })
        ));
    }

    #[test]
    fn test_live_count_never_underflows() {
        let mut live = LiveCount::new(1);
        live.record_destroyed();
        live.record_destroyed();
        assert_eq!(live.get(), 0);
    }

    proptest! {
        #[test]
        fn initial_balls_inside_canvas(seed in any::<u64>(), w in 100u32..1920, h in 100u32..1080) {
            let b = Bounds::new(w, h);
            let state = SimState::new(seed, b, &Settings::default()).unwrap();
            for ball in &state.balls {
                prop_assert!(ball.pos.x >= ball.radius && ball.pos.x <= b.width - ball.radius);
                prop_assert!(ball.pos.y >= ball.radius && ball.pos.y <= b.height - ball.radius);
                prop_assert!((-7.0..=7.0).contains(&ball.vel.x));
                prop_assert!((-7.0..=7.0).contains(&ball.vel.y));
            }
        }
    }
}
