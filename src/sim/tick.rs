//! Per-frame simulation tick
//!
//! One call runs a full frame cycle: apply hunter commands, fade, move and collide the
//! balls, then clamp the hunter and let it eat.

use super::collision::{detect_ball_collisions, detect_hunter_collisions};
use super::entity::{Entity, HunterCommand};
use super::state::SimState;
use crate::renderer::{self, Surface};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses received since the previous frame, oldest first
    pub commands: Vec<HunterCommand>,
    /// Idle/demo mode - the hunter chases balls on its own
    pub idle_mode: bool,
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames completed, including this one
    pub frame: u64,
    /// Balls the hunter destroyed this frame
    pub destroyed: u32,
    pub live_count: u32,
}

/// Advance the simulation by one frame, drawing onto `surface`
///
/// Entities are drawn at their position before they move, in collection order.
pub fn tick(state: &mut SimState, input: &TickInput, surface: &mut impl Surface) -> FrameReport {
    let autopilot = if input.idle_mode && input.commands.is_empty() {
        autopilot_command(state)
    } else {
        None
    };
    for command in input.commands.iter().copied().chain(autopilot) {
        state.hunter.apply(command);
    }

    renderer::fade(surface, state.settings.fade_alpha);

    let bounds = state.bounds;
    for i in 0..state.balls.len() {
        if !state.balls[i].alive {
            continue;
        }
        state.balls[i].draw(surface);
        state.balls[i].update(bounds);
        detect_ball_collisions(&mut state.balls, i, &mut state.rng);
    }

    state.hunter.draw(surface);
    state.hunter.check_bounds(bounds);
    let destroyed =
        detect_hunter_collisions(&state.hunter, &mut state.balls, &mut state.live_count);

    state.frame += 1;
    let live_count = state.live_count.get();

    if destroyed > 0 {
        log::info!(
            "Frame {}: hunter destroyed {} ball(s), {} remaining",
            state.frame,
            destroyed,
            live_count
        );
        if live_count == 0 {
            log::info!("All balls destroyed after {} frames", state.frame);
        }
    }
    log::trace!(
        "Frame {}: hunter at ({:.1}, {:.1}), {} alive",
        state.frame,
        state.hunter.pos.x,
        state.hunter.pos.y,
        live_count
    );

    FrameReport {
        frame: state.frame,
        destroyed,
        live_count,
    }
}

/// Pick one step toward the nearest living ball, along the axis with the larger gap
///
/// Returns `None` when no ball is alive or the hunter is already within half a step.
pub fn autopilot_command(state: &SimState) -> Option<HunterCommand> {
    let hunter = &state.hunter;
    let target = state
        .balls
        .iter()
        .filter(|b| b.alive)
        .min_by(|a, b| {
            let da = a.pos.distance_squared(hunter.pos);
            let db = b.pos.distance_squared(hunter.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let delta = target.pos - hunter.pos;
    let half_step = hunter.step * 0.5;
    if delta.x.abs() < half_step.x && delta.y.abs() < half_step.y {
        return None;
    }

    let command = if delta.x.abs() >= delta.y.abs() {
        if delta.x > 0.0 {
            HunterCommand::East
        } else {
            HunterCommand::West
        }
    } else if delta.y > 0.0 {
        HunterCommand::South
    } else {
        HunterCommand::North
    };
    Some(command)
}
