//! Moving entities: bouncing balls and the evil circle that hunts them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::color::Rgb;
use super::rng::{random_color, random_int};
use crate::renderer::Surface;
use crate::settings::Settings;

/// Canvas extents; the playfield spans `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn of(surface: &impl Surface) -> Self {
        Self::new(surface.width(), surface.height())
    }
}

/// Shared capabilities of everything that moves on the canvas
pub trait Entity {
    fn pos(&self) -> Vec2;
    fn vel(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Paint this entity onto the surface
    fn draw(&self, surface: &mut impl Surface);

    /// Strict overlap: touching circles do not collide
    fn overlaps(&self, other: &impl Entity) -> bool {
        circles_overlap(self.pos(), self.radius(), other.pos(), other.radius())
    }
}

/// A bouncing ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub radius: f32,
    /// Cleared when the hunter eats the ball; the ball stays in the collection
    pub alive: bool,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgb, radius: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            radius,
            alive: true,
        }
    }

    /// Random ball whose whole disc lies inside the bounds
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds, settings: &Settings) -> Self {
        let radius = random_int(rng, settings.ball_radius_min, settings.ball_radius_max);
        let x = random_int(rng, radius, bounds.width as i32 - radius);
        let y = random_int(rng, radius, bounds.height as i32 - radius);
        let speed = settings.ball_speed_max;
        let vel_x = random_int(rng, -speed, speed);
        let vel_y = random_int(rng, -speed, speed);
        let color = random_color(rng);

        Self::new(
            Vec2::new(x as f32, y as f32),
            Vec2::new(vel_x as f32, vel_y as f32),
            color,
            radius as f32,
        )
    }

    /// Reflect off the canvas edges, then move by one velocity step
    ///
    /// The edge checks run before the move, so a ball can end a frame slightly past
    /// an edge; it comes back on the following frame.
    pub fn update(&mut self, bounds: Bounds) {
        if self.pos.x + self.radius >= bounds.width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.x - self.radius <= 0.0 {
            self.vel.x = -self.vel.x;
        }

        if self.pos.y + self.radius >= bounds.height {
            self.vel.y = -self.vel.y;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.vel.y = -self.vel.y;
        }

        self.pos += self.vel;
    }
}

impl Entity for Ball {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn draw(&self, surface: &mut impl Surface) {
        surface.fill_disc(self.pos, self.radius, self.color);
    }
}

/// Discrete movement command for the hunter, one per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunterCommand {
    West,
    East,
    North,
    South,
}

impl HunterCommand {
    /// Map a `KeyboardEvent.key` value (WASD) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" => Some(HunterCommand::West),
            "d" => Some(HunterCommand::East),
            "w" => Some(HunterCommand::North),
            "s" => Some(HunterCommand::South),
            _ => None,
        }
    }
}

/// The player's evil circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunter {
    pub pos: Vec2,
    /// Distance moved per command on each axis
    pub step: Vec2,
    pub color: Rgb,
    pub radius: f32,
    pub line_width: f32,
}

impl Hunter {
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        Self {
            pos,
            step: Vec2::splat(settings.hunter_step),
            color: Rgb::WHITE,
            radius: settings.hunter_radius,
            line_width: settings.hunter_line_width,
        }
    }

    /// Hunter at a random point of the canvas (edges included)
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds, settings: &Settings) -> Self {
        let x = random_int(rng, 0, bounds.width as i32);
        let y = random_int(rng, 0, bounds.height as i32);
        Self::new(Vec2::new(x as f32, y as f32), settings)
    }

    /// Move one step along a single axis
    pub fn apply(&mut self, command: HunterCommand) {
        match command {
            HunterCommand::West => self.pos.x -= self.step.x,
            HunterCommand::East => self.pos.x += self.step.x,
            HunterCommand::North => self.pos.y -= self.step.y,
            HunterCommand::South => self.pos.y += self.step.y,
        }
    }

    /// Snap back by one radius on every axis touching an edge
    pub fn check_bounds(&mut self, bounds: Bounds) {
        if self.pos.x + self.radius >= bounds.width {
            self.pos.x -= self.radius;
        }
        if self.pos.x - self.radius <= 0.0 {
            self.pos.x += self.radius;
        }

        if self.pos.y + self.radius >= bounds.height {
            self.pos.y -= self.radius;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.pos.y += self.radius;
        }
    }
}

impl Entity for Hunter {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    /// The hunter only moves on command; its step doubles as its velocity
    fn vel(&self) -> Vec2 {
        self.step
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn draw(&self, surface: &mut impl Surface) {
        surface.stroke_ring(self.pos, self.radius, self.color, self.line_width);
    }
}
