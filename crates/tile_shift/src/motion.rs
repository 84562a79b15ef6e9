//! Grid-to-pixel movement shared by pieces and the free cursor.
//!
//! A [`GridMotion`] commits to its destination cell the moment a step is
//! requested, then slides its pixel position toward that cell over the
//! following frames and snaps onto it on arrival.

use bevy::prelude::*;
use strum::EnumIter;

use crate::config::{CELL_SIZE, FIELD_OFFSET, MOVEMENT_SPEED};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell offset in grid space, where rows grow downward.
    pub const fn delta(self) -> IVec2 {
        match self {
            Self::Up => IVec2::NEG_Y,
            Self::Down => IVec2::Y,
            Self::Left => IVec2::NEG_X,
            Self::Right => IVec2::X,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionConfig {
    /// Side of one cell in pixels.
    pub cell_size: f32,
    /// Pixel position of cell `(0, 0)`.
    pub offset: Vec2,
    /// Pixels per second.
    pub speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            offset: FIELD_OFFSET,
            speed: MOVEMENT_SPEED,
        }
    }
}

impl MotionConfig {
    pub fn rest_position(&self, cell: IVec2) -> Vec2 {
        self.offset + cell.as_vec2() * self.cell_size
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridMotion {
    cell: IVec2,
    position: Vec2,
    velocity: Vec2,
    is_moving: bool,
    config: MotionConfig,
}

impl GridMotion {
    pub fn at(cell: IVec2, config: MotionConfig) -> Self {
        Self {
            cell,
            position: config.rest_position(cell),
            velocity: Vec2::ZERO,
            is_moving: false,
            config,
        }
    }

    /// Commits to the neighbouring cell and starts sliding toward it.
    ///
    /// The velocity is replaced as a whole, so only the axis of `direction`
    /// is ever in motion. Callers decide whether a step is allowed while
    /// already moving.
    pub fn step(&mut self, direction: Direction) {
        let delta = direction.delta();
        self.cell += delta;
        self.velocity = delta.as_vec2() * self.config.speed;
        self.is_moving = true;
    }

    /// True once `coord` has moved past `target` in the direction of `delta`.
    pub fn is_next_tile(delta: f32, coord: f32, target: f32) -> bool {
        (delta > 0. && coord > target) || (delta < 0. && coord < target)
    }

    /// Advances the slide by `dt` seconds. Returns true if the motion
    /// arrived on its cell during this call.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_moving {
            return false;
        }

        self.position += self.velocity * dt;

        let target = self.rest_position();
        if Self::is_next_tile(self.velocity.x, self.position.x, target.x) {
            self.position.x = target.x;
            self.velocity.x = 0.;
            self.is_moving = false;
        } else if Self::is_next_tile(self.velocity.y, self.position.y, target.y) {
            self.position.y = target.y;
            self.velocity.y = 0.;
            self.is_moving = false;
        }

        !self.is_moving
    }

    pub const fn cell(&self) -> IVec2 {
        self.cell
    }

    pub const fn col(&self) -> i32 {
        self.cell.x
    }

    pub const fn row(&self) -> i32 {
        self.cell.y
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub const fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub const fn config(&self) -> MotionConfig {
        self.config
    }

    pub fn rest_position(&self) -> Vec2 {
        self.config.rest_position(self.cell)
    }
}
