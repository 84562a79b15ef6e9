use bevy::prelude::*;

use crate::motion::MotionConfig;

pub const CELL_SIZE: f32 = 64.0;
pub const MOVEMENT_SPEED: f32 = 320.0; // pixels per second, five cells a second

pub const FIELD_COLS: usize = 5;
pub const FIELD_ROWS: usize = 7;

// Top-left pixel of cell (0, 0), centering the field in the portrait window
pub const FIELD_OFFSET: Vec2 = Vec2::new(20.0, 96.0);

/// Raw kind and cell of every piece on the starting field.
const STARTING_LAYOUT: [(u8, IVec2); 9] = [
    (1, IVec2::new(0, 0)),
    (2, IVec2::new(2, 0)),
    (3, IVec2::new(4, 0)),
    (1, IVec2::new(1, 2)),
    (2, IVec2::new(3, 2)),
    (3, IVec2::new(2, 4)),
    (1, IVec2::new(4, 5)),
    (2, IVec2::new(0, 6)),
    (3, IVec2::new(2, 6)),
];

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub field_size: UVec2, // (columns, rows)
    pub motion: MotionConfig,
    pub cursor_start: IVec2,
    pub layout: Vec<(u8, IVec2)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: UVec2::new(FIELD_COLS as u32, FIELD_ROWS as u32),
            motion: MotionConfig::default(),
            cursor_start: IVec2::new(2, 3),
            layout: STARTING_LAYOUT.to_vec(),
        }
    }
}
