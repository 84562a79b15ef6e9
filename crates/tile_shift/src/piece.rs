use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;
use thiserror::Error;

use crate::field::{Cell, Field, PieceKind};
use crate::motion::{Direction, GridMotion, MotionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("invalid kind of piece: {0}")]
    InvalidKind(u8),
    #[error("cell {0} is outside the field")]
    OutOfBounds(IVec2),
    #[error("cell {cell} is already occupied by a {occupant} piece")]
    Occupied { cell: IVec2, occupant: PieceKind },
}

/// Index of a piece on its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(usize);

impl PieceId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for PieceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid occupant that can only slide into ground cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    motion: GridMotion,
    selected: bool,
}

impl Piece {
    fn new(kind: PieceKind, cell: IVec2, config: MotionConfig) -> Self {
        Self {
            kind,
            motion: GridMotion::at(cell, config),
            selected: false,
        }
    }

    /// Slides one cell toward `direction` if the destination is free and the
    /// piece is at rest, moving its occupancy on `field` along with it.
    /// Returns false, changing nothing, otherwise.
    pub fn step(&mut self, direction: Direction, field: &mut Field) -> bool {
        let from = self.motion.cell();
        let to = from + direction.delta();
        if self.motion.is_moving() || field.is_blocked(to) {
            return false;
        }

        self.motion.step(direction);
        field.update_field(from, Cell::Ground);
        field.update_field(to, Cell::Occupied(self.kind));
        true
    }

    pub fn move_up(&mut self, field: &mut Field) -> bool {
        self.step(Direction::Up, field)
    }

    pub fn move_down(&mut self, field: &mut Field) -> bool {
        self.step(Direction::Down, field)
    }

    pub fn move_left(&mut self, field: &mut Field) -> bool {
        self.step(Direction::Left, field)
    }

    pub fn move_right(&mut self, field: &mut Field) -> bool {
        self.step(Direction::Right, field)
    }

    pub fn update(&mut self, dt: f32) -> bool {
        self.motion.update(dt)
    }

    pub const fn set_selection(&mut self, value: bool) {
        self.selected = value;
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn motion(&self) -> &GridMotion {
        &self.motion
    }

    pub const fn cell(&self) -> IVec2 {
        self.motion.cell()
    }

    pub const fn position(&self) -> Vec2 {
        self.motion.position()
    }

    pub const fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let position = self.position();
        write!(
            f,
            "<Piece kind='{}' col='{}' row='{}' x='{}' y='{}'>",
            self.kind,
            self.motion.col(),
            self.motion.row(),
            position.x,
            position.y
        )
    }
}

pub struct PieceFactory;

impl PieceFactory {
    /// Builds the piece named by a raw kind value. Does not touch the field.
    pub fn new_instance(kind: u8, cell: IVec2, config: MotionConfig) -> Result<Piece, PieceError> {
        let kind = PieceKind::from_repr(kind).ok_or(PieceError::InvalidKind(kind))?;
        Ok(Piece::new(kind, cell, config))
    }
}
