use bevy::prelude::*;

use crate::config::GameConfig;
use crate::field::{Cell, Field};
use crate::motion::{Direction, MotionConfig};
use crate::piece::{Piece, PieceError, PieceFactory, PieceId};
use crate::selection::{Selection, SelectionError};

/// What a grab toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Selected(PieceId),
    Dropped(PieceId),
    Nothing,
}

/// Everything on the play area: the occupancy field, the pieces and the
/// cursor. Pieces are never removed, so a [`PieceId`] stays valid for the
/// life of the board.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    field: Field,
    pieces: Vec<Piece>,
    selection: Selection,
    config: MotionConfig,
}

impl Board {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            field: Field::new(
                config.field_size.x as usize,
                config.field_size.y as usize,
            ),
            pieces: Vec::new(),
            selection: Selection::new(config.cursor_start, config.motion),
            config: config.motion,
        }
    }

    /// A board with every piece of the configured layout placed.
    pub fn from_config(config: &GameConfig) -> Result<Self, PieceError> {
        let mut board = Self::new(config);
        for &(kind, cell) in &config.layout {
            board.spawn_piece(kind, cell)?;
        }
        info!(
            "Board ready with {} pieces\n{}",
            board.pieces.len(),
            board.field
        );
        Ok(board)
    }

    pub fn spawn_piece(&mut self, kind: u8, cell: IVec2) -> Result<PieceId, PieceError> {
        match self.field.get(cell) {
            None => return Err(PieceError::OutOfBounds(cell)),
            Some(Cell::Occupied(occupant)) => return Err(PieceError::Occupied { cell, occupant }),
            Some(Cell::Ground) => {}
        }

        let piece = PieceFactory::new_instance(kind, cell, self.config)?;
        self.field.update_field(cell, Cell::Occupied(piece.kind()));
        let id = PieceId::new(self.pieces.len());
        debug!("Spawned {piece} as {id}");
        self.pieces.push(piece);
        Ok(id)
    }

    pub const fn field(&self) -> &Field {
        &self.field
    }

    pub const fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| (PieceId::new(index), piece))
    }

    pub fn piece_at(&self, cell: IVec2) -> Option<PieceId> {
        self.pieces().find_map(|(id, piece)| (piece.cell() == cell).then_some(id))
    }

    pub fn cursor_cell(&self) -> Option<IVec2> {
        self.selection.cell(&self.pieces)
    }

    pub fn is_moving(&self) -> bool {
        self.selection.is_moving(&self.pieces)
    }

    /// Steps the cursor or the grabbed piece. The free cursor may pass over
    /// pieces but is kept on the field.
    pub fn step(&mut self, direction: Direction) -> bool {
        if let Some(motion) = self.selection.free_motion() {
            if !self.field.contains(motion.cell() + direction.delta()) {
                return false;
            }
        }

        let moved = self
            .selection
            .step(direction, &mut self.pieces, &mut self.field);
        if moved {
            debug!("Selection moved {direction:?} to {:?}", self.cursor_cell());
        }
        moved
    }

    pub fn move_up(&mut self) -> bool {
        self.step(Direction::Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.step(Direction::Down)
    }

    pub fn move_left(&mut self) -> bool {
        self.step(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.step(Direction::Right)
    }

    pub fn select(&mut self, id: PieceId) -> Result<(), SelectionError> {
        self.selection.select(id, &mut self.pieces)?;
        debug!("Selected piece {id}");
        Ok(())
    }

    pub fn drop_piece(&mut self) -> Result<PieceId, SelectionError> {
        let id = self.selection.drop_piece(&mut self.pieces)?;
        debug!("Dropped piece {id}");
        Ok(id)
    }

    /// Drops the grabbed piece, or grabs the piece under a resting cursor.
    pub fn toggle_grab(&mut self) -> Result<Grab, SelectionError> {
        if self.selection.is_attached() {
            return self.drop_piece().map(Grab::Dropped);
        }
        if self.is_moving() {
            return Ok(Grab::Nothing);
        }
        let Some(id) = self.cursor_cell().and_then(|cell| self.piece_at(cell)) else {
            return Ok(Grab::Nothing);
        };
        self.select(id)?;
        Ok(Grab::Selected(id))
    }

    /// Advances every slide by `dt` seconds. The grabbed piece is advanced
    /// through the selection, all others directly, each exactly once.
    pub fn update(&mut self, dt: f32) {
        let attached = self.selection.attached();
        if self.selection.update(dt, &mut self.pieces) {
            debug!("Selection arrived at {:?}", self.cursor_cell());
        }
        for (index, piece) in self.pieces.iter_mut().enumerate() {
            if attached == Some(PieceId::new(index)) {
                continue;
            }
            if piece.update(dt) {
                debug!("{piece} arrived");
            }
        }
    }
}
