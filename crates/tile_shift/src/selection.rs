use bevy::prelude::*;
use thiserror::Error;

use crate::field::Field;
use crate::motion::{Direction, GridMotion, MotionConfig};
use crate::piece::{Piece, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("piece {0} is already selected, drop it first")]
    AlreadyAttached(PieceId),
    #[error("no piece is selected")]
    NotAttached,
    #[error("piece {0} does not exist")]
    UnknownPiece(PieceId),
}

/// The player's cursor. While free it roams on its own; while attached it
/// steers the grabbed piece.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Free(GridMotion),
    Attached(PieceId),
}

impl Selection {
    pub fn new(cell: IVec2, config: MotionConfig) -> Self {
        Self::Free(GridMotion::at(cell, config))
    }

    pub fn select(&mut self, id: PieceId, pieces: &mut [Piece]) -> Result<(), SelectionError> {
        if let Self::Attached(current) = *self {
            return Err(SelectionError::AlreadyAttached(current));
        }
        let piece = pieces
            .get_mut(id.index())
            .ok_or(SelectionError::UnknownPiece(id))?;
        piece.set_selection(true);
        *self = Self::Attached(id);
        Ok(())
    }

    /// Lets go of the attached piece. The cursor comes to rest on the cell
    /// the piece is heading to, even if it is still sliding there.
    pub fn drop_piece(&mut self, pieces: &mut [Piece]) -> Result<PieceId, SelectionError> {
        let Self::Attached(id) = *self else {
            return Err(SelectionError::NotAttached);
        };
        let piece = pieces
            .get_mut(id.index())
            .ok_or(SelectionError::UnknownPiece(id))?;
        piece.set_selection(false);
        *self = Self::Free(GridMotion::at(piece.cell(), piece.motion().config()));
        Ok(id)
    }

    /// Moves the attached piece, or the cursor itself when free. A free
    /// cursor ignores occupancy but will not start a new step mid-slide.
    pub fn step(&mut self, direction: Direction, pieces: &mut [Piece], field: &mut Field) -> bool {
        match self {
            Self::Attached(id) => {
                let Some(piece) = pieces.get_mut(id.index()) else {
                    warn!("Selected piece {id} is missing");
                    return false;
                };
                piece.step(direction, field)
            }
            Self::Free(motion) => {
                if motion.is_moving() {
                    return false;
                }
                motion.step(direction);
                true
            }
        }
    }

    pub fn move_up(&mut self, pieces: &mut [Piece], field: &mut Field) -> bool {
        self.step(Direction::Up, pieces, field)
    }

    pub fn move_down(&mut self, pieces: &mut [Piece], field: &mut Field) -> bool {
        self.step(Direction::Down, pieces, field)
    }

    pub fn move_left(&mut self, pieces: &mut [Piece], field: &mut Field) -> bool {
        self.step(Direction::Left, pieces, field)
    }

    pub fn move_right(&mut self, pieces: &mut [Piece], field: &mut Field) -> bool {
        self.step(Direction::Right, pieces, field)
    }

    pub fn update(&mut self, dt: f32, pieces: &mut [Piece]) -> bool {
        match self {
            Self::Attached(id) => pieces
                .get_mut(id.index())
                .is_some_and(|piece| piece.update(dt)),
            Self::Free(motion) => motion.update(dt),
        }
    }

    pub fn is_moving(&self, pieces: &[Piece]) -> bool {
        match self {
            Self::Attached(id) => pieces.get(id.index()).is_some_and(Piece::is_moving),
            Self::Free(motion) => motion.is_moving(),
        }
    }

    pub const fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }

    pub const fn attached(&self) -> Option<PieceId> {
        match self {
            Self::Attached(id) => Some(*id),
            Self::Free(_) => None,
        }
    }

    pub const fn free_motion(&self) -> Option<&GridMotion> {
        match self {
            Self::Free(motion) => Some(motion),
            Self::Attached(_) => None,
        }
    }

    /// Logical cell under the cursor, which is the piece's cell when attached.
    pub fn cell(&self, pieces: &[Piece]) -> Option<IVec2> {
        match self {
            Self::Attached(id) => pieces.get(id.index()).map(Piece::cell),
            Self::Free(motion) => Some(motion.cell()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Cell, PieceKind};
    use crate::piece::PieceFactory;

    const DT: f32 = 1. / 60.;

    fn setup() -> (Field, Vec<Piece>) {
        let mut field = Field::new(5, 5);
        let mut pieces = Vec::new();
        for (kind, cell) in [(PieceKind::Red, IVec2::new(1, 1)), (PieceKind::Blue, IVec2::new(3, 1))] {
            field.update_field(cell, Cell::Occupied(kind));
            pieces.push(
                PieceFactory::new_instance(kind.raw(), cell, MotionConfig::default())
                    .expect("known kind"),
            );
        }
        (field, pieces)
    }

    fn settle(selection: &mut Selection, pieces: &mut [Piece]) {
        for _ in 0..1_000 {
            if selection.update(DT, pieces) {
                return;
            }
        }
        panic!("selection never arrived: {selection:?}");
    }

    #[test]
    fn free_cursor_ignores_repeat_steps_until_arrival() {
        let (mut field, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::ZERO, MotionConfig::default());

        assert!(selection.move_right(&mut pieces, &mut field), "first step");
        assert!(!selection.move_right(&mut pieces, &mut field), "mid-slide");
        assert_eq!(selection.cell(&pieces), Some(IVec2::new(1, 0)), "one cell only");

        settle(&mut selection, &mut pieces);
        assert!(selection.move_right(&mut pieces, &mut field), "third step after arrival");
        assert_eq!(selection.cell(&pieces), Some(IVec2::new(2, 0)), "second cell");
    }

    #[test]
    fn free_cursor_passes_over_pieces() {
        let (mut field, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::new(1, 0), MotionConfig::default());
        let snapshot = field.clone();

        assert!(selection.move_down(&mut pieces, &mut field), "onto the red piece");
        settle(&mut selection, &mut pieces);
        assert_eq!(selection.cell(&pieces), Some(IVec2::new(1, 1)), "over the piece");
        assert_eq!(field, snapshot, "free cursor never touches the field");
    }

    #[test]
    fn select_then_drop_round_trips() {
        let (mut field, mut pieces) = setup();
        let red = PieceId::new(0);
        let mut selection = Selection::new(IVec2::new(1, 1), MotionConfig::default());

        selection.select(red, &mut pieces).expect("free selection");
        assert!(selection.is_attached(), "attached");
        assert!(pieces.first().is_some_and(Piece::is_selected), "visual flag set");

        assert!(selection.move_down(&mut pieces, &mut field), "piece moves");
        assert!(selection.is_moving(&pieces), "reports the piece's slide");
        settle(&mut selection, &mut pieces);
        assert!(!selection.is_moving(&pieces), "piece arrived");

        assert_eq!(selection.drop_piece(&mut pieces), Ok(red), "dropped red");
        let piece = pieces.first().expect("red piece");
        assert_eq!(selection.cell(&pieces), Some(piece.cell()), "cursor on the piece");
        assert_eq!(
            selection.free_motion().map(GridMotion::position),
            Some(piece.position()),
            "cursor at rest on the piece"
        );
        assert!(!piece.is_selected(), "visual flag cleared");
    }

    #[test]
    fn drop_mid_slide_snaps_to_the_destination() {
        let (mut field, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::new(1, 1), MotionConfig::default());
        selection.select(PieceId::new(0), &mut pieces).expect("free selection");
        assert!(selection.move_left(&mut pieces, &mut field), "piece moves");
        selection.update(DT, &mut pieces);

        selection.drop_piece(&mut pieces).expect("attached");
        let motion = selection.free_motion().expect("free after drop");
        assert_eq!(motion.cell(), IVec2::new(0, 1), "destination cell");
        assert_eq!(motion.position(), motion.rest_position(), "snapped");
        assert!(!motion.is_moving(), "cursor at rest");
        assert!(pieces.first().is_some_and(Piece::is_moving), "piece keeps sliding");
    }

    #[test]
    fn attached_moves_respect_occupancy() {
        let (mut field, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::new(3, 1), MotionConfig::default());
        selection.select(PieceId::new(1), &mut pieces).expect("free selection");

        assert!(selection.move_left(&mut pieces, &mut field), "(2, 1) is ground");
        settle(&mut selection, &mut pieces);
        assert!(!selection.move_left(&mut pieces, &mut field), "red piece at (1, 1)");
        assert_eq!(selection.cell(&pieces), Some(IVec2::new(2, 1)), "stopped beside red");
    }

    #[test]
    fn reselecting_while_attached_is_an_error() {
        let (_, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::ZERO, MotionConfig::default());
        selection.select(PieceId::new(0), &mut pieces).expect("free selection");

        assert_eq!(
            selection.select(PieceId::new(1), &mut pieces),
            Err(SelectionError::AlreadyAttached(PieceId::new(0))),
            "must drop first"
        );
        assert_eq!(selection.attached(), Some(PieceId::new(0)), "still on red");
        assert!(
            !pieces.get(1).is_some_and(Piece::is_selected),
            "blue never flagged"
        );
    }

    #[test]
    fn drop_while_free_and_unknown_ids_are_errors() {
        let (_, mut pieces) = setup();
        let mut selection = Selection::new(IVec2::ZERO, MotionConfig::default());
        assert_eq!(
            selection.drop_piece(&mut pieces),
            Err(SelectionError::NotAttached),
            "nothing to drop"
        );
        assert_eq!(
            selection.select(PieceId::new(7), &mut pieces),
            Err(SelectionError::UnknownPiece(PieceId::new(7))),
            "no such piece"
        );
        assert!(!selection.is_attached(), "still free");
    }
}
