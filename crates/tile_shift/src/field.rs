use std::fmt::{self, Display, Formatter};

use bevy::prelude::*;
use strum::{EnumIter, FromRepr};

/// Occupant identity of a piece. The discriminant is the raw value a level
/// uses to name the kind; `0` is reserved for ground.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, FromRepr, strum::Display)]
#[repr(u8)]
pub enum PieceKind {
    Red = 1,
    Green = 2,
    Blue = 3,
}

impl PieceKind {
    pub const fn raw(self) -> u8 {
        self as u8
    }

    const fn symbol(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Ground,
    Occupied(PieceKind),
}

impl Cell {
    pub const GROUND_RAW: u8 = 0;

    /// Decodes a raw cell value. Returns `None` for values that are neither
    /// ground nor a known kind.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw == Self::GROUND_RAW {
            return Some(Self::Ground);
        }
        match PieceKind::from_repr(raw) {
            Some(kind) => Some(Self::Occupied(kind)),
            None => None,
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::Ground => Self::GROUND_RAW,
            Self::Occupied(kind) => kind.raw(),
        }
    }

    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Occupied(_))
    }
}

/// Occupancy map of the play area, addressed by `(col, row)` with rows
/// growing downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
}

impl Field {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::Ground; w * h],
        }
    }

    pub const fn width(&self) -> usize {
        self.w
    }

    pub const fn height(&self) -> usize {
        self.h
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.index(cell).is_some()
    }

    pub fn get(&self, cell: IVec2) -> Option<Cell> {
        self.index(cell).and_then(|index| self.cells.get(index)).copied()
    }

    /// Anything outside the field counts as blocked so pieces never leave it.
    pub fn is_blocked(&self, cell: IVec2) -> bool {
        self.get(cell).is_none_or(Cell::is_blocked)
    }

    pub fn update_field(&mut self, cell: IVec2, value: Cell) {
        let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) else {
            warn!("Ignoring field update outside the field at {cell}");
            return;
        };
        *slot = value;
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_blocked()).count()
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let col = usize::try_from(cell.x).ok()?;
        let row = usize::try_from(cell.y).ok()?;
        (col < self.w && row < self.h).then_some(col + row * self.w)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.w.max(1)) {
            for cell in row {
                match cell {
                    Cell::Ground => write!(f, ".")?,
                    Cell::Occupied(kind) => write!(f, "{}", kind.symbol())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
