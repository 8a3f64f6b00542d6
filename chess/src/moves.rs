//! Explicit move descriptors produced by the rule engine and consumed by the
//! committer.

use crate::board::SlotId;
use crate::types::Square;
use smallvec::SmallVec;

/// Which corner rook takes part in castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward file 0.
    Left,
    /// Toward file 7.
    Right,
}

impl CastleSide {
    pub fn rook_file(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 7,
        }
    }

    /// File the rook lands on, next to the king's destination.
    pub fn rook_target_file(self) -> u8 {
        match self {
            Self::Left => 3,
            Self::Right => 5,
        }
    }

    pub fn king_target_file(self) -> u8 {
        match self {
            Self::Left => 2,
            Self::Right => 6,
        }
    }
}

/// Special handling a move needs when committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain relocation onto an empty square.
    Quiet,
    /// Pawn advance of two squares; opens the en-passant window.
    DoubleStep,
    /// Relocation onto an opposing piece, which is captured.
    Capture(SlotId),
    /// Pawn capture of a double-stepped pawn on the capturing pawn's rank.
    EnPassant(SlotId),
    /// King moves two files and the corner rook jumps beside it.
    Castle(CastleSide),
}

/// A fully described candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub slot: SlotId,
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Every square whose contents change when this move is committed.
    pub fn touched_squares(&self) -> SmallVec<[Square; 4]> {
        let mut squares = SmallVec::new();
        squares.push(self.from);
        squares.push(self.to);
        match self.kind {
            MoveKind::EnPassant(_) => {
                squares.extend(Square::new(self.to.file(), self.from.rank()));
            }
            MoveKind::Castle(side) => {
                let rank = self.from.rank();
                squares.extend(Square::new(side.rook_file(), rank));
                squares.extend(Square::new(side.rook_target_file(), rank));
            }
            MoveKind::Quiet | MoveKind::DoubleStep | MoveKind::Capture(_) => {}
        }
        squares
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = match self.kind {
            MoveKind::Capture(_) | MoveKind::EnPassant(_) => 'x',
            _ => '-',
        };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_castle_touches_rook_squares() {
        let mv = Move {
            slot: SlotId::new(20).unwrap(),
            from: sq("e1"),
            to: sq("g1"),
            kind: MoveKind::Castle(CastleSide::Right),
        };
        let touched = mv.touched_squares();
        assert_eq!(touched.as_slice(), &[sq("e1"), sq("g1"), sq("h1"), sq("f1")]);
    }

    #[test]
    fn test_en_passant_touches_victim_square() {
        let mv = Move {
            slot: SlotId::new(28).unwrap(),
            from: sq("e5"),
            to: sq("d6"),
            kind: MoveKind::EnPassant(SlotId::new(11).unwrap()),
        };
        assert_eq!(mv.touched_squares().as_slice(), &[sq("e5"), sq("d6"), sq("d5")]);
        assert_eq!(mv.to_string(), "e5xd6");
    }
}
