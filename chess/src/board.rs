//! Board model: 32 fixed piece slots plus the board-wide transient flags.
//!
//! Slots are allocated once and never removed. A capture marks its slot
//! `captured`, so a `SlotId` names the same piece for the whole game.

use crate::types::{PieceKind, Square, Team};

/// Number of piece slots, 16 per side.
pub const SLOT_COUNT: usize = 32;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Stable index of one of the 32 piece slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(index: usize) -> Option<Self> {
        (index < SLOT_COUNT).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..SLOT_COUNT as u8).map(SlotId)
    }

    /// Slots 0..16 belong to Black, 16..32 to White.
    pub fn team(self) -> Team {
        if self.0 < 16 {
            Team::Black
        } else {
            Team::White
        }
    }

    /// Kind this slot holds at game start.
    pub fn starting_kind(self) -> PieceKind {
        if self.0 % 16 < 8 {
            BACK_RANK[(self.0 % 8) as usize]
        } else {
            PieceKind::Pawn
        }
    }

    /// Square this slot occupies at game start.
    pub fn home_square(self) -> Square {
        let team = self.team();
        let rank = if self.0 % 16 < 8 {
            team.home_rank()
        } else {
            team.pawn_rank()
        };
        Square::from_index(rank * 8 + self.0 % 8)
    }
}

/// One piece record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub team: Team,
    pub kind: PieceKind,
    pub square: Square,
    pub captured: bool,
    pub has_moved: bool,
}

impl Piece {
    /// True when this piece is still on the board and plays against `team`.
    pub fn is_opponent(&self, team: Team) -> bool {
        !self.captured && self.team != team
    }

    pub fn is_active(&self) -> bool {
        !self.captured
    }

    fn starting(slot: SlotId) -> Self {
        Self {
            team: slot.team(),
            kind: slot.starting_kind(),
            square: slot.home_square(),
            captured: false,
            has_moved: false,
        }
    }
}

/// A pawn that just advanced two squares and may be captured en passant on
/// the very next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// Square the double-stepped pawn now stands on.
    pub square: Square,
}

/// Authoritative game state. Cheap to copy: legality checks run on copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [Piece; SLOT_COUNT],
    turn: Team,
    en_passant: Option<EnPassant>,
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut pieces = [Piece::starting(SlotId(0)); SLOT_COUNT];
        for slot in SlotId::all() {
            pieces[slot.index()] = Piece::starting(slot);
        }
        Self {
            pieces,
            turn: Team::White,
            en_passant: None,
        }
    }

    /// Board from filled slots; empty slots become captured pieces parked on
    /// their home squares.
    pub(crate) fn from_slots(slots: [Option<Piece>; SLOT_COUNT], turn: Team) -> Self {
        let pieces = std::array::from_fn(|index| {
            let slot = SlotId(index as u8);
            slots[index].unwrap_or(Piece {
                captured: true,
                has_moved: true,
                ..Piece::starting(slot)
            })
        });
        Self {
            pieces,
            turn,
            en_passant: None,
        }
    }

    pub fn turn(&self) -> Team {
        self.turn
    }

    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    pub fn piece(&self, slot: SlotId) -> &Piece {
        &self.pieces[slot.index()]
    }

    /// Every slot, captured ones included.
    pub fn pieces(&self) -> impl Iterator<Item = (SlotId, &Piece)> {
        SlotId::all().zip(self.pieces.iter())
    }

    /// Non-captured pieces only.
    pub fn active_pieces(&self) -> impl Iterator<Item = (SlotId, &Piece)> {
        self.pieces().filter(|(_, piece)| piece.is_active())
    }

    /// Slot of the non-captured piece standing on `square`.
    pub fn slot_at(&self, square: Square) -> Option<SlotId> {
        self.active_pieces()
            .find(|(_, piece)| piece.square == square)
            .map(|(slot, _)| slot)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.slot_at(square).map(|slot| self.piece(slot))
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.slot_at(square).is_none()
    }

    pub fn king_square(&self, team: Team) -> Option<Square> {
        self.active_pieces()
            .find(|(_, piece)| piece.team == team && piece.kind == PieceKind::King)
            .map(|(_, piece)| piece.square)
    }

    /// Same position with the other side to move.
    pub fn pass_turn(mut self) -> Self {
        self.turn = self.turn.opponent();
        self
    }

    pub(crate) fn piece_mut(&mut self, slot: SlotId) -> &mut Piece {
        &mut self.pieces[slot.index()]
    }

    pub(crate) fn set_en_passant(&mut self, en_passant: Option<EnPassant>) {
        self.en_passant = en_passant;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_starting_layout() {
        let board = Board::new();
        assert_eq!(board.turn(), Team::White);
        assert_eq!(board.active_pieces().count(), 32);

        let king = board.piece_at(sq("e1")).unwrap();
        assert_eq!((king.team, king.kind), (Team::White, PieceKind::King));
        let queen = board.piece_at(sq("d8")).unwrap();
        assert_eq!((queen.team, queen.kind), (Team::Black, PieceKind::Queen));
        let pawn = board.piece_at(sq("a7")).unwrap();
        assert_eq!((pawn.team, pawn.kind), (Team::Black, PieceKind::Pawn));
        assert!(board.is_empty(sq("e4")));
    }

    #[test]
    fn test_slot_identity_matches_layout() {
        let board = Board::new();
        for (slot, piece) in board.pieces() {
            assert_eq!(piece.team, slot.team());
            assert_eq!(piece.square, slot.home_square());
            assert!(!piece.has_moved);
        }
        assert_eq!(SlotId::new(32), None);
    }

    #[test]
    fn test_unique_squares_at_start() {
        let board = Board::new();
        let mut seen = std::collections::HashSet::new();
        for (_, piece) in board.active_pieces() {
            assert!(seen.insert(piece.square));
        }
    }

    #[test]
    fn test_pass_turn() {
        let board = Board::new().pass_turn();
        assert_eq!(board.turn(), Team::Black);
        assert_eq!(board.pass_turn().turn(), Team::White);
    }

    #[test]
    fn test_king_squares() {
        let board = Board::new();
        assert_eq!(board.king_square(Team::White), Some(sq("e1")));
        assert_eq!(board.king_square(Team::Black), Some(sq("e8")));
    }
}
