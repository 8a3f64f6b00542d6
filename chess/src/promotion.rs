//! Pawn promotion: trigger detection and the kind rewrite.
//!
//! Only Queen and Knight are offered.

use crate::board::{Board, SlotId};
use crate::types::PieceKind;

/// Pending promotion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PromotionChoice {
    #[default]
    Queen,
    Knight,
}

impl PromotionChoice {
    pub fn kind(self) -> PieceKind {
        match self {
            Self::Queen => PieceKind::Queen,
            Self::Knight => PieceKind::Knight,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Queen => Self::Knight,
            Self::Knight => Self::Queen,
        }
    }

    pub fn prev(self) -> Self {
        // two options, so stepping back is the same as stepping forward
        self.next()
    }
}

/// Slot of a non-captured pawn standing on the rank farthest from its own
/// side, whichever team is to move.
pub fn pending_promotion(board: &Board) -> Option<SlotId> {
    board
        .active_pieces()
        .find(|(_, piece)| {
            piece.kind == PieceKind::Pawn && piece.square.rank() == piece.team.promotion_rank()
        })
        .map(|(slot, _)| slot)
}

/// Rewrite the pawn in `slot` to the chosen kind. Returns the board
/// unchanged when `slot` is not a pawn awaiting promotion.
pub fn promote(board: &Board, slot: SlotId, choice: PromotionChoice) -> Board {
    let mut next = *board;
    if pending_promotion(board) == Some(slot) {
        next.piece_mut(slot).kind = choice.kind();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Square, Team};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_no_promotion_at_start() {
        assert_eq!(pending_promotion(&Board::new()), None);
    }

    #[test]
    fn test_white_pawn_on_eighth_rank_triggers() {
        let board = Board::from_placement("4k3/1P6/8/8/8/8/8/4K3", Team::White).unwrap();
        assert_eq!(pending_promotion(&board), None);

        let board = Board::from_placement("1P2k3/8/8/8/8/8/8/4K3", Team::Black).unwrap();
        let slot = pending_promotion(&board).unwrap();
        assert_eq!(board.piece(slot).square, sq("b8"));

        let promoted = promote(&board, slot, PromotionChoice::Knight);
        assert_eq!(promoted.piece(slot).kind, PieceKind::Knight);
        assert_eq!(pending_promotion(&promoted), None);
    }

    #[test]
    fn test_black_pawn_on_first_rank_triggers() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/p3K3", Team::White).unwrap();
        let slot = pending_promotion(&board).unwrap();
        assert_eq!(board.piece(slot).team, Team::Black);
        let promoted = promote(&board, slot, PromotionChoice::Queen);
        assert_eq!(promoted.piece(slot).kind, PieceKind::Queen);
    }

    #[test]
    fn test_promote_ignores_other_slots() {
        let board = Board::new();
        let slot = board.slot_at(sq("e2")).unwrap();
        assert_eq!(promote(&board, slot, PromotionChoice::Queen), board);
    }

    #[test]
    fn test_choice_cycles_between_two_kinds() {
        let choice = PromotionChoice::default();
        assert_eq!(choice.kind(), PieceKind::Queen);
        assert_eq!(choice.next(), PromotionChoice::Knight);
        assert_eq!(choice.next().next(), choice);
        assert_eq!(choice.prev(), PromotionChoice::Knight);
    }
}
