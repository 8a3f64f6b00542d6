//! Move committer: applies a move descriptor to a copy of the board.

use crate::board::{Board, EnPassant};
use crate::moves::{Move, MoveKind};
use crate::types::Square;

/// Apply `mv` and return the resulting board. The side to move is left
/// unchanged; callers pass the turn with [`Board::pass_turn`].
///
/// `mv` is expected to come from the rule engine. The en-passant window is
/// closed by every commit and reopened only by a pawn double step.
pub fn apply(board: &Board, mv: &Move) -> Board {
    let mut next = *board;

    match mv.kind {
        MoveKind::Capture(victim) | MoveKind::EnPassant(victim) => {
            next.piece_mut(victim).captured = true;
        }
        MoveKind::Castle(side) => {
            let rank = mv.from.rank();
            let rook = Square::new(side.rook_file(), rank).and_then(|corner| board.slot_at(corner));
            if let (Some(rook), Some(target)) = (rook, Square::new(side.rook_target_file(), rank)) {
                let rook = next.piece_mut(rook);
                rook.square = target;
                rook.has_moved = true;
            }
        }
        MoveKind::Quiet | MoveKind::DoubleStep => {}
    }

    let piece = next.piece_mut(mv.slot);
    piece.square = mv.to;
    piece.has_moved = true;

    next.set_en_passant(match mv.kind {
        MoveKind::DoubleStep => Some(EnPassant { square: mv.to }),
        _ => None,
    });

    next
}
