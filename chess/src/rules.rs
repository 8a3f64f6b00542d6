//! Rule engine: per-piece legality, check detection and position
//! classification.
//!
//! Two layers exist. [`candidate`] applies only the movement rule of the
//! piece kind ("shape" legality). [`legal_move`] additionally plays the
//! candidate on a scratch copy and rejects it when the mover's own king is
//! left attacked. Check detection uses the shape layer only, so the two never
//! recurse into each other.

use crate::board::{Board, SlotId};
use crate::commit;
use crate::moves::{CastleSide, Move, MoveKind};
use crate::types::{PieceKind, Square, Team};
use smallvec::SmallVec;

/// Destination squares of one piece. No piece has more than 27.
pub type Destinations = SmallVec<[Square; 28]>;

/// Check state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckStatus {
    /// King not attacked. A position without legal moves also lands here.
    #[default]
    Clear,
    /// King attacked, at least one legal reply exists.
    Check,
    /// King attacked, no legal reply.
    Checkmate,
}

/// Shape-legal move of the piece in `slot` to `to`, ignoring check-safety.
///
/// Returns `None` for a captured piece, a null move, or any destination the
/// piece kind cannot reach.
pub fn candidate(board: &Board, slot: SlotId, to: Square) -> Option<Move> {
    let piece = board.piece(slot);
    if piece.captured || piece.square == to {
        return None;
    }

    let kind = match piece.kind {
        PieceKind::Pawn => pawn_move(board, slot, to),
        PieceKind::Rook => rook_move(board, slot, to),
        PieceKind::Knight => knight_move(board, slot, to),
        PieceKind::Bishop => bishop_move(board, slot, to),
        PieceKind::Queen => rook_move(board, slot, to).or_else(|| bishop_move(board, slot, to)),
        PieceKind::King => king_move(board, slot, to),
    }?;

    Some(Move {
        slot,
        from: piece.square,
        to,
        kind,
    })
}

/// Fully legal move: shape-legal and leaves the mover's king safe.
pub fn legal_move(board: &Board, slot: SlotId, to: Square) -> Option<Move> {
    let mv = candidate(board, slot, to)?;
    let team = board.piece(slot).team;
    let after = commit::apply(board, &mv);
    (!is_king_attacked(&after, team)).then_some(mv)
}

pub fn is_legal_move(board: &Board, slot: SlotId, to: Square) -> bool {
    legal_move(board, slot, to).is_some()
}

/// Every square the piece in `slot` may legally move to.
pub fn legal_destinations(board: &Board, slot: SlotId) -> Destinations {
    Square::all()
        .filter(|&to| is_legal_move(board, slot, to))
        .collect()
}

/// Every legal move of the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let team = board.turn();
    board
        .active_pieces()
        .filter(|(_, piece)| piece.team == team)
        .flat_map(|(slot, _)| Square::all().filter_map(move |to| legal_move(board, slot, to)))
        .collect()
}

/// True when `team` has at least one legal move.
pub fn has_legal_move(board: &Board, team: Team) -> bool {
    board
        .active_pieces()
        .filter(|(_, piece)| piece.team == team)
        .any(|(slot, _)| Square::all().any(|to| is_legal_move(board, slot, to)))
}

/// True when any opposing piece could move onto `team`'s king square.
pub fn is_king_attacked(board: &Board, team: Team) -> bool {
    let Some(king) = board.king_square(team) else {
        return false;
    };
    board
        .active_pieces()
        .filter(|(_, piece)| piece.team != team)
        .any(|(slot, _)| candidate(board, slot, king).is_some())
}

/// Whether the side to move is in check.
pub fn is_in_check(board: &Board) -> bool {
    is_king_attacked(board, board.turn())
}

pub fn classify_position(board: &Board) -> CheckStatus {
    if !is_in_check(board) {
        CheckStatus::Clear
    } else if has_legal_move(board, board.turn()) {
        CheckStatus::Check
    } else {
        CheckStatus::Checkmate
    }
}

/// Outcome of landing on `to`: quiet when empty, a capture when an opponent
/// stands there, `None` when blocked by a team-mate.
fn landing(board: &Board, team: Team, to: Square) -> Option<MoveKind> {
    match board.slot_at(to) {
        None => Some(MoveKind::Quiet),
        Some(victim) if board.piece(victim).is_opponent(team) => Some(MoveKind::Capture(victim)),
        Some(_) => None,
    }
}

/// True when every square strictly between `from` and `to` along a straight
/// or diagonal line is empty.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (df, dr) = from.delta(to);
    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut current = from;
    loop {
        let Some(next) = current.offset(step_f, step_r) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
}

fn pawn_move(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let pawn = board.piece(slot);
    let forward = pawn.team.forward();
    let (df, dr) = pawn.square.delta(to);

    if df == 0 && dr == forward {
        return board.is_empty(to).then_some(MoveKind::Quiet);
    }

    if df == 0 && dr == 2 * forward && !pawn.has_moved {
        let passed = pawn.square.offset(0, forward)?;
        return (board.is_empty(passed) && board.is_empty(to)).then_some(MoveKind::DoubleStep);
    }

    if dr != forward {
        return None;
    }
    if df.abs() == 1 {
        if let Some(MoveKind::Capture(victim)) = landing(board, pawn.team, to) {
            return Some(MoveKind::Capture(victim));
        }
    }
    en_passant(board, slot, to)
}

/// En-passant capture onto the square behind the double-stepped pawn. The
/// capturing pawn must stand on that pawn's rank; its file is not restricted.
fn en_passant(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let pawn = board.piece(slot);
    let target = board.en_passant()?.square;
    if to.file() != target.file()
        || pawn.square.rank() != target.rank()
        || target.offset(0, pawn.team.forward()) != Some(to)
        || !board.is_empty(to)
    {
        return None;
    }

    let victim = board.slot_at(target)?;
    let victim_piece = board.piece(victim);
    (victim_piece.kind == PieceKind::Pawn && victim_piece.is_opponent(pawn.team))
        .then_some(MoveKind::EnPassant(victim))
}

fn rook_move(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let rook = board.piece(slot);
    let (df, dr) = rook.square.delta(to);
    if (df == 0) == (dr == 0) || !path_clear(board, rook.square, to) {
        return None;
    }
    landing(board, rook.team, to)
}

fn knight_move(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let knight = board.piece(slot);
    let (df, dr) = knight.square.delta(to);
    match (df.abs(), dr.abs()) {
        (1, 2) | (2, 1) => landing(board, knight.team, to),
        _ => None,
    }
}

fn bishop_move(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let bishop = board.piece(slot);
    let (df, dr) = bishop.square.delta(to);
    if df == 0 || df.abs() != dr.abs() || !path_clear(board, bishop.square, to) {
        return None;
    }
    landing(board, bishop.team, to)
}

fn king_move(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let king = board.piece(slot);
    let (df, dr) = king.square.delta(to);
    if df.abs() <= 1 && dr.abs() <= 1 {
        return landing(board, king.team, to);
    }
    castle(board, slot, to)
}

/// Castling: unmoved king, two files sideways along its home rank, unmoved
/// team rook still on the matching corner, nothing in between.
fn castle(board: &Board, slot: SlotId, to: Square) -> Option<MoveKind> {
    let king = board.piece(slot);
    let (df, dr) = king.square.delta(to);
    let rank = king.team.home_rank();
    if king.has_moved || dr != 0 || df.abs() != 2 || king.square.rank() != rank {
        return None;
    }

    let side = if df < 0 {
        CastleSide::Left
    } else {
        CastleSide::Right
    };
    if to.file() != side.king_target_file() {
        return None;
    }

    let corner = Square::new(side.rook_file(), rank)?;
    let rook = board.piece(board.slot_at(corner)?);
    if rook.team != king.team || rook.kind != PieceKind::Rook || rook.has_moved {
        return None;
    }

    path_clear(board, king.square, corner).then_some(MoveKind::Castle(side))
}
