//! FEN-style piece placement text for boards.
//!
//! The first row is rank 0 (Black's home rank), so the standard opening reads
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`, exactly as in FEN.

use crate::board::{Board, Piece, SlotId, SLOT_COUNT};
use crate::types::{PieceKind, Square, Team};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {0} does not describe exactly 8 squares")]
    RowWidth(usize),
    #[error("invalid piece character: {0}")]
    InvalidPiece(char),
    #[error("{0} has no king")]
    MissingKing(Team),
    #[error("no free slot for {team} {kind}")]
    NoSlot { team: Team, kind: PieceKind },
}

impl Board {
    /// Build a board from placement text with `turn` to move.
    ///
    /// Pieces fill the fixed slots by kind. A piece found on its slot's home
    /// square keeps `has_moved == false`; any other piece counts as moved.
    /// Extra Queens, Rooks, Bishops and Knights fill free pawn slots, as after
    /// a promotion. Slots left over are marked captured.
    pub fn from_placement(placement: &str, turn: Team) -> Result<Self, PlacementError> {
        let found = parse_rows(placement)?;

        let mut pieces: [Option<Piece>; SLOT_COUNT] = [None; SLOT_COUNT];
        let mut pending = Vec::new();

        // Pieces on their home squares claim their own slot first.
        for (team, kind, square) in found {
            let home = SlotId::all().find(|slot| {
                slot.team() == team && slot.starting_kind() == kind && slot.home_square() == square
            });
            match home {
                Some(slot) => {
                    pieces[slot.index()] = Some(Piece {
                        team,
                        kind,
                        square,
                        captured: false,
                        has_moved: false,
                    })
                }
                None => pending.push((team, kind, square)),
            }
        }

        for (team, kind, square) in pending {
            let free = |wanted: PieceKind| {
                SlotId::all().find(|slot| {
                    slot.team() == team
                        && slot.starting_kind() == wanted
                        && pieces[slot.index()].is_none()
                })
            };
            let slot = free(kind)
                .or_else(|| match kind {
                    PieceKind::Pawn | PieceKind::King => None,
                    _ => free(PieceKind::Pawn),
                })
                .ok_or(PlacementError::NoSlot { team, kind })?;
            pieces[slot.index()] = Some(Piece {
                team,
                kind,
                square,
                captured: false,
                has_moved: true,
            });
        }

        let board = Board::from_slots(pieces, turn);
        for team in [Team::White, Team::Black] {
            if board.king_square(team).is_none() {
                return Err(PlacementError::MissingKing(team));
            }
        }
        Ok(board)
    }

    /// Placement text for this board, the inverse of [`Board::from_placement`].
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in 0..8u8 {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.kind.to_char(piece.team));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }
}

fn parse_rows(placement: &str) -> Result<Vec<(Team, PieceKind, Square)>, PlacementError> {
    let rows: Vec<&str> = placement.trim().split('/').collect();
    if rows.len() != 8 {
        return Err(PlacementError::RowCount(rows.len()));
    }

    let mut found = Vec::new();
    for (rank, row) in rows.iter().enumerate() {
        let mut file = 0usize;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else {
                let kind = PieceKind::from_char(c).ok_or(PlacementError::InvalidPiece(c))?;
                let team = if c.is_ascii_uppercase() {
                    Team::White
                } else {
                    Team::Black
                };
                let square =
                    Square::new(file as u8, rank as u8).ok_or(PlacementError::RowWidth(rank))?;
                found.push((team, kind, square));
                file += 1;
            }
            if file > 8 {
                return Err(PlacementError::RowWidth(rank));
            }
        }
        if file != 8 {
            return Err(PlacementError::RowWidth(rank));
        }
    }
    Ok(found)
}

impl std::fmt::Display for Board {
    /// 8x8 diagram, rank 0 on top, `.` for empty squares.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in Square::all() {
            let c = self
                .piece_at(square)
                .map_or('.', |piece| piece.kind.to_char(piece.team));
            write!(f, "{c}")?;
            if square.file() == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_starting_position() {
        let board = Board::from_placement(START, Team::White).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.placement(), START);
    }

    #[test]
    fn test_sparse_position_marks_unused_slots_captured() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K2R", Team::White).unwrap();
        assert_eq!(board.active_pieces().count(), 3);
        let rook = board.piece_at(Square::from_algebraic("h1").unwrap()).unwrap();
        assert!(!rook.has_moved);
        assert_eq!(board.placement(), "4k3/8/8/8/8/8/8/4K2R");
    }

    #[test]
    fn test_moved_pieces_are_flagged() {
        let board = Board::from_placement("4k3/8/8/8/4P3/8/8/4K3", Team::Black).unwrap();
        let pawn = board.piece_at(Square::from_algebraic("e4").unwrap()).unwrap();
        assert!(pawn.has_moved);
        assert_eq!(board.turn(), Team::Black);
    }

    #[test]
    fn test_extra_queens_use_pawn_slots() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/QQQ1K3", Team::White).unwrap();
        let queens = board
            .active_pieces()
            .filter(|(_, p)| p.kind == PieceKind::Queen)
            .count();
        assert_eq!(queens, 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Board::from_placement("8/8/8", Team::White),
            Err(PlacementError::RowCount(3))
        );
        assert_eq!(
            Board::from_placement("9/8/8/8/8/8/8/4K3", Team::White),
            Err(PlacementError::RowWidth(0))
        );
        assert_eq!(
            Board::from_placement("4k3/8/8/8/8/8/8/4K2X", Team::White),
            Err(PlacementError::InvalidPiece('X'))
        );
        assert_eq!(
            Board::from_placement("8/8/8/8/8/8/8/4K3", Team::White),
            Err(PlacementError::MissingKing(Team::Black))
        );
        assert_eq!(
            Board::from_placement("4k3/8/8/8/8/8/8/K3K3", Team::White),
            Err(PlacementError::NoSlot {
                team: Team::White,
                kind: PieceKind::King
            })
        );
    }

    #[test]
    fn test_display_diagram() {
        let text = Board::new().to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "rnbqkbnr");
        assert_eq!(rows[4], "........");
        assert_eq!(rows[7], "RNBQKBNR");
    }
}
