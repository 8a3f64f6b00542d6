//! Chess rules core for the handheld board: board model, rule engine, move
//! committer and promotion.
//!
//! Everything here is pure: every operation takes a [`Board`] by reference
//! and returns a new value, so legality checks never disturb the live game.

pub mod board;
pub mod commit;
pub mod moves;
pub mod placement;
pub mod promotion;
pub mod rules;
pub mod types;

pub use board::{Board, EnPassant, Piece, SlotId, SLOT_COUNT};
pub use moves::{CastleSide, Move, MoveKind};
pub use placement::PlacementError;
pub use promotion::PromotionChoice;
pub use rules::{CheckStatus, Destinations};
pub use types::{PieceKind, Square, Team};
