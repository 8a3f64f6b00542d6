//! Selection controller.
//!
//! Turns per-tick button presses into cursor movement, piece selection, move
//! commits and promotion choices. One [`Controller::tick`] consumes the
//! presses gathered since the previous tick and reports changed screen areas
//! to a [`RenderSink`].
//!
//! ```text
//!            Center on own piece           Center on legal target
//!   Idle  ------------------------>  Selected  --------------------->  Idle
//!    ^  <------------------------      |  ^                             |
//!    |     Center on origin            |  | Center on illegal target    | pawn reached
//!    |                                 +--+                             | last rank
//!    |            Center                                                v
//!    +-------------------------------------------------------  PendingPromotion
//! ```

use chess::promotion::{self, PromotionChoice};
use chess::rules::{self, CheckStatus, Destinations};
use chess::{commit, Board, SlotId, Square};

use crate::input::{Button, Presses};
use crate::render::{Highlight, Redraw, Region, RenderSink, TileView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Idle,
    /// A piece is lifted. `destinations` is computed once on pickup.
    Selected {
        slot: SlotId,
        destinations: Destinations,
    },
    /// A pawn stands on its last rank; only East, West and Center act.
    PendingPromotion {
        slot: SlotId,
        choice: PromotionChoice,
    },
}

#[derive(Debug, Clone)]
pub struct Controller {
    board: Board,
    selection: Selection,
    cursor: Square,
    highlight: Highlight,
    status: CheckStatus,
}

impl Controller {
    /// Standard opening, cursor on the top-left tile.
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        let mut controller = Self {
            board,
            selection: Selection::Idle,
            cursor: Square::TOP_LEFT,
            highlight: Highlight::Empty,
            status: assess(&board),
        };
        controller.highlight = controller.compute_highlight();
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cursor(&self) -> Square {
        self.cursor
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Choice currently offered for a pending promotion.
    pub fn promotion_choice(&self) -> Option<PromotionChoice> {
        match self.selection {
            Selection::PendingPromotion { choice, .. } => Some(choice),
            _ => None,
        }
    }

    /// Checkmate ends the game; later input is ignored.
    pub fn is_halted(&self) -> bool {
        self.status == CheckStatus::Checkmate
    }

    /// Request the first full frame.
    pub fn start<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.request(Redraw::Region(Region::Board));
        sink.request(Redraw::Region(Region::Status));
        tracing::debug!(turn = %self.board.turn(), status = ?self.status, "controller started");
    }

    /// Process one tick of presses.
    ///
    /// Cursor moves apply first in East, West, South, North order, then
    /// Center. While a promotion is pending, North and South are dropped.
    pub fn tick<S: RenderSink + ?Sized>(&mut self, presses: Presses, sink: &mut S) {
        if self.is_halted() {
            if !presses.is_empty() {
                tracing::trace!(?presses, "input after checkmate ignored");
            }
            return;
        }

        if let Some(slot) = promotion::pending_promotion(&self.board) {
            self.promotion_tick(slot, presses, sink);
            return;
        }

        for button in presses.iter() {
            match button.cursor_step() {
                Some((df, dr)) => self.move_cursor(df, dr, sink),
                None => self.confirm(sink),
            }
        }
    }

    /// What to paint on `square` right now.
    pub fn tile(&self, square: Square) -> TileView {
        let (lifted, hint) = match &self.selection {
            Selection::Selected { slot, destinations } => {
                (Some(*slot), destinations.contains(&square))
            }
            _ => (None, false),
        };

        let mut piece = self
            .board
            .slot_at(square)
            .filter(|slot| Some(*slot) != lifted)
            .map(|slot| {
                let piece = self.board.piece(slot);
                (piece.team, piece.kind)
            });

        if let Selection::PendingPromotion { slot, choice } = self.selection {
            let pawn = self.board.piece(slot);
            if pawn.square == square {
                piece = Some((pawn.team, choice.kind()));
            }
        }

        let on_cursor = square == self.cursor;
        if let Some(slot) = lifted.filter(|_| on_cursor) {
            let held = self.board.piece(slot);
            piece = Some((held.team, held.kind));
        }

        TileView {
            square,
            piece,
            cursor: on_cursor.then_some(self.highlight),
            hint,
            lifted: on_cursor && lifted.is_some(),
        }
    }

    fn move_cursor<S: RenderSink + ?Sized>(&mut self, df: i8, dr: i8, sink: &mut S) {
        let Some(next) = self.cursor.offset(df, dr) else {
            return;
        };
        sink.request(Redraw::Tile(self.cursor));
        sink.request(Redraw::Tile(next));
        self.cursor = next;
        self.highlight = self.compute_highlight();
    }

    fn confirm<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        match std::mem::replace(&mut self.selection, Selection::Idle) {
            Selection::Idle => self.pick_up(sink),
            Selection::Selected { slot, destinations } => self.put_down(slot, destinations, sink),
            pending @ Selection::PendingPromotion { .. } => self.selection = pending,
        }
        self.highlight = self.compute_highlight();
    }

    fn pick_up<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let own = self
            .board
            .slot_at(self.cursor)
            .filter(|slot| self.board.piece(*slot).team == self.board.turn());
        let Some(slot) = own else {
            tracing::trace!(square = %self.cursor, "nothing to pick up");
            return;
        };

        let destinations = rules::legal_destinations(&self.board, slot);
        sink.request(Redraw::Tile(self.cursor));
        request_tiles(sink, &destinations);
        tracing::debug!(
            square = %self.cursor,
            kind = %self.board.piece(slot).kind,
            destinations = destinations.len(),
            "piece lifted"
        );
        self.selection = Selection::Selected { slot, destinations };
    }

    fn put_down<S: RenderSink + ?Sized>(
        &mut self,
        slot: SlotId,
        destinations: Destinations,
        sink: &mut S,
    ) {
        let origin = self.board.piece(slot).square;
        if self.cursor == origin {
            sink.request(Redraw::Tile(origin));
            request_tiles(sink, &destinations);
            tracing::debug!(square = %origin, "piece put back");
            return;
        }

        let Some(mv) = rules::legal_move(&self.board, slot, self.cursor) else {
            tracing::trace!(from = %origin, to = %self.cursor, "move rejected");
            self.selection = Selection::Selected { slot, destinations };
            return;
        };

        self.board = commit::apply(&self.board, &mv).pass_turn();
        request_tiles(sink, &mv.touched_squares());
        request_tiles(sink, &destinations);
        tracing::debug!(%mv, turn = %self.board.turn(), "move committed");
        self.refresh_status(sink);
    }

    fn promotion_tick<S: RenderSink + ?Sized>(
        &mut self,
        slot: SlotId,
        presses: Presses,
        sink: &mut S,
    ) {
        let square = self.board.piece(slot).square;
        let mut choice = match self.selection {
            Selection::PendingPromotion {
                slot: pending,
                choice,
            } if pending == slot => choice,
            _ => {
                tracing::debug!(%square, "promotion pending");
                sink.request(Redraw::Tile(self.cursor));
                sink.request(Redraw::Tile(square));
                sink.request(Redraw::Region(Region::Status));
                self.cursor = square;
                PromotionChoice::default()
            }
        };

        if presses.contains(Button::East) {
            choice = choice.next();
            sink.request(Redraw::Tile(square));
        }
        if presses.contains(Button::West) {
            choice = choice.prev();
            sink.request(Redraw::Tile(square));
        }
        if presses.contains(Button::North) || presses.contains(Button::South) {
            tracing::trace!(?presses, "cursor locked during promotion");
        }

        if presses.contains(Button::Center) {
            self.board = promotion::promote(&self.board, slot, choice);
            self.selection = Selection::Idle;
            sink.request(Redraw::Tile(square));
            sink.request(Redraw::Region(Region::Status));
            tracing::debug!(%square, kind = %choice.kind(), "pawn promoted");
            self.highlight = self.compute_highlight();
            self.refresh_status(sink);
            return;
        }

        self.selection = Selection::PendingPromotion { slot, choice };
        self.highlight = Highlight::Promotion;
    }

    fn refresh_status<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let status = assess(&self.board);
        if status != self.status {
            sink.request(Redraw::Region(Region::Status));
        }

        let turn = self.board.turn();
        match status {
            CheckStatus::Check => tracing::info!(%turn, "check"),
            CheckStatus::Checkmate => tracing::info!(winner = %turn.opponent(), "checkmate"),
            CheckStatus::Clear => {
                if promotion::pending_promotion(&self.board).is_none()
                    && !rules::has_legal_move(&self.board, turn)
                {
                    tracing::warn!(%turn, "no legal move but not in check; play continues");
                }
            }
        }
        self.status = status;
    }

    fn compute_highlight(&self) -> Highlight {
        match &self.selection {
            Selection::PendingPromotion { .. } => Highlight::Promotion,
            Selection::Selected { slot, destinations } => {
                if self.cursor == self.board.piece(*slot).square
                    || destinations.contains(&self.cursor)
                {
                    Highlight::Legal
                } else {
                    Highlight::Illegal
                }
            }
            Selection::Idle => match self.board.piece_at(self.cursor) {
                Some(piece) if piece.team == self.board.turn() => Highlight::OwnPiece,
                _ => Highlight::Empty,
            },
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// Check status of the side to move. Mate waits until a pending promotion
/// is resolved.
fn assess(board: &Board) -> CheckStatus {
    match rules::classify_position(board) {
        CheckStatus::Checkmate if promotion::pending_promotion(board).is_some() => {
            CheckStatus::Check
        }
        status => status,
    }
}

fn request_tiles<S: RenderSink + ?Sized>(sink: &mut S, squares: &[Square]) {
    for square in squares {
        sink.request(Redraw::Tile(*square));
    }
}
