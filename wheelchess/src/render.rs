//! Redraw requests between the controller and whatever paints the screen.
//!
//! The controller never draws. It names the tiles and regions whose content
//! changed, and a [`RenderSink`] decides when and how to repaint them using
//! [`Controller::tile`](crate::controller::Controller::tile).

use chess::{PieceKind, Square, Team};

/// Non-tile screen areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Every tile at once, used for the first frame.
    Board,
    /// Turn, check and promotion banner.
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redraw {
    Tile(Square),
    Region(Region),
}

pub trait RenderSink {
    fn request(&mut self, redraw: Redraw);
}

/// Sink that records requests, deduplicated, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    requests: Vec<Redraw>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[Redraw] {
        &self.requests
    }

    pub fn contains_tile(&self, square: Square) -> bool {
        self.requests.contains(&Redraw::Tile(square))
    }

    pub fn contains_region(&self, region: Region) -> bool {
        self.requests.contains(&Redraw::Region(region))
    }

    /// Drain the recorded requests.
    pub fn take(&mut self) -> Vec<Redraw> {
        std::mem::take(&mut self.requests)
    }
}

impl RenderSink for RecordingSink {
    fn request(&mut self, redraw: Redraw) {
        if !self.requests.contains(&redraw) {
            self.requests.push(redraw);
        }
    }
}

/// Cursor color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Nothing lifted, cursor over a piece of the side to move.
    OwnPiece,
    /// Nothing lifted, cursor over anything else.
    Empty,
    /// Piece lifted, cursor over a legal destination or the origin.
    Legal,
    /// Piece lifted, cursor over a square it cannot reach.
    Illegal,
    /// Waiting for a promotion choice.
    Promotion,
}

/// Everything needed to paint one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView {
    pub square: Square,
    pub piece: Option<(Team, PieceKind)>,
    /// Cursor color when the cursor sits on this tile.
    pub cursor: Option<Highlight>,
    /// Legal destination of the lifted piece.
    pub hint: bool,
    /// The piece drawn here is the lifted one, floating over the cursor.
    pub lifted: bool,
}
