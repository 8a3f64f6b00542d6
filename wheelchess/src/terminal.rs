//! Text-mode stand-in for the bitmap display.
//!
//! Collects redraw requests and repaints the whole board when any arrived.
//! Each tile is three columns wide: the cursor is drawn as a bracket pair
//! whose shape encodes the highlight, hints as `:` pairs.

use std::io::Write;

use chess::{CheckStatus, PieceKind, Square, Team};

use crate::controller::Controller;
use crate::render::{Highlight, Redraw, RenderSink, TileView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyphs {
    #[default]
    Unicode,
    Ascii,
}

impl Glyphs {
    fn piece(self, team: Team, kind: PieceKind) -> char {
        match self {
            Self::Ascii => kind.to_char(team),
            Self::Unicode => match (team, kind) {
                (Team::White, PieceKind::King) => '♔',
                (Team::White, PieceKind::Queen) => '♕',
                (Team::White, PieceKind::Rook) => '♖',
                (Team::White, PieceKind::Bishop) => '♗',
                (Team::White, PieceKind::Knight) => '♘',
                (Team::White, PieceKind::Pawn) => '♙',
                (Team::Black, PieceKind::King) => '♚',
                (Team::Black, PieceKind::Queen) => '♛',
                (Team::Black, PieceKind::Rook) => '♜',
                (Team::Black, PieceKind::Bishop) => '♝',
                (Team::Black, PieceKind::Knight) => '♞',
                (Team::Black, PieceKind::Pawn) => '♟',
            },
        }
    }

    fn empty(self) -> char {
        match self {
            Self::Ascii => '.',
            Self::Unicode => '·',
        }
    }
}

fn brackets(highlight: Highlight) -> (char, char) {
    match highlight {
        Highlight::OwnPiece => ('[', ']'),
        Highlight::Empty => ('(', ')'),
        Highlight::Legal => ('{', '}'),
        Highlight::Illegal => ('!', '!'),
        Highlight::Promotion => ('<', '>'),
    }
}

/// Sink that marks the screen dirty and repaints on [`TerminalSink::flush`].
#[derive(Debug, Default)]
pub struct TerminalSink {
    glyphs: Glyphs,
    dirty: bool,
    frames: usize,
}

impl TerminalSink {
    pub fn new(glyphs: Glyphs) -> Self {
        Self {
            glyphs,
            dirty: false,
            frames: 0,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Write a frame if anything changed since the last one.
    pub fn flush(&mut self, controller: &Controller, out: &mut impl Write) -> std::io::Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        out.write_all(self.frame(controller).as_bytes())?;
        out.flush()?;
        self.dirty = false;
        self.frames += 1;
        Ok(true)
    }

    /// Full board plus status line.
    pub fn frame(&self, controller: &Controller) -> String {
        let mut out = String::from("   a  b  c  d  e  f  g  h\n");
        for rank in 0..8u8 {
            out.push_str(&format!("{} ", 8 - rank));
            for square in (0..8u8).filter_map(|file| Square::new(file, rank)) {
                self.push_tile(&mut out, &controller.tile(square));
            }
            out.push('\n');
        }
        out.push_str(&status_line(controller));
        out.push('\n');
        out
    }

    fn push_tile(&self, out: &mut String, tile: &TileView) {
        let center = tile
            .piece
            .map_or(self.glyphs.empty(), |(team, kind)| self.glyphs.piece(team, kind));
        let (left, right) = match tile.cursor {
            Some(highlight) => brackets(highlight),
            None if tile.hint => (':', ':'),
            None => (' ', ' '),
        };
        out.push(left);
        out.push(center);
        out.push(right);
    }
}

impl RenderSink for TerminalSink {
    fn request(&mut self, redraw: Redraw) {
        tracing::trace!(?redraw, "redraw requested");
        self.dirty = true;
    }
}

/// Turn, check state or promotion prompt.
pub fn status_line(controller: &Controller) -> String {
    let turn = controller.board().turn();
    if let Some(choice) = controller.promotion_choice() {
        return format!("Promote to {choice:?}? east/west to change, center to confirm");
    }
    match controller.status() {
        CheckStatus::Checkmate => format!("Checkmate, {} wins", turn.opponent()),
        CheckStatus::Check => format!("{turn} to move, check"),
        CheckStatus::Clear => format!("{turn} to move"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, Presses};

    #[test]
    fn test_flush_only_when_dirty() {
        let controller = Controller::new();
        let mut sink = TerminalSink::new(Glyphs::Ascii);
        let mut out = Vec::new();

        assert!(!sink.flush(&controller, &mut out).unwrap());
        assert!(out.is_empty());

        controller.start(&mut sink);
        assert!(sink.is_dirty());
        assert!(sink.flush(&controller, &mut out).unwrap());
        assert!(!sink.is_dirty());
        assert_eq!(sink.frames(), 1);
    }

    #[test]
    fn test_ascii_frame_layout() {
        let controller = Controller::new();
        let sink = TerminalSink::new(Glyphs::Ascii);
        let frame = sink.frame(&controller);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 (r) n  b  q  k  b  n  r ");
        assert_eq!(lines[5], "4  .  .  .  .  .  .  .  . ");
        assert_eq!(lines[8], "1  R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[9], "white to move");
    }

    #[test]
    fn test_hints_and_lifted_piece() {
        let mut controller = Controller::new();
        let mut sink = TerminalSink::new(Glyphs::Ascii);
        // b8 -> b1, lift the knight.
        controller.tick(Presses::single(Button::East), &mut sink);
        for _ in 0..7 {
            controller.tick(Presses::single(Button::South), &mut sink);
        }
        controller.tick(Presses::single(Button::Center), &mut sink);

        let frame = sink.frame(&controller);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[6], "3 :.: . :.: .  .  .  .  . ");
        assert_eq!(lines[8], "1  R {N} B  Q  K  B  N  R ");
    }

    #[test]
    fn test_unicode_glyphs() {
        assert_eq!(Glyphs::Unicode.piece(Team::White, PieceKind::King), '♔');
        assert_eq!(Glyphs::Unicode.piece(Team::Black, PieceKind::Pawn), '♟');
        assert_eq!(Glyphs::Ascii.piece(Team::Black, PieceKind::Queen), 'q');
    }
}
