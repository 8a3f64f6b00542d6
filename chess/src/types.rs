//! Canonical piece, team and square types for the project.
//!
//! Board coordinates follow the device's screen layout: `file` 0 is the left
//! column, `rank` 0 is the top row. Black starts on ranks 0 and 1, White on
//! ranks 6 and 7, so White advances toward rank 0.

/// Piece kind, independent of team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    White,
    Black,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn to_char_lower(self) -> char {
        self.to_char_upper().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Letter for this kind in the given team's case (uppercase for White).
    pub fn to_char(self, team: Team) -> char {
        match team {
            Team::White => self.to_char_upper(),
            Team::Black => self.to_char_lower(),
        }
    }
}

impl Team {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a single pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Rank holding this team's king and rooks at game start.
    pub fn home_rank(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// Rank holding this team's pawns at game start.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Rank farthest from this team's starting side.
    pub fn promotion_rank(self) -> u8 {
        self.opponent().home_rank()
    }
}

/// A board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Top-left corner, file 0 on rank 0.
    pub const TOP_LEFT: Square = Square::from_index(0);

    /// Build a square, `None` when either coordinate is off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Square for a linear index in `0..64`, row-major from the top-left.
    pub(crate) const fn from_index(index: u8) -> Self {
        Self {
            file: index % 8,
            rank: (index / 8) % 8,
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    /// Every square, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Self::from_index)
    }

    /// The square `df` files and `dr` ranks away, if still on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = u8::try_from(self.file as i8 + df).ok()?;
        let rank = u8::try_from(self.rank as i8 + dr).ok()?;
        Self::new(file, rank)
    }

    /// Signed file and rank distance from `self` to `to`.
    pub fn delta(self, to: Square) -> (i8, i8) {
        (
            to.file as i8 - self.file as i8,
            to.rank as i8 - self.rank as i8,
        )
    }

    /// Parse algebraic notation such as `e2`. Rank `8` maps to rank 0.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Self::new(file as u8 - b'a', b'8' - rank as u8)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_round_trip_corners() {
        let a8 = Square::from_algebraic("a8").unwrap();
        assert_eq!((a8.file(), a8.rank()), (0, 0));
        let h1 = Square::from_algebraic("h1").unwrap();
        assert_eq!((h1.file(), h1.rank()), (7, 7));
        assert_eq!(h1.to_string(), "h1");
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a10"), None);
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(7, 7), Square::new(7, 7));
        assert_eq!(corner.offset(8, 0), None);
    }

    #[test]
    fn test_team_directions() {
        assert_eq!(Team::White.forward(), -1);
        assert_eq!(Team::Black.forward(), 1);
        assert_eq!(Team::White.promotion_rank(), 0);
        assert_eq!(Team::Black.promotion_rank(), 7);
        assert_eq!(Team::White.opponent(), Team::Black);
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(PieceKind::Knight.to_char(Team::White), 'N');
        assert_eq!(PieceKind::Knight.to_char(Team::Black), 'n');
        assert_eq!(PieceKind::from_char('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
