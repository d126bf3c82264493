//! Value types shared by chess board implementations
//!
//! Nothing in here knows the rules of chess beyond how pieces and squares are named. The rules
//! engine lives in the `mailbox` crate and consumes these types.

use core::fmt;

mod castling;
mod piece;
mod ply;
mod square;

pub use crate::castling::{CastleRights, CastleSide};
pub use crate::piece::{Occupant, Piece};
pub use crate::ply::{Ply, PlyParseError};
pub use crate::square::{Offset, Square, SquareParseError};

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// The kinds a pawn may promote into, in the order moves are generated
    pub const PROMOTIONS: [PieceKind; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// The capitalized version of the letter used for this piece in FEN
    pub const fn fen_letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Parse a FEN letter in either case, ignoring which color it would indicate
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(Self::Pawn),
            'N' => Some(Self::Knight),
            'B' => Some(Self::Bishop),
            'R' => Some(Self::Rook),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            _ => None,
        }
    }

    /// Whether a pawn can promote into this kind of piece
    pub const fn is_promotable(self) -> bool {
        match self {
            PieceKind::Pawn | PieceKind::King => false,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => true,
        }
    }

    /// The English name, as read out by accessible renderings
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}
impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn is_black(self) -> bool {
        match self {
            Color::White => false,
            Color::Black => true,
        }
    }

    pub const fn is_white(self) -> bool {
        match self {
            Color::White => true,
            Color::Black => false,
        }
    }

    /// The rank (zero-indexed) on which this side's king and rooks start
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The rank (zero-indexed) on which this side's pawns start
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The rank (zero-indexed) on which this side's pawns promote
    pub const fn promotion_rank(self) -> u8 {
        self.other().home_rank()
    }

    /// Which way this side's pawns walk, in ranks
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The English name, as read out by accessible renderings
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    /// The side-to-move letter used in FEN
    pub const fn fen_letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the game stands for the side to move
///
/// None of these halt play: a board keeps accepting moves past a terminal status, and it's up to
/// the caller to stop asking for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has legal moves and isn't in check
    InProgress,
    /// The side to move is in check, but can get out of it
    Check,
    /// The side to move is in check with no legal moves
    Checkmate { winner: Color },
    /// The side to move isn't in check, but has no legal moves
    Stalemate,
}
impl GameStatus {
    /// Whether no further moves can be made from this position
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Stalemate)
    }
}
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("In progress"),
            Self::Check => f.write_str("Check"),
            Self::Checkmate { winner } => write!(f, "Checkmate, {winner} wins"),
            Self::Stalemate => f.write_str("Stalemate"),
        }
    }
}
