use core::fmt;

use crate::{Color, PieceKind};

/// A piece
///
/// An empty square is `None` wherever an `Option<Piece>` is used; see [`Occupant`] for rendering
/// either case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// The FEN letter: uppercase for white, lowercase for black
    pub const fn fen_letter(self) -> char {
        match self.color {
            Color::White => self.kind.fen_letter(),
            Color::Black => self.kind.fen_letter().to_ascii_lowercase(),
        }
    }

    /// Returns an iterator of all pieces that exist
    pub fn all_pieces() -> impl Iterator<Item = Self> {
        [Color::White, Color::Black]
            .into_iter()
            .flat_map(|color| PieceKind::KINDS.map(|kind| Self::new(kind, color)))
    }
}
/// The full name, like `White Pawn`
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// The contents of a square, which may be empty
pub trait Occupant: Copy {
    /// The single character for this square in a text grid, `'.'` if empty
    fn glyph(self) -> char;

    /// The full name of the occupant for screen readers, `"Empty"` if empty
    fn describe(self) -> String;
}
impl Occupant for Option<Piece> {
    fn glyph(self) -> char {
        self.map_or('.', Piece::fen_letter)
    }

    fn describe(self) -> String {
        self.map_or_else(|| "Empty".to_string(), |piece| piece.to_string())
    }
}
