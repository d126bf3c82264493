//! Castling rights, and how moves take them away

use crate::{Color, Piece, PieceKind, Square};

/// Which way a king castles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}
impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [Self::Kingside, Self::Queenside];

    /// The file of the rook that castles on this side
    pub const fn rook_file(self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    /// Which way the king walks along the rank, in files
    pub const fn direction(self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    /// The king's starting square for the given side
    pub const fn king_home(color: Color) -> Square {
        Square::new(4, color.home_rank())
    }

    /// The starting square of the rook that castles on this side
    pub const fn rook_home(self, color: Color) -> Square {
        Square::new(self.rook_file(), color.home_rank())
    }

    /// Where the king lands after castling this way
    pub const fn king_target(self, color: Color) -> Square {
        Self::king_home(color).offset(2 * self.direction(), 0)
    }

    /// Where the rook lands after castling this way
    pub const fn rook_target(self, color: Color) -> Square {
        Self::king_home(color).offset(self.direction(), 0)
    }
}

bitflags::bitflags! {
    /// Which castles are still allowed (the king and rook haven't moved yet)
    ///
    /// These castles aren't necessarily legal right now, as they may be blocked by intervening
    /// pieces or attacked squares.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights: u8 {
        const WhiteKingside = 0b0000_0001;
        const WhiteQueenside = 0b0000_0010;
        /// A mask for whether white can castle in either direction
        const White = 0b0000_0011;
        const BlackKingside = 0b0000_0100;
        const BlackQueenside = 0b0000_1000;
        /// A mask for whether black can castle in either direction
        const Black = 0b0000_1100;
    }
}

impl CastleRights {
    /// The single right for the given side castling the given way
    pub const fn of(color: Color, side: CastleSide) -> Self {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WhiteKingside,
            (Color::White, CastleSide::Queenside) => Self::WhiteQueenside,
            (Color::Black, CastleSide::Kingside) => Self::BlackKingside,
            (Color::Black, CastleSide::Queenside) => Self::BlackQueenside,
        }
    }

    /// Both rights belonging to the given side
    pub const fn of_color(color: Color) -> Self {
        match color {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }

    /// The right that's lost when something leaves or lands on this square, if it's a rook's home
    const fn tied_to_rook_home(square: Square) -> Self {
        match square {
            Square::H1 => Self::WhiteKingside,
            Square::A1 => Self::WhiteQueenside,
            Square::H8 => Self::BlackKingside,
            Square::A8 => Self::BlackQueenside,
            _ => Self::empty(),
        }
    }

    /// The rights left after `piece` moves from `source` to `target`
    ///
    /// A king moving loses both of its side's rights. Anything leaving a rook's home square (the
    /// rook itself, the only thing that could be there while the right is held) or landing on one
    /// (capturing that rook) loses the matching right.
    pub const fn after_move(self, piece: Piece, source: Square, target: Square) -> Self {
        let rights = match piece.kind {
            PieceKind::King => self.difference(Self::of_color(piece.color)),
            _ => self,
        };
        rights
            .difference(Self::tied_to_rook_home(source))
            .difference(Self::tied_to_rook_home(target))
    }

    /// Display the castling rights in FEN format
    pub fn to_fen(self) -> String {
        let mut options = String::with_capacity(4);
        for (right, letter) in [
            (Self::WhiteKingside, 'K'),
            (Self::WhiteQueenside, 'Q'),
            (Self::BlackKingside, 'k'),
            (Self::BlackQueenside, 'q'),
        ] {
            if self.contains(right) {
                options.push(letter);
            }
        }
        if options.is_empty() {
            options.push('-');
        }
        options
    }
}
