use core::{fmt, str::FromStr};

use crate::{PieceKind, Square, SquareParseError};

/// A candidate half-move: where a piece starts, where it ends, and what it promotes into
///
/// Castling is written as the king's two-square move and en passant as the capturing pawn's
/// diagonal step; a board works out the rest. Nothing about a `Ply` says it's legal, only a board
/// can answer that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ply {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}
impl Ply {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }
}
/// Long algebraic notation, like `e2e4` or `e7e8q`
impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Why a string couldn't be read as a ply
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlyParseError {
    #[error("move must look like \"e2e4\" or \"e7e8q\", got {0:?}")]
    Format(String),
    #[error(transparent)]
    Square(#[from] SquareParseError),
    #[error("can't promote into {0:?}, expected one of q, r, b, n")]
    Promotion(char),
}

impl FromStr for Ply {
    type Err = PlyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(PlyParseError::Format(s.to_string()));
        }
        let from = s[0..2].parse()?;
        let to = s[2..4].parse()?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(letter) => match PieceKind::from_letter(letter) {
                Some(kind) if kind.is_promotable() => Some(kind),
                _ => return Err(PlyParseError::Promotion(letter)),
            },
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}
