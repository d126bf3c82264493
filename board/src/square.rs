use core::{fmt, str::FromStr};

/// Declare the named constants for one rank's worth of squares
macro_rules! rank_of_squares {
    (@file $rank:literal, $file:expr,) => {};
    (@file $rank:literal, $file:expr, $name:ident, $($rest:ident,)*) => {
        pub const $name: Self = Self::new($file, $rank);
        rank_of_squares!(@file $rank, $file + 1, $($rest,)*);
    };
    ($rank:literal: $($name:ident),* $(,)?) => {
        rank_of_squares!(@file $rank, 0u8, $($name,)*);
    };
}

/// A square on the board, or a deliberately invalid square
///
/// Stored in 0x88 form:
/// ```text
/// 0b12345678
///    +-+ Rank
///        +-+ File
///   +   + Must be zero, invalid square if either is set
/// ```
///
/// One byte per square, and an offset that walks off the board always lands on a byte with one of
/// the guard bits set, so "did I fall off?" is a single mask test.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// An invalid square
    ///
    /// Any square for which [`Self::is_valid`] is false behaves like this one: reading it from a
    /// board yields nothing and writing to it does nothing.
    pub const INVALID: Self = Self(0x88);

    rank_of_squares!(0: A1, B1, C1, D1, E1, F1, G1, H1);
    rank_of_squares!(1: A2, B2, C2, D2, E2, F2, G2, H2);
    rank_of_squares!(2: A3, B3, C3, D3, E3, F3, G3, H3);
    rank_of_squares!(3: A4, B4, C4, D4, E4, F4, G4, H4);
    rank_of_squares!(4: A5, B5, C5, D5, E5, F5, G5, H5);
    rank_of_squares!(5: A6, B6, C6, D6, E6, F6, G6, H6);
    rank_of_squares!(6: A7, B7, C7, D7, E7, F7, G7, H7);
    rank_of_squares!(7: A8, B8, C8, D8, E8, F8, G8, H8);

    /// Produce a square from a zero-indexed file and rank, or [`Self::INVALID`] if either is off
    /// the board.
    pub const fn new(file: u8, rank: u8) -> Self {
        if file < 8 && rank < 8 {
            Self(rank << 4 | file)
        } else {
            Self::INVALID
        }
    }

    /// Returns if this square is on the board
    ///
    /// ```
    /// # use board::Square;
    /// assert!(Square::E4.is_valid());
    /// assert!(!Square::INVALID.is_valid());
    /// ```
    pub const fn is_valid(self) -> bool {
        self.0 & 0x88 == 0
    }

    /// Returns the `(file, rank)` tuple if this square is valid
    pub const fn to_file_rank(self) -> Option<(u8, u8)> {
        if self.is_valid() {
            Some((self.0 & 0x07, self.0 >> 4))
        } else {
            None
        }
    }

    /// The zero-indexed file (`a` is 0). Meaningless for an invalid square.
    pub const fn file(self) -> u8 {
        self.0 & 0x07
    }

    /// The zero-indexed rank (`1` is 0). Meaningless for an invalid square.
    pub const fn rank(self) -> u8 {
        (self.0 >> 4) & 0x07
    }

    /// Step the given number of files and ranks.
    ///
    /// Positive files move from a towards h, positive ranks from 1 towards 8. Stepping off the
    /// board, or stepping from an invalid square, gives [`Self::INVALID`].
    ///
    /// ```rust
    /// use board::Square;
    /// assert_eq!(Square::D2, Square::A1.offset(3, 1));
    /// assert_eq!(Square::A1, Square::D2.offset(-3, -1));
    /// assert!(!Square::D1.offset(0, -1).is_valid());
    /// assert!(!Square::H4.offset(1, 0).is_valid());
    /// ```
    pub const fn offset(self, files: i8, ranks: i8) -> Self {
        let Some((file, rank)) = self.to_file_rank() else {
            return Self::INVALID;
        };
        let file = file as i8 + files;
        let rank = rank as i8 + ranks;
        if file < 0 || rank < 0 {
            return Self::INVALID;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Step by the given offset
    pub const fn step(self, offset: Offset) -> Self {
        self.offset(offset.files, offset.ranks)
    }

    /// An iterator over all valid squares, from a1 along each rank up to h8
    ///
    /// ```
    /// assert_eq!(board::Square::all_squares().count(), 64);
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Self::new(file, rank)))
    }
}
impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Square")
            .field(&format_args!("{:#04X} {self}", self.0))
            .finish()
    }
}
/// Algebraic notation, or `XX` for an invalid square
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_file_rank() {
            Some((file, rank)) => write!(f, "{}{}", (b'a' + file) as char, rank + 1),
            None => f.write_str("XX"),
        }
    }
}

/// Why a string couldn't be read as a square
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SquareParseError {
    #[error("square must be two characters like \"e4\", got {input:?}")]
    Format { input: String },
    #[error("square {input:?} is off the board, files are a-h and ranks are 1-8")]
    Range { input: String },
}

impl FromStr for Square {
    type Err = SquareParseError;

    /// Parse algebraic notation, accepting the file letter in either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::Format {
                input: s.to_string(),
            });
        };
        match (file.to_ascii_lowercase(), rank) {
            (file @ 'a'..='h', rank @ '1'..='8') => {
                Ok(Self::new(file as u8 - b'a', rank as u8 - b'1'))
            }
            _ => Err(SquareParseError::Range {
                input: s.to_string(),
            }),
        }
    }
}

/// A step across the board, in files and ranks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offset {
    pub files: i8,
    pub ranks: i8,
}
impl Offset {
    /// The offsets corresponding to all possible knight moves
    pub const KNIGHT: [Offset; 8] = [
        Self::new(1, 2),
        Self::new(-1, 2),
        Self::new(1, -2),
        Self::new(-1, -2),
        Self::new(2, 1),
        Self::new(-2, 1),
        Self::new(2, -1),
        Self::new(-2, -1),
    ];

    /// The offsets corresponding to all possible (non-castling) king moves
    pub const KING: [Offset; 8] = [
        Self::new(1, 1),
        Self::new(0, 1),
        Self::new(-1, 1),
        Self::new(1, 0),
        Self::new(-1, 0),
        Self::new(1, -1),
        Self::new(0, -1),
        Self::new(-1, -1),
    ];

    /// The ray directions of a rook
    pub const ORTHOGONALS: [Offset; 4] = [
        Self::new(0, 1),
        Self::new(0, -1),
        Self::new(1, 0),
        Self::new(-1, 0),
    ];

    /// The ray directions of a bishop
    pub const DIAGONALS: [Offset; 4] = [
        Self::new(1, 1),
        Self::new(-1, 1),
        Self::new(1, -1),
        Self::new(-1, -1),
    ];

    pub const fn new(files: i8, ranks: i8) -> Self {
        Self { files, ranks }
    }
}
