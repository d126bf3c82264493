//! A chess rules engine on an 8x8 mailbox
//!
//! [`Board`] owns a position and answers every rules question about it: which moves are legal,
//! what a move does, whether someone is in check, checkmated or stalemated. Callers drive it with
//! [`Board::legal_moves`]/[`Board::make_move`] and should never try to work out legality
//! themselves.

use core::fmt;

use board::{CastleRights, CastleSide, Color, GameStatus, Piece, PieceKind, Ply, Square};
use tracing::{debug, trace};

mod attacks;
mod movegen;
mod perft;
mod render;

pub type Result<T, E = MoveError> = core::result::Result<T, E>;

/// Why a move was refused
///
/// The board is untouched whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MoveError {
    #[error("move {0} names a square that isn't on the board")]
    InvalidSquare(Ply),
    #[error("no piece on {0} to move")]
    NoPieceAtSource(Square),
    #[error("the piece on {square} belongs to {owner}, but it's {to_move}'s turn")]
    NotSideToMove {
        square: Square,
        owner: Color,
        to_move: Color,
    },
    #[error("move {0} is not legal in this position")]
    Illegal(Ply),
}

/// The layout of the back rank at the start of a game, from the a-file to the h-file
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess position and the rules for changing it
///
/// Boards are plain values: cloning one gives a fully independent copy, and that's how moves are
/// tried out without disturbing the original.
///
/// A board made any way other than [`Board::setup_starting_position`] isn't checked for sanity.
/// In particular, a side without a king is never considered to be in check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    /// Piece placement, indexed by `[rank][file]`
    squares: [[Option<Piece>; 8]; 8],

    // flags
    side_to_move: Color,
    /// What castles are allowed, given the history of moves
    ///
    /// These castles aren't necessarily legal right now, as they may be blocked by intervening
    /// pieces and/or checks.
    castles: CastleRights,
    /// The square skipped by a pawn's double step on the previous ply, if there was one
    en_passant_target: Option<Square>,

    // clocks
    /// Number of half-moves since a pawn was moved or a piece was captured
    halfmove_clock: u16,
    /// The number of the current full move, counting from 1 and bumped after black moves
    fullmove_number: u16,
}

impl Board {
    /// A board with no pieces on it and no moves made
    pub const EMPTY: Self = Self {
        squares: [[None; 8]; 8],
        side_to_move: Color::White,
        castles: CastleRights::empty(),
        en_passant_target: None,
        halfmove_clock: 0,
        fullmove_number: 1,
    };

    /// An empty board, same as [`Self::EMPTY`]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// The state at the start of a chess game
    pub fn starting_position() -> Self {
        let mut board = Self::EMPTY;
        board.setup_starting_position();
        board
    }

    /// Reset to the standard starting position with every castling right available
    pub fn setup_starting_position(&mut self) {
        *self = Self::EMPTY;
        for color in [Color::White, Color::Black] {
            for (file, kind) in (0..8).zip(BACK_RANK) {
                self.set(
                    Square::new(file, color.home_rank()),
                    Some(Piece::new(kind, color)),
                );
                self.set(
                    Square::new(file, color.pawn_rank()),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        self.castles = CastleRights::all();
    }

    /// Remove every piece and reset to [`Self::EMPTY`], including taking away castling rights
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Find the piece, if any, at the given square
    ///
    /// Returns `None` for an empty square and for an invalid square.
    pub const fn get(&self, square: Square) -> Option<Piece> {
        match square.to_file_rank() {
            Some((file, rank)) => self.squares[rank as usize][file as usize],
            None => None,
        }
    }

    /// Put a piece on (or with `None`, clear) the given square
    ///
    /// Does nothing if the square is invalid. This is for setting up positions: it doesn't touch
    /// castling rights, the en passant target, or the clocks.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if let Some((file, rank)) = square.to_file_rank() {
            self.squares[rank as usize][file as usize] = piece;
        }
    }

    /// Whether there's no piece on the given square (or the square is invalid)
    pub const fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Every occupied square and what's on it, from a1 along each rank up to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all_squares().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hand the move to the other side
    ///
    /// [`Self::make_move`] already does this; it's only needed when setting up a position.
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.other();
    }

    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// The square a pawn may capture onto en passant this ply, if any
    pub const fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub const fn castling_rights(&self) -> CastleRights {
        self.castles
    }

    /// Whether the given side still has the right to castle the given way
    ///
    /// Having the right doesn't mean castling is legal right now.
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castles.contains(CastleRights::of(color, side))
    }

    /// Permanently take away one castling right. Removing a right that's already gone is fine.
    pub fn remove_castling_right(&mut self, color: Color, side: CastleSide) {
        self.castles.remove(CastleRights::of(color, side));
    }

    /// Check that the side to move may make this move right now
    fn check_move(&self, ply: Ply) -> Result<()> {
        if !ply.from.is_valid() || !ply.to.is_valid() {
            return Err(MoveError::InvalidSquare(ply));
        }
        let Some(piece) = self.get(ply.from) else {
            return Err(MoveError::NoPieceAtSource(ply.from));
        };
        if piece.color != self.side_to_move {
            return Err(MoveError::NotSideToMove {
                square: ply.from,
                owner: piece.color,
                to_move: self.side_to_move,
            });
        }
        if !self.legal_moves(ply.from).contains(&ply) {
            return Err(MoveError::Illegal(ply));
        }
        Ok(())
    }

    /// Whether the side to move may make this move right now
    pub fn is_valid_move(&self, ply: Ply) -> bool {
        self.check_move(ply).is_ok()
    }

    /// If the given move is legal, then do it.
    ///
    /// Otherwise, this method returns `Err(..)` with why the move is illegal, and leaves the board
    /// exactly as it was.
    pub fn make_move(&mut self, ply: Ply) -> Result<()> {
        if let Err(error) = self.check_move(ply) {
            debug!(%ply, %error, "rejected move");
            return Err(error);
        }
        self.apply(ply);
        trace!(%ply, fen = %self.to_fen(), "made move");
        Ok(())
    }

    /// Do the move without checking if it's legal
    ///
    /// The move must at least be pseudo-legal for the piece on `ply.from`. Moving from an empty
    /// square does nothing.
    fn apply(&mut self, ply: Ply) {
        let Some(piece) = self.get(ply.from) else {
            return;
        };
        let mut is_capture = self.get(ply.to).is_some();
        match piece.kind {
            PieceKind::Pawn
                if !is_capture
                    && ply.from.file() != ply.to.file()
                    && self.en_passant_target == Some(ply.to) =>
            {
                // The captured pawn sits beside us, not on the square we're landing on
                self.set(Square::new(ply.to.file(), ply.from.rank()), None);
                is_capture = true;
            }
            PieceKind::King if ply.from.file().abs_diff(ply.to.file()) == 2 => {
                let side = if ply.to.file() > ply.from.file() {
                    CastleSide::Kingside
                } else {
                    CastleSide::Queenside
                };
                let rook_home = side.rook_home(piece.color);
                let rook = self.get(rook_home);
                self.set(rook_home, None);
                self.set(side.rook_target(piece.color), rook);
            }
            _ => {}
        }
        let arriving = match ply.promotion {
            Some(kind) if piece.kind == PieceKind::Pawn && kind.is_promotable() => {
                Piece::new(kind, piece.color)
            }
            _ => piece,
        };
        self.set(ply.from, None);
        self.set(ply.to, Some(arriving));

        self.castles = self.castles.after_move(piece, ply.from, ply.to);
        self.en_passant_target = if piece.kind == PieceKind::Pawn
            && ply.from.rank().abs_diff(ply.to.rank()) == 2
        {
            Some(Square::new(
                ply.from.file(),
                (ply.from.rank() + ply.to.rank()) / 2,
            ))
        } else {
            None
        };
        if is_capture || piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if piece.color.is_black() {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.switch_turn();
    }

    /// Whether the given side is checkmated: in check with no legal moves
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Whether the given side is stalemated: not in check, but with no legal moves
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Where the game stands for the side to move
    pub fn status(&self) -> GameStatus {
        let color = self.side_to_move;
        match (self.is_in_check(color), self.has_legal_move(color)) {
            (false, true) => GameStatus::InProgress,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate {
                winner: color.other(),
            },
            (false, false) => GameStatus::Stalemate,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Display as the ASCII grid from [`Board::to_ascii`]
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::quickcheck;

    /// Boards get copied for every move tried, so make sure they stay small
    #[test]
    fn test_board_size() {
        assert!(core::mem::size_of::<Board>() <= 160);
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling_rights(), CastleRights::all());
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(
            board.get(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(Square::D8),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.get(Square::G7),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn test_clear() {
        let mut board = Board::starting_position();
        board.clear();
        assert_eq!(board, Board::EMPTY);
        assert_eq!(board.pieces().count(), 0);
        assert!(!board.can_castle(Color::White, CastleSide::Kingside));
    }

    quickcheck! {
        fn test_set_then_get(file: u8, rank: u8, piece_idx: u8) -> bool {
            let square = Square::new(file % 10, rank % 10);
            let piece = Piece::all_pieces().nth(piece_idx as usize % 13);
            let mut board = Board::new();
            board.set(square, piece);
            if square.is_valid() {
                board.get(square) == piece
            } else {
                board == Board::EMPTY && board.get(square).is_none()
            }
        }
    }

    #[test]
    fn test_invalid_square_is_inert() {
        let mut board = Board::starting_position();
        let before = board.clone();
        board.set(
            Square::INVALID,
            Some(Piece::new(PieceKind::Queen, Color::White)),
        );
        assert_eq!(board, before);
        assert_eq!(board.get(Square::INVALID), None);
        assert!(board.is_empty(Square::INVALID));
        assert!(board.legal_moves(Square::INVALID).is_empty());
        assert!(!board.is_square_attacked(Square::INVALID, Color::Black));
    }

    #[test]
    fn test_remove_castling_right_is_idempotent() {
        let mut board = Board::starting_position();
        board.remove_castling_right(Color::Black, CastleSide::Queenside);
        board.remove_castling_right(Color::Black, CastleSide::Queenside);
        assert!(!board.can_castle(Color::Black, CastleSide::Queenside));
        assert!(board.can_castle(Color::Black, CastleSide::Kingside));
        assert!(board.can_castle(Color::White, CastleSide::Queenside));
    }

    #[test]
    fn test_rejected_move_leaves_board_alone() {
        let mut board = Board::starting_position();
        let before = board.clone();
        assert_eq!(
            board.make_move(Ply::new(Square::E2, Square::E5)),
            Err(MoveError::Illegal(Ply::new(Square::E2, Square::E5)))
        );
        assert_eq!(
            board.make_move(Ply::new(Square::E4, Square::E5)),
            Err(MoveError::NoPieceAtSource(Square::E4))
        );
        assert!(matches!(
            board.make_move(Ply::new(Square::E7, Square::E5)),
            Err(MoveError::NotSideToMove { .. })
        ));
        assert_eq!(
            board.make_move(Ply::new(Square::E2, Square::INVALID)),
            Err(MoveError::InvalidSquare(Ply::new(Square::E2, Square::INVALID)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_copies_are_independent() {
        let original = Board::starting_position();
        let mut copy = original.clone();
        copy.make_move(Ply::new(Square::E2, Square::E4))
            .expect("Opening move is legal");
        assert_eq!(original, Board::starting_position());
        assert_ne!(original, copy);
    }

    #[test]
    fn test_status_at_start() {
        assert_eq!(Board::starting_position().status(), GameStatus::InProgress);
    }
}
