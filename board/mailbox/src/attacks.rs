//! Which squares are attacked, worked out from raw piece geometry
//!
//! Nothing in here may call into legal move generation, since legal move generation asks these
//! functions whether a king would be left attacked.

use board::{Color, Offset, Piece, PieceKind, Square};

use crate::Board;

impl Board {
    /// Returns `true` if any piece of color `by` could capture on `square` right now, ignoring
    /// whether doing so would expose its own king.
    ///
    /// # Edge cases:
    /// * Pawns attack only diagonally forward; a square in front of a pawn isn't attacked by it.
    /// * A square holding one of `by`'s own pieces still counts as attacked if `by` covers it.
    /// * An invalid square is never attacked.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        if !square.is_valid() {
            return false;
        }
        // Look outward from the target for each kind of piece that could reach it. A pawn of
        // color `by` attacks us from one rank behind us, as seen from `by`'s direction of travel.
        let pawn = Piece::new(PieceKind::Pawn, by);
        let pawn_attack = [-1, 1]
            .into_iter()
            .any(|files| self.get(square.offset(files, -by.pawn_direction())) == Some(pawn));
        pawn_attack
            || self.attacked_by_leaper(square, Piece::new(PieceKind::Knight, by), &Offset::KNIGHT)
            || self.attacked_by_leaper(square, Piece::new(PieceKind::King, by), &Offset::KING)
            || self.attacked_along_rays(square, by, PieceKind::Rook, &Offset::ORTHOGONALS)
            || self.attacked_along_rays(square, by, PieceKind::Bishop, &Offset::DIAGONALS)
    }

    /// Whether `attacker` stands one of the given jumps away from `square`
    fn attacked_by_leaper(&self, square: Square, attacker: Piece, offsets: &[Offset]) -> bool {
        offsets
            .iter()
            .any(|&offset| self.get(square.step(offset)) == Some(attacker))
    }

    /// Whether the first piece along any of the given rays is `by`'s `slider` or queen
    fn attacked_along_rays(
        &self,
        square: Square,
        by: Color,
        slider: PieceKind,
        directions: &[Offset],
    ) -> bool {
        directions.iter().any(|&direction| {
            let mut current = square.step(direction);
            while current.is_valid() {
                if let Some(piece) = self.get(current) {
                    return piece.color == by
                        && (piece.kind == slider || piece.kind == PieceKind::Queen);
                }
                current = current.step(direction);
            }
            false
        })
    }

    /// Get the square on which the given player's king resides, if it has one
    ///
    /// If there's somehow more than one, this finds the first going from a1 to h8.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
    }

    /// Returns `true` if the given color's king is attacked
    ///
    /// A side without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_square_attacked(king, color.other()))
    }
}
