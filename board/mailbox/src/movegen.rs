//! Move generation
//!
//! Moves are first generated pseudo-legally (following how each piece moves and what's in the
//! way), then filtered by playing each one on a copy of the board and seeing whether the mover's
//! king is left attacked.

use board::{CastleSide, Color, Offset, Piece, PieceKind, Ply, Square};

use crate::Board;

impl Board {
    /// All moves the piece on `from` could make by its movement rules, including ones which would
    /// leave its own king in check.
    ///
    /// Returns nothing for an empty or invalid square. The side to move isn't consulted, so this
    /// works for either side's pieces.
    pub fn pseudo_legal_moves(&self, from: Square) -> Vec<Ply> {
        let mut moves = Vec::new();
        let Some(piece) = self.get(from) else {
            return moves;
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.color, &mut moves),
            PieceKind::Knight => self.leaper_moves(from, piece.color, &Offset::KNIGHT, &mut moves),
            PieceKind::Bishop => {
                self.sliding_moves(from, piece.color, &Offset::DIAGONALS, &mut moves)
            }
            PieceKind::Rook => {
                self.sliding_moves(from, piece.color, &Offset::ORTHOGONALS, &mut moves)
            }
            PieceKind::Queen => {
                self.sliding_moves(from, piece.color, &Offset::ORTHOGONALS, &mut moves);
                self.sliding_moves(from, piece.color, &Offset::DIAGONALS, &mut moves);
            }
            PieceKind::King => {
                self.leaper_moves(from, piece.color, &Offset::KING, &mut moves);
                self.castling_moves(from, piece.color, &mut moves);
            }
        }
        moves
    }

    /// Whether `color` could move onto `square`: it's on the board and not held by a friend
    fn can_land_on(&self, square: Square, color: Color) -> bool {
        square.is_valid() && self.get(square).map_or(true, |piece| piece.color != color)
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Ply>) {
        let forward = color.pawn_direction();
        let single = from.offset(0, forward);
        if single.is_valid() && self.is_empty(single) {
            push_pawn_move(from, single, color, moves);
            let double = single.offset(0, forward);
            if from.rank() == color.pawn_rank() && self.is_empty(double) {
                moves.push(Ply::new(from, double));
            }
        }
        for files in [-1, 1] {
            let target = from.offset(files, forward);
            if !target.is_valid() {
                continue;
            }
            match self.get(target) {
                Some(piece) if piece.color != color => push_pawn_move(from, target, color, moves),
                Some(_) => {}
                None => {
                    // The pawn we'd take en passant must be beside us, on the target's file
                    let victim = Square::new(target.file(), from.rank());
                    if self.en_passant_target == Some(target)
                        && self.get(victim) == Some(Piece::new(PieceKind::Pawn, color.other()))
                    {
                        moves.push(Ply::new(from, target));
                    }
                }
            }
        }
    }

    fn leaper_moves(&self, from: Square, color: Color, offsets: &[Offset], moves: &mut Vec<Ply>) {
        moves.extend(
            offsets
                .iter()
                .map(|&offset| from.step(offset))
                .filter(|&target| self.can_land_on(target, color))
                .map(|target| Ply::new(from, target)),
        );
    }

    fn sliding_moves(&self, from: Square, color: Color, directions: &[Offset], moves: &mut Vec<Ply>) {
        for &direction in directions {
            let mut target = from.step(direction);
            while target.is_valid() {
                match self.get(target) {
                    None => moves.push(Ply::new(from, target)),
                    Some(piece) => {
                        if piece.color != color {
                            moves.push(Ply::new(from, target));
                        }
                        break;
                    }
                }
                target = target.step(direction);
            }
        }
    }

    /// Castles for the king on `from`
    ///
    /// Requires the right to still be held, the king and rook on their home squares, nothing
    /// between them, and the king neither in check nor passing over or landing on an attacked
    /// square.
    fn castling_moves(&self, from: Square, color: Color, moves: &mut Vec<Ply>) {
        if from != CastleSide::king_home(color) {
            return;
        }
        let rook = Some(Piece::new(PieceKind::Rook, color));
        let mut checked_for_check = false;
        for side in CastleSide::BOTH {
            if !self.can_castle(color, side) || self.get(side.rook_home(color)) != rook {
                continue;
            }
            let rook_home = side.rook_home(color);
            let between_is_empty = (1..)
                .map(|steps| from.offset(steps * side.direction(), 0))
                .take_while(|&square| square != rook_home)
                .all(|square| self.is_empty(square));
            if !between_is_empty {
                continue;
            }
            // Only ask about check once we know a castle might be on
            if !checked_for_check {
                if self.is_in_check(color) {
                    return;
                }
                checked_for_check = true;
            }
            let path_is_safe = (1..=2).all(|steps| {
                !self.is_square_attacked(from.offset(steps * side.direction(), 0), color.other())
            });
            if path_is_safe {
                moves.push(Ply::new(from, side.king_target(color)));
            }
        }
    }

    /// Whether making this move would leave `color`'s king attacked
    ///
    /// The move is played out on a copy of the board, so this is only meaningful for moves that
    /// are at least pseudo-legal.
    pub fn would_be_in_check(&self, ply: Ply, color: Color) -> bool {
        let mut hypothetical = self.clone();
        hypothetical.apply(ply);
        hypothetical.is_in_check(color)
    }

    /// All moves the piece on `from` can legally make
    ///
    /// Like [`Self::pseudo_legal_moves`], this doesn't care whose turn it is.
    pub fn legal_moves(&self, from: Square) -> Vec<Ply> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        let mut moves = self.pseudo_legal_moves(from);
        moves.retain(|&ply| !self.would_be_in_check(ply, piece.color));
        moves
    }

    /// All legal moves for every piece of the given color
    pub fn all_legal_moves(&self, color: Color) -> Vec<Ply> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .flat_map(|(square, _)| self.legal_moves(square))
            .collect()
    }

    /// Whether the given color has at least one legal move, stopping at the first one found
    pub(crate) fn has_legal_move(&self, color: Color) -> bool {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .any(|(square, piece)| {
                self.pseudo_legal_moves(square)
                    .into_iter()
                    .any(|ply| !self.would_be_in_check(ply, piece.color))
            })
    }
}

/// Push a pawn move, fanning it out into every promotion if it reaches the far rank
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut Vec<Ply>) {
    if to.rank() == color.promotion_rank() {
        moves.extend(
            PieceKind::PROMOTIONS
                .into_iter()
                .map(|kind| Ply::with_promotion(from, to, kind)),
        );
    } else {
        moves.push(Ply::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, square: Square, kind: PieceKind, color: Color) {
        board.set(square, Some(Piece::new(kind, color)));
    }

    fn targets(moves: &[Ply]) -> Vec<Square> {
        let mut targets = moves.iter().map(|ply| ply.to).collect::<Vec<_>>();
        targets.sort_by_key(|square| (square.rank(), square.file()));
        targets.dedup();
        targets
    }

    #[test]
    fn test_starting_pawn_and_knight_moves() {
        let board = Board::starting_position();
        assert_eq!(
            targets(&board.pseudo_legal_moves(Square::E2)),
            vec![Square::E3, Square::E4]
        );
        assert_eq!(
            targets(&board.pseudo_legal_moves(Square::G1)),
            vec![Square::F3, Square::H3]
        );
        assert!(board.pseudo_legal_moves(Square::A1).is_empty());
        assert!(board.pseudo_legal_moves(Square::E1).is_empty());
        assert!(board.pseudo_legal_moves(Square::E4).is_empty());
    }

    #[test]
    fn test_double_push_needs_both_squares_empty() {
        let mut board = Board::starting_position();
        place(&mut board, Square::E4, PieceKind::Knight, Color::Black);
        assert_eq!(targets(&board.pseudo_legal_moves(Square::E2)), vec![Square::E3]);
        place(&mut board, Square::D3, PieceKind::Knight, Color::Black);
        assert!(targets(&board.pseudo_legal_moves(Square::D2)).is_empty());
        // A blocker is still fair game for the pawns beside it
        assert_eq!(
            targets(&board.pseudo_legal_moves(Square::C2)),
            vec![Square::C3, Square::D3, Square::C4]
        );
    }

    #[test]
    fn test_promotion_fans_out() {
        let mut board = Board::new();
        place(&mut board, Square::B7, PieceKind::Pawn, Color::White);
        place(&mut board, Square::C8, PieceKind::Rook, Color::Black);
        let moves = board.pseudo_legal_moves(Square::B7);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|ply| ply.is_promotion()));
        for kind in PieceKind::PROMOTIONS {
            assert!(moves.contains(&Ply::with_promotion(Square::B7, Square::B8, kind)));
            assert!(moves.contains(&Ply::with_promotion(Square::B7, Square::C8, kind)));
        }
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let mut board = Board::new();
        place(&mut board, Square::H2, PieceKind::Pawn, Color::Black);
        place(&mut board, Square::G1, PieceKind::Knight, Color::White);
        let moves = board.pseudo_legal_moves(Square::H2);
        assert_eq!(targets(&moves), vec![Square::G1, Square::H1]);
        assert!(moves.contains(&Ply::with_promotion(
            Square::H2,
            Square::G1,
            PieceKind::Knight
        )));
    }

    #[test]
    fn test_rays_stop_at_first_piece() {
        let mut board = Board::new();
        place(&mut board, Square::D4, PieceKind::Queen, Color::White);
        place(&mut board, Square::D6, PieceKind::Pawn, Color::Black);
        place(&mut board, Square::F4, PieceKind::Pawn, Color::White);
        let moves = targets(&board.pseudo_legal_moves(Square::D4));
        assert!(moves.contains(&Square::D5));
        assert!(moves.contains(&Square::D6));
        assert!(!moves.contains(&Square::D7));
        assert!(moves.contains(&Square::E4));
        assert!(!moves.contains(&Square::F4));
        assert!(!moves.contains(&Square::G4));
        assert!(moves.contains(&Square::H8));
        assert!(moves.contains(&Square::A1));
        // 2 up, 3 down, 3 left, 1 right, 4 + 3 + 3 + 3 diagonally
        assert_eq!(moves.len(), 22);
    }

    #[test]
    fn test_knight_in_corner() {
        let mut board = Board::new();
        place(&mut board, Square::A1, PieceKind::Knight, Color::Black);
        place(&mut board, Square::C2, PieceKind::Bishop, Color::Black);
        assert_eq!(targets(&board.pseudo_legal_moves(Square::A1)), vec![Square::B3]);
    }

    #[test]
    fn test_pinned_piece_has_no_legal_moves() {
        let mut board = Board::new();
        place(&mut board, Square::E1, PieceKind::King, Color::White);
        place(&mut board, Square::E2, PieceKind::Knight, Color::White);
        place(&mut board, Square::E8, PieceKind::Rook, Color::Black);
        assert!(!board.pseudo_legal_moves(Square::E2).is_empty());
        assert!(board.legal_moves(Square::E2).is_empty());
        for ply in board.pseudo_legal_moves(Square::E2) {
            assert!(board.would_be_in_check(ply, Color::White));
        }
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let mut board = Board::new();
        place(&mut board, Square::E1, PieceKind::King, Color::White);
        place(&mut board, Square::D8, PieceKind::Rook, Color::Black);
        let moves = board.legal_moves(Square::E1);
        assert!(moves.iter().all(|ply| ply.to.file() != 3));
        assert_eq!(
            targets(&moves),
            vec![Square::F1, Square::E2, Square::F2]
        );
    }

    #[test]
    fn test_has_legal_move_agrees() {
        let board = Board::starting_position();
        assert!(board.has_legal_move(Color::White));
        assert!(board.has_legal_move(Color::Black));
        assert!(!Board::new().has_legal_move(Color::White));
    }
}
