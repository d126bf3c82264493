use board::{CastleSide, Color, Piece, PieceKind, Ply, Square};
use mailbox::Board;

/// Build a position from a diagram, rank 8 first, with one character per square (`.` for
/// empty, otherwise a piece letter in white's uppercase or black's lowercase)
///
/// `castling` lists the rights that survive, in FEN order (`"KQkq"`, `"kq"`, `""`).
#[track_caller]
pub fn position(rows: [&str; 8], side_to_move: Color, castling: &str) -> Board {
    let mut board = Board::starting_position();
    for square in Square::all_squares() {
        board.set(square, None);
    }
    for (row, rank) in rows.into_iter().zip((0..8).rev()) {
        assert_eq!(row.len(), 8, "Diagram row {row:?} isn't 8 squares wide");
        for (file, letter) in (0..8).zip(row.chars()) {
            if letter == '.' {
                continue;
            }
            let kind = PieceKind::from_letter(letter)
                .unwrap_or_else(|| panic!("{letter:?} isn't a piece letter"));
            let color = if letter.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            board.set(Square::new(file, rank), Some(Piece::new(kind, color)));
        }
    }
    for (letter, color, side) in [
        ('K', Color::White, CastleSide::Kingside),
        ('Q', Color::White, CastleSide::Queenside),
        ('k', Color::Black, CastleSide::Kingside),
        ('q', Color::Black, CastleSide::Queenside),
    ] {
        if !castling.contains(letter) {
            board.remove_castling_right(color, side);
        }
    }
    if side_to_move != board.side_to_move() {
        board.switch_turn();
    }
    board
}

/// Play the given long-algebraic moves, panicking if any is malformed or illegal
#[track_caller]
#[allow(dead_code)]
pub fn play(board: &mut Board, moves: &[&str]) {
    for notation in moves {
        let ply = notation
            .parse::<Ply>()
            .unwrap_or_else(|error| panic!("Couldn't parse {notation:?}: {error}"));
        board
            .make_move(ply)
            .unwrap_or_else(|error| panic!("Couldn't play {ply}: {error}"));
    }
}
