//! Text renderings of a position

use board::{Occupant, Square};

use crate::Board;

const FILE_LABELS: &str = "  a b c d e f g h\n";

/// The ranks from the top of a white-side diagram down, as zero-indexed rank numbers
fn ranks_top_down() -> impl Iterator<Item = u8> {
    (0..8).rev()
}

impl Board {
    /// An 8x8 grid of piece letters as seen from white's side, with file letters above and below
    /// and rank numbers on both sides:
    ///
    /// ```text
    ///   a b c d e f g h
    /// 8 r n b q k b n r 8
    /// 7 p p p p p p p p 7
    /// ...
    /// 1 R N B Q K B N R 1
    ///   a b c d e f g h
    /// ```
    ///
    /// Uppercase is white, lowercase is black, and `.` is an empty square.
    pub fn to_ascii(&self) -> String {
        let mut grid = String::with_capacity(FILE_LABELS.len() * 10);
        grid.push_str(FILE_LABELS);
        for rank in ranks_top_down() {
            let label = char::from(b'1' + rank);
            grid.push(label);
            for file in 0..8 {
                grid.push(' ');
                grid.push(self.get(Square::new(file, rank)).glyph());
            }
            grid.push(' ');
            grid.push(label);
            grid.push('\n');
        }
        grid.push_str(FILE_LABELS);
        grid
    }

    /// A description meant to be read out by a screen reader rather than looked at
    ///
    /// One line says whose move it is, then one line per rank from 8 down to 1 names every piece
    /// on it along with its square (or says the rank is empty). Lines for an en passant chance and
    /// for the side to move being in check follow when they apply.
    pub fn to_accessible_string(&self) -> String {
        let mut lines = vec![format!("Side to move: {}", self.side_to_move)];
        for rank in ranks_top_down() {
            let occupants = (0..8)
                .map(|file| Square::new(file, rank))
                .filter_map(|square| {
                    let occupant = self.get(square);
                    occupant
                        .is_some()
                        .then(|| format!("{} on {square}", occupant.describe()))
                })
                .collect::<Vec<_>>();
            let contents = if occupants.is_empty() {
                "empty".to_string()
            } else {
                occupants.join(", ")
            };
            lines.push(format!("Rank {}: {contents}", rank + 1));
        }
        if let Some(target) = self.en_passant_target {
            lines.push(format!("En passant capture possible on {target}"));
        }
        if self.is_in_check(self.side_to_move) {
            lines.push(format!("{} is in check", self.side_to_move));
        }
        let mut description = lines.join("\n");
        description.push('\n');
        description
    }

    /// Forsyth-Edwards Notation for the position, with all six fields
    pub fn to_fen(&self) -> String {
        let pieces = ranks_top_down()
            .map(|rank| {
                let mut row = String::with_capacity(8);
                let mut empty_run = 0u8;
                for file in 0..8 {
                    match self.get(Square::new(file, rank)) {
                        Some(piece) => {
                            if empty_run > 0 {
                                row.push(char::from(b'0' + empty_run));
                                empty_run = 0;
                            }
                            row.push(piece.fen_letter());
                        }
                        None => empty_run += 1,
                    }
                }
                if empty_run > 0 {
                    row.push(char::from(b'0' + empty_run));
                }
                row
            })
            .collect::<Vec<String>>()
            .join("/");
        let side_to_move = self.side_to_move.fen_letter();
        let castling = self.castles.to_fen();
        let en_passant_target = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        let halfmove_clock = self.halfmove_clock;
        let fullmove_number = self.fullmove_number;
        format!(
            "{pieces} {side_to_move} {castling} {en_passant_target} {halfmove_clock} {fullmove_number}"
        )
    }
}
