//! Counting move-tree leaves, for checking the move generator against known totals

use board::Ply;
use tracing::debug;

use crate::Board;

impl Board {
    /// The number of positions reached by playing every sequence of exactly `depth` legal moves
    /// from here, starting with the side to move. Depth 0 counts this position alone.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.all_legal_moves(self.side_to_move);
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|ply| self.after(ply).perft(depth - 1))
            .sum()
    }

    /// [`Self::perft`] broken down by the first move played, in the order moves are generated
    ///
    /// Comparing this against another move generator's breakdown narrows a wrong total down to
    /// the moves responsible.
    pub fn perft_divide(&self, depth: u32) -> Vec<(Ply, u64)> {
        let Some(remaining) = depth.checked_sub(1) else {
            return Vec::new();
        };
        self.all_legal_moves(self.side_to_move)
            .into_iter()
            .map(|ply| {
                let nodes = self.after(ply).perft(remaining);
                debug!(%ply, nodes, "divided");
                (ply, nodes)
            })
            .collect()
    }

    /// A copy of this board with an already-legal move played
    fn after(&self, ply: Ply) -> Self {
        let mut child = self.clone();
        child.apply(ply);
        child
    }
}
