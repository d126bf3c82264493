//! Count the leaves of the legal move tree from the starting position, or from a position reached
//! by playing some moves first

use std::process::ExitCode;

use board::Ply;
use clap::Parser;
use mailbox::Board;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Count the positions reachable in a fixed number of legal moves")]
struct Args {
    /// How many plies deep to search
    depth: u32,

    /// Moves to play from the starting position before counting, like `e2e4 e7e5`
    #[arg(long, num_args = 1..)]
    moves: Vec<Ply>,

    /// Also print the count below each legal first move
    #[arg(long)]
    divide: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mailbox=info".into()),
        )
        .init();
    let args = Args::parse();

    let mut board = Board::starting_position();
    for &ply in &args.moves {
        if let Err(error) = board.make_move(ply) {
            tracing::error!(%ply, %error, "can't set up the position to count from");
            return ExitCode::FAILURE;
        }
    }
    println!("{}", board.to_fen());

    let nodes = if args.divide && args.depth > 0 {
        let divided = board.perft_divide(args.depth);
        for (ply, nodes) in &divided {
            println!("{ply}: {nodes}");
        }
        divided.into_iter().map(|(_, nodes)| nodes).sum()
    } else {
        board.perft(args.depth)
    };
    tracing::info!(depth = args.depth, nodes, "finished counting");
    println!("{nodes}");
    ExitCode::SUCCESS
}
