use anyhow::Context;
use broadside::{
    density_map, init_logging, play_match, print_density_map, AiPlayer, CellSet, Fleet,
    PlayerConfig,
};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Pit two computer players against each other and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the first player
    seed1: u64,
    /// RNG seed for the second player
    seed2: u64,
    /// Let ships touch edge-to-edge during deployment
    #[arg(long)]
    no_spacing: bool,
    /// Stop after this many full turns
    #[arg(long, default_value_t = 200)]
    max_turns: usize,
    /// Print the opening density map of the first player
    #[arg(long)]
    show_density: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = PlayerConfig {
        spacing: !args.no_spacing,
        ..PlayerConfig::default()
    };
    let mut p1 = AiPlayer::with_config(SmallRng::seed_from_u64(args.seed1), config);
    let mut p2 = AiPlayer::with_config(SmallRng::seed_from_u64(args.seed2), config);

    if args.show_density {
        let density = density_map(p1.opponent_board(), Fleet::full().shapes(), CellSet::new());
        print_density_map(&density);
    }

    let summary = play_match(&mut p1, &mut p2, args.max_turns).context("match aborted")?;

    let winner = summary.winner().map(|w| ["player1", "player2"][w]);
    let result = json!({
        "player1": {"shots": summary.first.shots, "hits": summary.first.hits, "defeated": p1.is_defeated()},
        "player2": {"shots": summary.second.shots, "hits": summary.second.hits, "defeated": p2.is_defeated()},
        "turns": summary.turns,
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
