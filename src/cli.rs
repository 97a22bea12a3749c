use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::betting::DEFAULT_BIG_BLIND;
use crate::cards::Deck;
use crate::display::{board_display, print_error, rank_table, signed_money};
use crate::engine::HandDeal;
use crate::equity::DEFAULT_SIMULATIONS;
use crate::error::SimResult;
use crate::hand_evaluator::{evaluate, HAND_SIZE};
use crate::play::interactive_command;
use crate::probabilities::probability;
use crate::session::{SessionConfig, DEFAULT_HISTORY_FILE, DEFAULT_MONEY};
use crate::showdown::{resolve, Contender};

#[derive(Parser)]
#[command(name = "holdem", version = "1.0.0", about = "Heads-up Texas Hold'em simulator.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List hand rankings
    Info {
        /// Show how often each hand occurs
        #[arg(long)]
        probability: bool,
    },
    /// Deal five-card hands and name their ranks
    Deal {
        /// Number of hands to deal
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=10))]
        hands: u8,
    },
    /// Play one hand straight to showdown
    Play {
        /// Player name
        #[arg(long, default_value = "Player")]
        name: String,
        /// Amount each side puts in the pot
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=1000))]
        bet: u32,
        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play betting rounds against the computer opponent
    Interactive {
        /// Player name
        #[arg(long, default_value = "Player")]
        name: String,
        /// Number of rounds
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=1000))]
        rounds: u32,
        /// Starting money
        #[arg(long, default_value_t = DEFAULT_MONEY, value_parser = clap::value_parser!(u32).range(10..=1000))]
        money: u32,
        /// Big blind posted by the opponent each hand
        #[arg(long = "big-blind", default_value_t = DEFAULT_BIG_BLIND, value_parser = clap::value_parser!(u32).range(1..=100))]
        big_blind: u32,
        /// Seed for reproducible deals and opponent play
        #[arg(long)]
        seed: Option<u64>,
        /// Where to write the session history
        #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
        history: PathBuf,
        /// Monte Carlo samples for the win probability
        #[arg(long, default_value_t = DEFAULT_SIMULATIONS as u32, value_parser = clap::value_parser!(u32).range(1..=100_000))]
        sims: u32,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    let result = match cli.command {
        Commands::Info { probability } => {
            cmd_info(probability);
            Ok(())
        }
        Commands::Deal { hands } => cmd_deal(hands as usize),
        Commands::Play { name, bet, seed } => cmd_play(&name, bet, seed),
        Commands::Interactive {
            name,
            rounds,
            money,
            big_blind,
            seed,
            history,
            sims,
        } => {
            let config = SessionConfig {
                name,
                rounds,
                money,
                opponent_money: None,
                big_blind,
                seed,
                simulations: sims as usize,
                history_path: Some(history),
            };
            interactive_command(&config).map(|_| ())
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn cmd_info(with_probability: bool) {
    println!("\n{}", "Hand Rankings".cyan().bold());
    println!("{}", rank_table(with_probability));
}

fn cmd_deal(hands: usize) -> SimResult<()> {
    let mut deck = Deck::new();
    deck.shuffle(&mut seeded_rng(None));
    for i in 1..=hands {
        let hand = deck.deal(HAND_SIZE)?;
        let evaluation = evaluate(&hand)?;
        println!("\n  {} {}", format!("Hand {}:", i).bold(), board_display(&hand));
        println!(
            "  Hand Rank: {} ({:.4}%)",
            evaluation.rank.to_string().green().bold(),
            probability(evaluation.rank)
        );
    }
    Ok(())
}

fn cmd_play(name: &str, bet: u32, seed: Option<u64>) -> SimResult<()> {
    let mut deck = Deck::new();
    deck.shuffle(&mut seeded_rng(seed));
    let deal = HandDeal::from_deck(&mut deck)?;
    let result = resolve(&deal.player_hole, &deal.opponent_hole, &deal.board, bet * 2, bet)?;

    println!("\n  {}  {}", format!("{}:", name).bold(), board_display(&deal.player_hole));
    println!("  {}  {}", "Opponent:".bold(), board_display(&deal.opponent_hole));
    println!("  {}  {}", "Board:".bold(), board_display(&deal.board));
    println!(
        "  {} {}  |  {} {}",
        format!("{}:", name).dimmed(),
        result.player_hand.rank.to_string().bold(),
        "Opponent:".dimmed(),
        result.opponent_hand.rank.to_string().bold()
    );

    let line = match result.winner {
        Contender::Player => format!("{} wins {} with {}!", name, signed_money(result.pot), result.rank).green(),
        Contender::Opponent => format!("{} loses {} against {}!", name, signed_money(result.pot), result.rank).red(),
        Contender::Tie => "It's a tie!".yellow(),
    };
    println!("\n  {}", line.bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("holdem").chain(args.iter().copied()))
    }

    #[test]
    fn test_sims_must_be_positive() {
        assert!(parse(&["interactive", "--sims", "0"]).is_err());
        assert!(parse(&["interactive", "--sims", "100001"]).is_err());
        match parse(&["interactive", "--sims", "500"]).unwrap().command {
            Commands::Interactive { sims, .. } => assert_eq!(sims, 500),
            _ => panic!("expected interactive"),
        }
    }

    #[test]
    fn test_interactive_defaults() {
        match parse(&["interactive"]).unwrap().command {
            Commands::Interactive { money, big_blind, sims, .. } => {
                assert_eq!(money, DEFAULT_MONEY);
                assert_eq!(big_blind, DEFAULT_BIG_BLIND);
                assert_eq!(sims as usize, DEFAULT_SIMULATIONS);
            }
            _ => panic!("expected interactive"),
        }
    }

    #[test]
    fn test_flag_ranges_enforced() {
        assert!(parse(&["deal", "--hands", "11"]).is_err());
        assert!(parse(&["play", "--bet", "0"]).is_err());
        assert!(parse(&["interactive", "--money", "5"]).is_err());
    }
}
