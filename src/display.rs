use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::Card;
use crate::hand_evaluator::ALL_HAND_RANKS;
use crate::history::SessionHistory;
use crate::probabilities::{one_in, probability};

pub fn card_display(card: &Card) -> String {
    let token = card.to_string();
    if card.suit.is_red() {
        token.red().bold().to_string()
    } else {
        token.white().bold().to_string()
    }
}

pub fn board_display(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "--".dimmed().to_string();
    }
    cards.iter().map(card_display).collect::<Vec<_>>().join(" ")
}

pub fn rank_table(with_probability: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Hand").set_alignment(CellAlignment::Left),
        Cell::new("Rank").set_alignment(CellAlignment::Right),
    ];
    if with_probability {
        header.push(Cell::new("Probability").set_alignment(CellAlignment::Right));
        header.push(Cell::new("Odds").set_alignment(CellAlignment::Right));
    }
    table.set_header(header);

    for rank in ALL_HAND_RANKS {
        let mut row = vec![
            Cell::new(rank.name().bold().to_string()),
            Cell::new(rank.value()).set_alignment(CellAlignment::Right),
        ];
        if with_probability {
            row.push(
                Cell::new(format!("{:.4}%", probability(rank))).set_alignment(CellAlignment::Right),
            );
            let odds = one_in(rank)
                .map(|n| format!("1 in {}", group_thousands(n.round() as u64)))
                .unwrap_or_else(|| "-".to_string());
            row.push(Cell::new(odds).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    table.to_string()
}

pub fn summary_table(history: &SessionHistory) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    table.add_row(vec![
        Cell::new("Rounds".bold().to_string()),
        Cell::new(history.rounds),
    ]);
    table.add_row(vec![
        Cell::new("Wins".bold().to_string()),
        Cell::new(history.wins.to_string().green().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Losses".bold().to_string()),
        Cell::new(history.losses.to_string().red().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Ties".bold().to_string()),
        Cell::new(history.ties.to_string().yellow().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Money".bold().to_string()),
        Cell::new(format!("${}", history.money)),
    ]);

    table.to_string()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn styled_action(action: &str) -> String {
    let lower = action.to_lowercase();
    if lower.starts_with("raise") || lower.starts_with("bet") || lower.starts_with("all") {
        action.red().bold().to_string()
    } else if lower.starts_with("call") {
        action.green().bold().to_string()
    } else if lower.starts_with("fold") {
        action.dimmed().bold().to_string()
    } else if lower.starts_with("check") {
        action.yellow().bold().to_string()
    } else {
        action.bold().to_string()
    }
}

pub fn signed_money(net: i64) -> String {
    if net > 0 {
        format!("+${}", net).green().bold().to_string()
    } else if net < 0 {
        format!("-${}", -net).red().bold().to_string()
    } else {
        "$0".yellow().bold().to_string()
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
