use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::betting::PlayerAction;
use crate::display::{board_display, signed_money, styled_action, summary_table};
use crate::engine::{Ending, PlayerSeat, RoundEvent, RoundOutcome, SeatView};
use crate::error::{SimError, SimResult};
use crate::history::SessionHistory;
use crate::showdown::Contender;
use crate::session::{run_session, RoundStart, SessionConfig, SessionSeat};

// ---------------------------------------------------------------------------
// Action parsing
// ---------------------------------------------------------------------------

fn parse_amount(token: Option<&str>) -> SimResult<u32> {
    let token = token.ok_or_else(|| SimError::InvalidAmount("an amount is required".to_string()))?;
    let amount: i64 = token
        .parse()
        .map_err(|_| SimError::InvalidAmount(format!("'{}' is not a number", token)))?;
    if amount <= 0 {
        return Err(SimError::InvalidAmount("the amount must be positive".to_string()));
    }
    u32::try_from(amount).map_err(|_| SimError::InvalidAmount(format!("{} is too large", amount)))
}

/// Turns a typed command such as `raise 50` into a [`PlayerAction`].
pub fn parse_action(input: &str) -> SimResult<PlayerAction> {
    let lower = input.trim().to_lowercase();
    let mut parts = lower.split_whitespace();
    let word = parts
        .next()
        .ok_or_else(|| SimError::InvalidAction("enter an action".to_string()))?;

    let action = match word {
        "check" | "k" => PlayerAction::Check,
        "call" | "c" => PlayerAction::Call,
        "fold" | "f" => PlayerAction::Fold,
        "finish" | "quit" | "q" | "exit" => PlayerAction::Finish,
        "all-in" | "allin" | "shove" => PlayerAction::AllIn,
        "all" => {
            if parts.next().is_some_and(|w| w != "in") {
                return Err(SimError::InvalidAction(input.trim().to_string()));
            }
            PlayerAction::AllIn
        }
        "bet" | "b" => PlayerAction::Bet(parse_amount(parts.next())?),
        "raise" | "r" => PlayerAction::Raise(parse_amount(parts.next())?),
        _ => return Err(SimError::InvalidAction(format!("unknown action '{}'", word))),
    };

    if parts.next().is_some() {
        return Err(SimError::InvalidAction(format!(
            "unexpected input after '{}'",
            action
        )));
    }
    Ok(action)
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Reads one trimmed line; `None` on end of input or a read error.
fn prompt(message: &str, reader: &mut dyn BufRead, writer: &mut dyn Write) -> Option<String> {
    write!(writer, "{}: ", message).ok();
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn action_hint(view: &SeatView<'_>) -> &'static str {
    if view.state.current_bet > 0 {
        "call / raise N / all-in / fold / finish"
    } else {
        "check / bet N / all-in / fold / finish"
    }
}

// ---------------------------------------------------------------------------
// Terminal seat
// ---------------------------------------------------------------------------

pub struct TerminalSeat<'a> {
    name: String,
    reader: &'a mut dyn BufRead,
    writer: &'a mut dyn Write,
}

impl<'a> TerminalSeat<'a> {
    pub fn new(name: &str, reader: &'a mut dyn BufRead, writer: &'a mut dyn Write) -> Self {
        TerminalSeat {
            name: name.to_string(),
            reader,
            writer,
        }
    }

    fn say(&mut self, line: &str) {
        writeln!(self.writer, "{}", line).ok();
    }
}

impl PlayerSeat for TerminalSeat<'_> {
    fn choose(&mut self, view: &SeatView<'_>) -> PlayerAction {
        let state = view.state;
        let status = format!(
            "  Pot: ${}  |  To call: ${}  |  Stack: ${}  |  Opponent: ${}",
            state.pot, state.current_bet, state.player_stack, state.opponent_stack
        );
        self.say(&status);
        loop {
            let message = format!("  Action ({})", action_hint(view));
            let input = match prompt(&message, self.reader, self.writer) {
                Some(line) => line,
                None => return PlayerAction::Finish,
            };
            match parse_action(&input) {
                Ok(action) => return action,
                Err(e) => self.rejected(&e),
            }
        }
    }

    fn rejected(&mut self, error: &SimError) {
        let line = format!("  {}", error.to_string().red());
        self.say(&line);
    }

    fn notify(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::StreetDealt { street, community } => {
                let header = format!("--- {} ---", street).cyan().bold().to_string();
                self.say(&format!("\n{}", header));
                if !community.is_empty() {
                    self.say(&format!("  Board: {}", board_display(community)));
                }
            }
            RoundEvent::OpponentActed(decision) => {
                let line = format!("  Opponent: {}", styled_action(&decision.to_string()));
                self.say(&line);
            }
            RoundEvent::AllInRunout => {
                let line = format!("  {}", "All-in! Running out the board.".magenta().bold());
                self.say(&line);
            }
            RoundEvent::Showdown { opponent_hole, result } => {
                self.say(&format!("\n{}", "--- Showdown ---".cyan().bold()));
                self.say(&format!(
                    "  {}: {}",
                    self.name,
                    result.player_hand.rank.to_string().bold()
                ));
                self.say(&format!(
                    "  Opponent: {} ({})",
                    board_display(opponent_hole),
                    result.opponent_hand.rank.to_string().bold()
                ));
            }
        }
    }
}

impl SessionSeat for TerminalSeat<'_> {
    fn round_started(&mut self, start: &RoundStart<'_>) {
        let header = format!("Round {}: Money: ${}", start.round, start.money).blue().bold().to_string();
        self.say(&format!("\n{}", header));
        self.say(&format!("  Your cards: {}", board_display(&start.deal.player_hole)));
        self.say(&format!(
            "  Win probability: {}",
            format!("{:.1}%", start.equity.equity() * 100.0).green()
        ));
    }

    fn round_finished(&mut self, _round: u32, outcome: &RoundOutcome, money: u32) {
        let line = match (outcome.ending, outcome.winner) {
            (Ending::Terminated, _) | (_, None) => "Session finished.".yellow().to_string(),
            (_, Some(Contender::Player)) => format!(
                "{} wins {}{}",
                self.name,
                signed_money(outcome.net),
                outcome.rank.map(|r| format!(" with {}", r)).unwrap_or_default()
            )
            .green()
            .to_string(),
            (_, Some(Contender::Opponent)) => format!(
                "{} loses {}{}",
                self.name,
                signed_money(outcome.net),
                outcome.rank.map(|r| format!(" against {}", r)).unwrap_or_default()
            )
            .red()
            .to_string(),
            (_, Some(Contender::Tie)) => "It's a tie!".yellow().to_string(),
        };
        self.say(&format!("  {}  (money: ${})", line, money));
    }
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

pub fn interactive_command(config: &SessionConfig) -> SimResult<SessionHistory> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(config, &mut reader, &mut writer)
}

pub fn run_interactive_session(
    config: &SessionConfig,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> SimResult<SessionHistory> {
    writeln!(writer).ok();
    writeln!(writer, "{}", "Heads-up Hold'em".cyan().bold()).ok();
    writeln!(
        writer,
        "Type {} at any prompt to end the session. Big blind: ${}.",
        "'finish'".bold(),
        config.big_blind
    )
    .ok();

    let history = {
        let mut seat = TerminalSeat::new(&config.name, reader, writer);
        run_session(config, &mut seat)?
    };

    writeln!(writer, "\n{}", "--- Session Summary ---".cyan().bold()).ok();
    writeln!(writer, "{}", summary_table(&history)).ok();

    if let Some(path) = &config.history_path {
        history.save(path)?;
        writeln!(writer, "  History saved to {}", path.display().to_string().dimmed()).ok();
    }
    Ok(history)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
