//! Line-based text front-end.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::engine::boundary::{execute_command, view_model};
use crate::engine::commands::EngineCommand;
use crate::engine::seed_ops::{msg_repeated_seed, msg_started_seed, parse_seed_input};
use crate::engine::session::GameSession;
use crate::engine::status_text::build_status_text;
use crate::engine::view_model::{CardView, GameViewModel};
use crate::game::{MoveSource, MoveTarget};
use crate::trace;

const HELP: &str = "\
Commands:
  new [seed]                 deal a new level
  reset                      deal the current seed again
  draw                       draw from the stock (recycles the waste when empty)
  move <w|tN> <tN|sN> [n]    move the top n cards (default 1)
  undo                       take back the last move
  save                       write the game and progression to disk
  log                        show recent engine events
  help                       this text
  quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    New(Option<u32>),
    Reset,
    Draw,
    Move {
        from: MoveSource,
        to: MoveTarget,
        count: usize,
    },
    Undo,
    Save,
    Log,
    Help,
    Quit,
}

fn parse_index(raw: &str, prefix: char) -> Option<usize> {
    let number = raw.strip_prefix(prefix)?.parse::<usize>().ok()?;
    number.checked_sub(1)
}

fn parse_source(raw: &str) -> Result<MoveSource, String> {
    let raw = raw.to_ascii_lowercase();
    if raw == "w" {
        return Ok(MoveSource::Waste);
    }
    parse_index(&raw, 't')
        .map(|column| MoveSource::Tableau { column })
        .ok_or_else(|| format!("unknown source {raw:?}; use w or t1, t2, ..."))
}

fn parse_target(raw: &str) -> Result<MoveTarget, String> {
    let raw = raw.to_ascii_lowercase();
    if let Some(column) = parse_index(&raw, 't') {
        return Ok(MoveTarget::Tableau { column });
    }
    parse_index(&raw, 's')
        .map(|slot_index| MoveTarget::Slot { slot_index })
        .ok_or_else(|| format!("unknown target {raw:?}; use t1, t2, ... or s1, s2, ..."))
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("empty command".to_string());
    };
    let args: Vec<&str> = parts.collect();

    match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("new" | "n", []) => Ok(ConsoleCommand::New(None)),
        ("new" | "n", [seed]) => Ok(ConsoleCommand::New(parse_seed_input(seed)?)),
        ("reset", []) => Ok(ConsoleCommand::Reset),
        ("draw" | "d", []) => Ok(ConsoleCommand::Draw),
        ("move" | "m", [from, to]) => Ok(ConsoleCommand::Move {
            from: parse_source(from)?,
            to: parse_target(to)?,
            count: 1,
        }),
        ("move" | "m", [from, to, count]) => {
            let count = count
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| format!("invalid card count {count:?}"))?;
            Ok(ConsoleCommand::Move {
                from: parse_source(from)?,
                to: parse_target(to)?,
                count,
            })
        }
        ("undo" | "u", []) => Ok(ConsoleCommand::Undo),
        ("save", []) => Ok(ConsoleCommand::Save),
        ("log", []) => Ok(ConsoleCommand::Log),
        ("help" | "h" | "?", []) => Ok(ConsoleCommand::Help),
        ("quit" | "q" | "exit", []) => Ok(ConsoleCommand::Quit),
        (verb, _) => Err(format!("unknown command {verb:?}; type help")),
    }
}

fn card_text(card: &CardView) -> String {
    if !card.face_up {
        "##".to_string()
    } else if card.is_category {
        format!("[{}]", card.label)
    } else {
        card.label.clone()
    }
}

pub fn render_board(view: &GameViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Seed {}  status {}  cards left {}",
        view.seed,
        view.status.id(),
        view.remaining_cards
    );
    let slots: Vec<String> = view
        .slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let marker = if slot.is_completing { "*" } else { "" };
            format!("S{} {}{marker}", idx + 1, slot.progress())
        })
        .collect();
    let _ = writeln!(out, "{}", slots.join("  |  "));
    let waste = view
        .waste_top
        .as_ref()
        .map_or_else(|| "-".to_string(), card_text);
    let _ = writeln!(
        out,
        "Stock {}  Waste {} ({})",
        view.stock_count, waste, view.waste_count
    );
    for (idx, column) in view.columns.iter().enumerate() {
        let cards: Vec<String> = column.iter().map(card_text).collect();
        let _ = writeln!(out, "T{}: {}", idx + 1, cards.join(" "));
    }
    out
}

fn save_all(session: &GameSession, config: &AppConfig) -> io::Result<String> {
    let saved = session.save_to_path(&config.save_path)?;
    session.progression().save_to_path(&config.progression_path)?;
    Ok(if saved {
        format!("Saved to {}.", config.save_path.display())
    } else {
        "Nothing to save yet.".to_string()
    })
}

/// Applies one console command. Returns `false` when the loop should stop.
fn apply(
    session: &mut GameSession,
    config: &AppConfig,
    command: ConsoleCommand,
    output: &mut impl Write,
) -> io::Result<bool> {
    let engine_command = match command {
        ConsoleCommand::Quit => return Ok(false),
        ConsoleCommand::Help => {
            writeln!(output, "{HELP}")?;
            return Ok(true);
        }
        ConsoleCommand::Log => {
            for line in trace::history_lines() {
                writeln!(output, "{line}")?;
            }
            return Ok(true);
        }
        ConsoleCommand::Save => {
            let message = save_all(session, config)?;
            writeln!(output, "{message}")?;
            return Ok(true);
        }
        ConsoleCommand::New(seed) => EngineCommand::NewGame { seed },
        ConsoleCommand::Reset => EngineCommand::ResetLevel,
        ConsoleCommand::Draw => EngineCommand::Draw,
        ConsoleCommand::Undo => EngineCommand::Undo,
        ConsoleCommand::Move { from, to, count } => match session.level() {
            Some(level) => EngineCommand::move_top(from, to, count, &level.tableau, &level.waste),
            None => EngineCommand::MoveCard { from, to },
        },
    };

    let announce = matches!(
        engine_command,
        EngineCommand::NewGame { .. } | EngineCommand::ResetLevel
    );
    let reset = engine_command == EngineCommand::ResetLevel;
    match execute_command(session, engine_command) {
        Ok(result) => {
            if announce && result.changed {
                if let Some(level) = session.level() {
                    let message = if reset {
                        msg_repeated_seed(level.seed)
                    } else {
                        msg_started_seed(level.seed)
                    };
                    writeln!(output, "{message}")?;
                }
            }
        }
        Err(err) => writeln!(output, "Cannot deal a level: {err}")?,
    }

    // No animation to wait for here.
    session.flush_completions();
    if let Some(view) = view_model(session) {
        write!(output, "{}", render_board(&view))?;
    }
    writeln!(output, "{}", build_status_text(session))?;
    session.clear_error();
    Ok(true)
}

pub fn run(
    session: &mut GameSession,
    config: &AppConfig,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    if let Some(view) = view_model(session) {
        write!(output, "{}", render_board(&view))?;
    }
    writeln!(output, "{}", build_status_text(session))?;
    writeln!(output, "Type help for commands.")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !apply(session, config, command, &mut output)? {
                    break;
                }
            }
            Err(message) => writeln!(output, "{message}")?,
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::ContentBank;
    use crate::config::{GeneratorConfig, SessionConfig};

    fn session() -> GameSession {
        let mut session = GameSession::new(
            ContentBank::builtin(),
            GeneratorConfig::default(),
            SessionConfig::default(),
        );
        session.new_game(Some(42)).expect("generate");
        session
    }

    #[test]
    fn parses_moves_with_one_based_indices() {
        assert_eq!(
            parse_command("move t2 s1"),
            Ok(ConsoleCommand::Move {
                from: MoveSource::Tableau { column: 1 },
                to: MoveTarget::Slot { slot_index: 0 },
                count: 1,
            })
        );
        assert_eq!(
            parse_command("M W T3 2"),
            Ok(ConsoleCommand::Move {
                from: MoveSource::Waste,
                to: MoveTarget::Tableau { column: 2 },
                count: 2,
            })
        );
        assert!(parse_command("move t0 s1").is_err());
        assert!(parse_command("move s1 t1").is_err());
        assert!(parse_command("move t1 t2 0").is_err());
    }

    #[test]
    fn parses_simple_verbs_and_seeds() {
        assert_eq!(parse_command("new"), Ok(ConsoleCommand::New(None)));
        assert_eq!(parse_command("new 1_000"), Ok(ConsoleCommand::New(Some(1000))));
        assert!(parse_command("new nope").is_err());
        assert_eq!(parse_command(" draw "), Ok(ConsoleCommand::Draw));
        assert_eq!(parse_command("q"), Ok(ConsoleCommand::Quit));
        assert!(parse_command("fly").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn scripted_session_draws_undoes_and_stops_on_quit() {
        let mut session = session();
        let dealt = session.level().cloned();
        let script = "draw\nundo\nmove t1 t9\nhelp\nquit\ndraw\n";
        let mut out = Vec::new();
        run(&mut session, &AppConfig::default(), script.as_bytes(), &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Seed 42"));
        assert!(text.contains("Move refused: no tableau column 8."));
        assert!(text.contains("Commands:"));
        // Nothing after quit ran.
        assert_eq!(session.level().cloned(), dealt);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn board_marks_face_down_and_category_cards() {
        let session = session();
        let view = view_model(&session).expect("view");
        let board = render_board(&view);
        assert!(board.contains("T1: ##"));
        assert!(board.lines().any(|line| line.starts_with("S1 (empty)")));
        assert!(board.contains(&format!("Stock {}", view.stock_count)));
    }
}
