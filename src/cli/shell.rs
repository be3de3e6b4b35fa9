use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::booking::RoomClass;
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::io::{print_info, print_warning};

pub const SCRIPT_ENV: &str = "HOTEL_BOOKING_CLI_SCRIPT";

const CONFIG_ACTIONS: [&str; 3] = ["show", "save", "path"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_ENV) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "starting shell");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<BookingCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(BookingCompleter::from_context(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    print_info(format!(
        "Welcome to {}. Type `help` to see available commands.",
        context.ledger.hotel().name
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                execute_line(context, line)?;
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    context.running = false;
                }
            }
            Err(ReadlineError::Eof) => {
                print_info("Exiting shell.");
                context.running = false;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let mut lines = io::stdin().lock().lines();
    while context.running {
        let Some(line) = lines.next() else {
            break;
        };
        execute_line(context, &line?)?;
    }
    Ok(())
}

/// Runs one shell line. Command failures are reported and the shell keeps going;
/// only failures of the terminal itself are returned.
fn execute_line(context: &mut ShellContext, line: &str) -> Result<(), CliError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            print_warning(&err.message);
            return Ok(());
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(());
    };
    if raw.starts_with('#') {
        return Ok(());
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(LoopControl::Continue) => Ok(()),
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(())
        }
        Err(err) => context.report_error(err),
    }
}

/// Tab completion that knows the command words, the room classes and the
/// room numbers of the loaded hotel.
struct BookingCompleter {
    commands: Vec<String>,
    rooms: Vec<(RoomClass, String)>,
}

impl BookingCompleter {
    fn new(names: Vec<&'static str>, rooms: Vec<(RoomClass, String)>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands, rooms }
    }

    fn from_context(context: &ShellContext) -> Self {
        let rooms = context
            .ledger
            .hotel()
            .rooms()
            .iter()
            .map(|room| (room.class, room.number.to_string()))
            .collect();
        Self::new(context.command_names(), rooms)
    }

    /// Returns the byte offset the candidates replace from and the candidates
    /// for the word under the cursor at the end of `before_cursor`.
    fn suggest(&self, before_cursor: &str) -> (usize, Vec<String>) {
        let start = before_cursor
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = before_cursor[start..].to_ascii_lowercase();
        let words: Vec<&str> = before_cursor[..start].split_whitespace().collect();

        let pool: Vec<String> = match words.as_slice() {
            [] => self.commands.clone(),
            [command] => match command.to_ascii_lowercase().as_str() {
                "book" | "cancel" => RoomClass::ALL
                    .iter()
                    .map(|class| class.label().to_string())
                    .collect(),
                "help" => self.commands.clone(),
                "config" => CONFIG_ACTIONS.iter().map(|action| action.to_string()).collect(),
                _ => Vec::new(),
            },
            [command, class] if command.eq_ignore_ascii_case("cancel") => {
                let class = class.parse::<RoomClass>().ok();
                let mut numbers: Vec<String> = self
                    .rooms
                    .iter()
                    .filter(|(room_class, _)| class.map_or(true, |wanted| wanted == *room_class))
                    .map(|(_, number)| number.clone())
                    .collect();
                numbers.dedup();
                numbers
            }
            _ => Vec::new(),
        };

        let candidates = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .collect();
        (start, candidates)
    }
}

impl Helper for BookingCompleter {}

impl Completer for BookingCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.suggest(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for BookingCompleter {
    type Hint = String;
}

impl Highlighter for BookingCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for BookingCompleter {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug, Clone)]
pub(crate) struct ParseError {
    pub(crate) message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> BookingCompleter {
        BookingCompleter::new(
            vec!["book", "cancel", "list", "rooms", "config", "help", "exit"],
            vec![
                (RoomClass::Single, "101".to_string()),
                (RoomClass::Single, "102".to_string()),
                (RoomClass::Double, "201".to_string()),
            ],
        )
    }

    #[test]
    fn parse_command_line_honours_quotes() {
        let tokens = parse_command_line("cancel single \"101\" 2024-06-01").unwrap();
        assert_eq!(tokens, vec!["cancel", "single", "101", "2024-06-01"]);
    }

    #[test]
    fn parse_command_line_reports_unbalanced_quotes() {
        let err = parse_command_line("cancel single \"101").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn completes_command_words() {
        assert_eq!(completer().suggest("c"), (0, vec!["cancel".into(), "config".into()]));
        assert_eq!(completer().suggest("EX"), (0, vec!["exit".into()]));
    }

    #[test]
    fn completes_room_class_after_book_and_cancel() {
        let completer = completer();
        assert_eq!(
            completer.suggest("book "),
            (5, vec!["single".into(), "double".into()])
        );
        assert_eq!(completer.suggest("cancel d"), (7, vec!["double".into()]));
        assert_eq!(completer.suggest("list "), (5, Vec::<String>::new()));
    }

    #[test]
    fn completes_room_numbers_of_the_chosen_class_for_cancel() {
        let completer = completer();
        assert_eq!(
            completer.suggest("cancel single "),
            (14, vec!["101".into(), "102".into()])
        );
        assert_eq!(completer.suggest("cancel double 2"), (14, vec!["201".into()]));
        assert_eq!(completer.suggest("book single 1"), (12, Vec::<String>::new()));
    }

    #[test]
    fn unknown_class_offers_every_room_number() {
        assert_eq!(
            completer().suggest("cancel suite "),
            (13, vec!["101".into(), "102".into(), "201".into()])
        );
    }

    #[test]
    fn completes_config_actions() {
        assert_eq!(completer().suggest("config s"), (7, vec!["show".into(), "save".into()]));
    }

    #[test]
    fn command_names_are_lowercased_and_deduplicated() {
        let completer = BookingCompleter::new(vec!["Book", "book", "cancel"], Vec::new());
        assert_eq!(completer.commands, vec!["book", "cancel"]);
    }
}
