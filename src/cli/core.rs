//! Core CLI dispatch, shell context, and the booking actions behind each command.

use std::{io, sync::Arc};

use chrono::{Days, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    booking::{BookingLedger, Priced, Reservation, RoomClass},
    config::{Config, ConfigManager},
    currency::{format_price, CurrencyCode},
    errors::BookingError,
    time::{Clock, SystemClock},
};

pub use crate::errors::CliError;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Shared runtime state for one shell session.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: BookingLedger,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub currency: CurrencyCode,
    pub theme: ColorfulTheme,
    pub clock: Arc<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self::from_parts(
            mode,
            config,
            config_manager,
            Arc::new(SystemClock),
        ))
    }

    /// Builds the hotel and ledger described by `config` and replays its seed bookings.
    pub fn from_parts(
        mode: CliMode,
        config: Config,
        config_manager: ConfigManager,
        clock: Arc<dyn Clock>,
    ) -> Self {
        cli_io::apply_config(&config);

        let hotel = Arc::new(config.build_hotel());
        let mut ledger = BookingLedger::with_clock(hotel, Arc::clone(&clock));
        for seed in config.apply_seed_reservations(&mut ledger) {
            tracing::warn!(class = %seed.class, date = %seed.date, "seed reservation skipped, no room free");
        }
        tracing::debug!(
            hotel = %ledger.hotel().name,
            rooms = ledger.hotel().room_count(),
            reservations = ledger.list_reservations().len(),
            "shell context ready"
        );

        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            ledger,
            currency: config.currency_code(),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            clock,
            running: true,
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt(&self) -> String {
        format!("{}> ", self.ledger.hotel().name)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self.registry.get(command).map(|definition| definition.handler);
        if let Some(handler) = handler {
            tracing::debug!(command, ?args, "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.message))?;
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    fn format_price(&self, price: u32) -> String {
        format_price(price, &self.currency)
    }

    /// Earliest date the shell offers for a new booking.
    pub(crate) fn first_bookable_date(&self) -> NaiveDate {
        let today = self.clock.today();
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }

    /// Stays can still be cancelled on the day itself.
    pub(crate) fn first_cancellable_date(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn resolve_room_class(&self, arg: Option<&str>) -> Result<RoomClass, CommandError> {
        match arg {
            Some(raw) => cli_io::parse_room_class(raw),
            None if self.can_prompt() => cli_io::select_room_class(&self.theme),
            None => Err(CommandError::InvalidArguments(
                "room type is required (single or double)".into(),
            )),
        }
    }

    pub(crate) fn resolve_date(
        &self,
        arg: Option<&str>,
        prompt: &str,
        default: NaiveDate,
    ) -> Result<NaiveDate, CommandError> {
        match arg {
            Some(raw) => cli_io::parse_date(raw),
            None if self.can_prompt() => cli_io::prompt_date(&self.theme, prompt, default),
            None => Err(CommandError::InvalidArguments(
                "date is required (YYYY-MM-DD)".into(),
            )),
        }
    }

    pub(crate) fn resolve_room_number(&self, arg: Option<&str>) -> Result<String, CommandError> {
        let raw = match arg {
            Some(raw) => raw.to_string(),
            None if self.can_prompt() => cli_io::prompt_text(&self.theme, "Room number")?,
            None => String::new(),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidArguments(
                "room number is required".into(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub(crate) fn book(&mut self, class: RoomClass, date: NaiveDate) -> CommandResult {
        if self.config.enforce_future_dates && !self.ledger.is_valid_date(date) {
            return Err(CommandError::InvalidArguments(format!(
                "{} is not bookable; choose a date after today",
                date
            )));
        }

        match self.ledger.book_room(class, date) {
            Some(price) => {
                tracing::info!(%class, %date, price, "room booked");
                if let Some(reservation) = self.ledger.list_reservations().last() {
                    cli_io::print_success(self.booking_message(reservation));
                }
            }
            None => {
                tracing::debug!(%class, %date, "no room available");
                cli_io::print_warning(format!("No {} room is available on {}.", class, date));
            }
        }
        Ok(())
    }

    pub(crate) fn booking_message(&self, reservation: &Reservation) -> String {
        format!(
            "Booked {} room {} for {}. Price: {}",
            reservation.room_class(),
            reservation.room_number(),
            reservation.date(),
            self.format_price(reservation.price())
        )
    }

    pub(crate) fn cancel(
        &mut self,
        class: RoomClass,
        room_number: &str,
        date: NaiveDate,
    ) -> CommandResult {
        if self.ledger.cancel_reservation(class, room_number, date) {
            tracing::info!(%class, room = room_number, %date, "reservation cancelled");
            cli_io::print_success(format!(
                "Reservation for {} room {} on {} cancelled.",
                class, room_number, date
            ));
        } else {
            cli_io::print_warning(format!(
                "No reservation found for {} room {} on {}.",
                class, room_number, date
            ));
        }
        Ok(())
    }

    pub(crate) fn list_reservations(&self) -> CommandResult {
        let reservations = self.ledger.list_reservations();
        output::section(format!("Reservations ({})", reservations.len()));
        if reservations.is_empty() {
            cli_io::print_info("No reservations.");
            return Ok(());
        }
        for (idx, reservation) in reservations.iter().enumerate() {
            output::line(format!(
                "  {:>3}. Room: {}, Date: {} ({}, {})",
                idx + 1,
                reservation.room_number(),
                reservation.date(),
                reservation.room_class(),
                self.format_price(reservation.price())
            ));
        }
        Ok(())
    }

    pub(crate) fn list_rooms(&self, date: Option<NaiveDate>) -> CommandResult {
        let hotel = self.ledger.hotel();
        match date {
            Some(date) => output::section(format!("{} rooms on {}", hotel.name, date)),
            None => output::section(format!("{} rooms", hotel.name)),
        }
        if hotel.rooms().is_empty() {
            cli_io::print_info("No rooms in the catalog.");
            return Ok(());
        }
        for room in hotel.rooms() {
            let mut row = format!(
                "  {:>5}  {:<7} {:>12}",
                room.number,
                room.class.label(),
                self.format_price(room.price())
            );
            if let Some(date) = date {
                let status = if self.ledger.is_room_available(room, date) {
                    "available"
                } else {
                    "booked"
                };
                row.push_str("  ");
                row.push_str(status);
            }
            output::line(row);
        }
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        cli_io::print_info(format!("  Locale         : {}", self.config.locale));
        cli_io::print_info(format!("  Currency       : {}", self.currency.as_str()));
        cli_io::print_info(format!("  Colors         : {}", self.config.ui_color_enabled));
        cli_io::print_info(format!(
            "  Future dates   : {}",
            if self.config.enforce_future_dates {
                "required"
            } else {
                "not checked"
            }
        ));
        cli_io::print_info(format!("  Hotel          : {}", self.config.hotel.name));
        cli_io::print_info(format!("  Rooms          : {}", self.config.hotel.rooms.len()));
        cli_io::print_info(format!(
            "  Seed bookings  : {}",
            self.config.seed_reservations.len()
        ));
        Ok(())
    }

    pub(crate) fn save_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        cli_io::print_success(format!(
            "Configuration saved to {}",
            self.config_manager.path().display()
        ));
        Ok(())
    }

    pub(crate) fn show_config_path(&self) -> CommandResult {
        cli_io::print_info(self.config_manager.path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use tempfile::TempDir;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn context(enforce_future_dates: bool) -> (ShellContext, TempDir) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            enforce_future_dates,
            ui_color_enabled: false,
            seed_reservations: Vec::new(),
            ..Config::default()
        };
        let clock = Arc::new(FixedClock::new(date(2024, 5, 1)));
        (
            ShellContext::from_parts(CliMode::Script, config, manager, clock),
            dir,
        )
    }

    #[test]
    fn book_and_cancel_commands_drive_the_ledger() {
        let (mut ctx, _dir) = context(true);

        ctx.process_line("book single 2024-06-01").unwrap();
        ctx.process_line("book single 2024-06-01").unwrap();
        ctx.process_line("book single 2024-06-01").unwrap();
        assert_eq!(ctx.ledger.list_reservations().len(), 2);

        ctx.process_line("cancel single 101 2024-06-01").unwrap();
        let remaining: Vec<u32> = ctx
            .ledger
            .list_reservations()
            .iter()
            .map(|reservation| reservation.room_number())
            .collect();
        assert_eq!(remaining, vec![102]);
    }

    #[test]
    fn past_dates_are_rejected_when_enforced() {
        let (mut ctx, _dir) = context(true);

        let err = ctx.process_line("book double 2024-05-01").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(ctx.ledger.list_reservations().is_empty());
    }

    #[test]
    fn past_dates_pass_through_when_not_enforced() {
        let (mut ctx, _dir) = context(false);

        ctx.process_line("book double 2024-04-01").unwrap();
        assert_eq!(ctx.ledger.list_reservations().len(), 1);
    }

    #[test]
    fn script_mode_requires_arguments() {
        let (mut ctx, _dir) = context(true);

        let err = ctx.process_line("book").unwrap_err();
        assert!(err.to_string().contains("room type"));

        let err = ctx.process_line("cancel single \"\" 2024-06-01").unwrap_err();
        assert!(err.to_string().contains("room number"));
    }

    #[test]
    fn invalid_date_and_class_are_reported() {
        let (mut ctx, _dir) = context(true);

        let err = ctx.process_line("book single 06/01/2024").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = ctx.process_line("book suite 2024-06-01").unwrap_err();
        assert!(err.to_string().contains("suite"));
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut ctx, _dir) = context(true);
        assert_eq!(ctx.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(ctx.process_line("boook").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn prompt_defaults_differ_for_booking_and_cancelling() {
        let (ctx, _dir) = context(true);
        assert_eq!(ctx.first_bookable_date(), date(2024, 5, 2));
        assert_eq!(ctx.first_cancellable_date(), date(2024, 5, 1));
    }

    #[test]
    fn booking_message_names_class_room_and_date() {
        let (mut ctx, _dir) = context(true);
        ctx.process_line("book double 2024-06-03").unwrap();
        let reservation = ctx.ledger.list_reservations()[0];
        assert_eq!(reservation.room_number(), 201);
        assert_eq!(
            ctx.booking_message(&reservation),
            "Booked double room 201 for 2024-06-03. Price: 8 000 Ft"
        );
    }

    #[test]
    fn config_save_writes_file() {
        let (mut ctx, _dir) = context(true);
        ctx.process_line("config save").unwrap();
        assert!(ctx.config_manager.path().exists());
    }
}
