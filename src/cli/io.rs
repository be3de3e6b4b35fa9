use std::fmt;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::booking::RoomClass;
use crate::cli::core::CommandError;
use crate::cli::output;
use crate::config::Config;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Applies display preferences from the loaded configuration.
pub fn apply_config(config: &Config) {
    output::set_preferences(output::OutputPreferences {
        color_enabled: config.ui_color_enabled,
    });
}

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Parses an ISO `YYYY-MM-DD` date argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (expected YYYY-MM-DD)", raw))
    })
}

pub fn parse_room_class(raw: &str) -> Result<RoomClass, CommandError> {
    raw.parse::<RoomClass>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

pub fn select_room_class(theme: &ColorfulTheme) -> Result<RoomClass, CommandError> {
    let labels: Vec<&str> = RoomClass::ALL.iter().map(RoomClass::label).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Room type")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(RoomClass::ALL[index])
}

/// Prompt for a date, re-asking until the input parses.
pub fn prompt_date(
    theme: &ColorfulTheme,
    prompt: &str,
    default: NaiveDate,
) -> Result<NaiveDate, CommandError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
        .default(default.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_date(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    parse_date(&raw)
}
