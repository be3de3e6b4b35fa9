use super::CommandDefinition;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io::parse_date;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "rooms",
        "Show the room catalog, optionally with availability on a date",
        "rooms [YYYY-MM-DD]",
        cmd_rooms,
    )]
}

fn cmd_rooms(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let date = args.first().map(|raw| parse_date(raw)).transpose()?;
    context.list_rooms(date)
}
