use super::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "book",
            "Book the first free room of a type",
            "book <single|double> <YYYY-MM-DD>",
            cmd_book,
        ),
        CommandDefinition::new(
            "cancel",
            "Cancel a reservation by room type, number, and date",
            "cancel <single|double> <room-number> <YYYY-MM-DD>",
            cmd_cancel,
        ),
        CommandDefinition::new(
            "list",
            "List reservations in booking order",
            "list",
            cmd_list,
        ),
    ]
}

fn cmd_book(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 2 {
        return Err(CommandError::InvalidArguments(
            "usage: book <single|double> <YYYY-MM-DD>".into(),
        ));
    }
    let class = context.resolve_room_class(args.first().copied())?;
    let date = context.resolve_date(
        args.get(1).copied(),
        "Stay date",
        context.first_bookable_date(),
    )?;
    context.book(class, date)
}

fn cmd_cancel(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 3 {
        return Err(CommandError::InvalidArguments(
            "usage: cancel <single|double> <room-number> <YYYY-MM-DD>".into(),
        ));
    }
    let class = context.resolve_room_class(args.first().copied())?;
    let room_number = context.resolve_room_number(args.get(1).copied())?;
    let date = context.resolve_date(
        args.get(2).copied(),
        "Reservation date",
        context.first_cancellable_date(),
    )?;
    context.cancel(class, &room_number, date)
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.list_reservations()
}
