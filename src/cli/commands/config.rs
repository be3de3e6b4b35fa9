use super::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or save the active configuration",
        "config <show|save|path>",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return context.show_config();
    };

    match action.to_lowercase().as_str() {
        "show" => context.show_config(),
        "save" => context.save_config(),
        "path" => context.show_config_path(),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}
