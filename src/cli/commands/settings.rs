use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::mask_secret;
use crate::cli::io;

const USAGE: &str = "key <set [value]|clear|show>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "key",
        "Manage the Gemini API key used by the advisor",
        USAGE,
        cmd_key,
    )]
}

fn cmd_key(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("set") => {
            let value = match args.get(1) {
                Some(value) => value.to_string(),
                None if context.can_prompt() => {
                    io::prompt_secret(&context.theme, "Gemini API key")?
                }
                None => {
                    return Err(CommandError::InvalidArguments("usage: key set <value>".into()))
                }
            };
            context.tracker.set_credential(Some(&value))?;
            if value.trim().is_empty() {
                io::print_info("API key cleared.");
            } else {
                io::print_success("API key saved.");
            }
            Ok(())
        }
        Some("clear") => {
            context.tracker.set_credential(None)?;
            io::print_info("API key cleared.");
            Ok(())
        }
        Some("show") | None => {
            match context.tracker.credential()? {
                Some(key) => io::print_info(format!("API key: {}", mask_secret(&key))),
                None => io::print_info("No API key stored."),
            }
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown key action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}
