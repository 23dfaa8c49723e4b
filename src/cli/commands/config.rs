use std::path::PathBuf;

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, OutputPreferences};

const KEYS: &str = "currency|color|retention|model|endpoint|thinking|data_dir";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    if !args[0].eq_ignore_ascii_case("set") || args.len() < 3 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: config set <{}> <value>",
            KEYS
        )));
    }
    let key = args[1].to_lowercase();
    let value = args[2..].join(" ");
    set_value(context, &key, value.trim())?;
    context.persist_config()?;
    io::print_success(format!("Updated `{}`.", key));
    if matches!(key.as_str(), "retention" | "data_dir") {
        io::print_hint("Storage changes take effect the next time the shell starts.");
    }
    Ok(())
}

fn show_config(context: &ShellContext) {
    let cfg = &context.config;
    output::section("Configuration");
    io::print_info(format!("  File       : {}", context.config_manager.config_path().display()));
    io::print_info(format!("  Currency   : {} ({})", cfg.currency, cfg.currency_symbol().trim()));
    io::print_info(format!("  Color      : {}", on_off(cfg.ui_color_enabled)));
    io::print_info(format!("  Data dir   : {}", context.config_manager.data_dir(cfg).display()));
    io::print_info(format!("  Retention  : {} backups", cfg.backup_retention));
    io::print_info(format!("  Model      : {}", cfg.advisor.model));
    io::print_info(format!("  Endpoint   : {}", cfg.advisor.endpoint));
    io::print_info(format!("  Thinking   : {}", on_off(!cfg.advisor.disable_thinking)));
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let cfg = &mut context.config;
    match key {
        "currency" => cfg.currency = value.to_ascii_uppercase(),
        "color" => {
            cfg.ui_color_enabled = parse_bool(value)?;
            output::set_preferences(OutputPreferences {
                color_enabled: cfg.ui_color_enabled && context.can_prompt(),
            });
        }
        "retention" => {
            cfg.backup_retention = value
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments("retention must be a positive number".into())
                })?;
        }
        "data_dir" => {
            cfg.data_dir = (!value.is_empty() && value != "default").then(|| PathBuf::from(value));
        }
        "model" => {
            cfg.advisor.model = value.to_string();
            context.refresh_advisor();
        }
        "endpoint" => {
            cfg.advisor.endpoint = value.to_string();
            context.refresh_advisor();
        }
        "thinking" => {
            cfg.advisor.disable_thinking = !parse_bool(value)?;
            context.refresh_advisor();
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}` (expected {})",
                other, KEYS
            )))
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on/off, got `{}`",
            other
        ))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
