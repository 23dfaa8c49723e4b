use chrono::Local;

use payoff_core::parse_amount;

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_date, parse_date};
use crate::cli::io;

const USAGE: &str = "balance <account> <amount> [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "balance",
        "Record an account balance on a date (defaults to today)",
        USAGE,
        cmd_balance,
    )]
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (reference, raw_amount) = match args {
        [reference, amount, ..] => (*reference, *amount),
        _ => return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    };
    let id = context.resolve_account(reference)?;
    let Some(amount) = parse_amount(raw_amount) else {
        io::print_warning(format!("Balance not recorded: `{}` is not an amount.", raw_amount));
        return Ok(());
    };
    let date = match args.get(2) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    if context.tracker.record_balance(&id, amount, date)? {
        let account = context.tracker.portfolio().account(&id);
        let name = account.map(|a| a.name.as_str()).unwrap_or_default();
        let current = account.map(|a| a.current_balance()).unwrap_or_default();
        io::print_success(format!(
            "Recorded {} for `{}` on {}.",
            context.money(amount),
            name,
            format_date(date)
        ));
        io::print_info(format!("Current balance: {}", context.money(current)));
    }
    Ok(())
}
