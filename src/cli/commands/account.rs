use chrono::Local;

use payoff_core::{AccountService, NewAccount, SummaryService};
use payoff_domain::{AccountType, Displayable};

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{positional, CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_date, format_rate, parse_date};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "account <add <name> <type> <rate> <balance> [date]|list|show <account>|delete <account> [--yes]>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "account",
        "Add, list, inspect or delete liability accounts",
        USAGE,
        cmd_account,
    )]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(sub) = args.first() else {
        return list_accounts(context);
    };
    let rest = &args[1..];
    match sub.to_lowercase().as_str() {
        "add" | "new" => add_account(context, rest),
        "list" | "ls" => list_accounts(context),
        "show" => show_account(context, rest),
        "delete" | "remove" | "rm" => delete_account(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown account action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn add_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = if args.is_empty() && context.can_prompt() {
        prompt_new_account(context)?
    } else {
        draft_from_args(args)?
    };

    match context.tracker.create_account(&draft)? {
        Some(_) => {
            io::print_success(format!(
                "Account `{}` added with balance {}.",
                draft.name.trim(),
                context.money(draft.initial_balance.unwrap_or_default())
            ));
        }
        None => {
            io::print_warning("Account not added: name, interest rate and balance are required.");
        }
    }
    Ok(())
}

fn draft_from_args(args: &[&str]) -> Result<NewAccount, CommandError> {
    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(
            "usage: account add <name> <credit_card|loan|mortgage|other> <rate> <balance> [YYYY-MM-DD]"
                .into(),
        ));
    }
    let account_type = args[1]
        .parse::<AccountType>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let date = match args.get(4) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    Ok(NewAccount::from_input(args[0], account_type, args[2], args[3], date))
}

fn prompt_new_account(context: &ShellContext) -> Result<NewAccount, CommandError> {
    let name = io::prompt_text(&context.theme, "Account name", None)?;
    let labels: Vec<&str> = AccountType::ALL.iter().map(|kind| kind.label()).collect();
    let choice = io::select_option(&context.theme, "Type", &labels)?;
    let account_type = AccountType::ALL
        .get(choice)
        .copied()
        .unwrap_or(AccountType::CreditCard);
    let rate = io::prompt_text(&context.theme, "Interest rate (%)", None)?;
    let balance = io::prompt_text(&context.theme, "Current balance", None)?;
    let today = format_date(Local::now().date_naive());
    let date = io::prompt_text(&context.theme, "As of (YYYY-MM-DD)", Some(&today))?;
    Ok(NewAccount::from_input(
        &name,
        account_type,
        &rate,
        &balance,
        parse_date(&date)?,
    ))
}

fn list_accounts(context: &mut ShellContext) -> CommandResult {
    let accounts = AccountService::list(context.tracker.portfolio());
    if accounts.is_empty() {
        io::print_info("No accounts tracked. Use `account add` to create one.");
        return Ok(());
    }

    output::section("Accounts");
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Name").max_width(28),
        TableColumn::left("Type"),
        TableColumn::right("Rate"),
        TableColumn::right("Balance"),
        TableColumn::right("Entries"),
        TableColumn::left("Since"),
    ]);
    for (idx, account) in accounts.iter().enumerate() {
        table.push(vec![
            (idx + 1).to_string(),
            account.name.clone(),
            account.account_type.label().to_string(),
            format_rate(account.interest_rate),
            context.money(account.current_balance()),
            account.history.len().to_string(),
            account
                .first_entry()
                .map(|entry| format_date(entry.date))
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    output::raw(table.render());
    io::print_info(format!(
        "Total liabilities: {}",
        context.money(SummaryService::total_liabilities(context.accounts()))
    ));
    Ok(())
}

fn show_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: account show <account>".into()))?;
    let id = context.resolve_account(reference)?;
    let Some(account) = context.tracker.portfolio().account(&id) else {
        return Err(CommandError::AccountNotFound(reference.to_string()));
    };

    output::section(account.display_label());
    io::print_info(format!("  Id           : {}", account.id));
    io::print_info(format!("  Interest rate: {}", format_rate(account.interest_rate)));
    io::print_info(format!("  Current      : {}", context.money(account.current_balance())));

    let mut table = Table::new(vec![TableColumn::left("Date"), TableColumn::right("Balance")]);
    for entry in &account.history {
        table.push(vec![format_date(entry.date), context.money(entry.balance)]);
    }
    output::raw(table.render());
    Ok(())
}

fn delete_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let positional = positional(args);
    let reference = positional.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: account delete <account> [--yes]".into())
    })?;
    let id = context.resolve_account(reference)?;
    let name = context
        .tracker
        .portfolio()
        .account(&id)
        .map(|account| account.name.clone())
        .unwrap_or_default();

    if !context.confirm_destructive(args, &format!("Delete `{}` and its history?", name))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    if context.tracker.delete_account(&id)? {
        io::print_success(format!("Account `{}` deleted.", name));
    }
    Ok(())
}
