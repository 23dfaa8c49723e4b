use payoff_core::SummaryService;

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::format::format_rate;
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "dashboard",
            "Show totals, payoff priority and other liabilities",
            "dashboard",
            cmd_dashboard,
        ),
        CommandDefinition::new(
            "payoff",
            "Rank credit cards by interest rate (avalanche)",
            "payoff",
            cmd_payoff,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::dashboard(context.accounts());

    output::section("Overview");
    let mut tiles = Table::new(vec![
        TableColumn::left("Metric"),
        TableColumn::right("Amount"),
        TableColumn::left("Detail"),
    ]);
    for tile in &summary.tiles {
        tiles.push(vec![
            tile.title.to_string(),
            context.money(tile.value),
            tile.subtext.clone(),
        ]);
    }
    output::raw(tiles.render());

    print_payoff_order(context);
    print_other_liabilities(context);
    Ok(())
}

fn cmd_payoff(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_payoff_order(context);
    Ok(())
}

fn print_payoff_order(context: &ShellContext) {
    output::section("Credit Card Payoff Priority (Avalanche)");
    let ranking = SummaryService::avalanche_order(context.accounts());
    if ranking.is_empty() {
        io::print_info("No credit cards tracked.");
        return;
    }

    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Card").max_width(28),
        TableColumn::right("APR"),
        TableColumn::right("Balance"),
        TableColumn::left(""),
    ]);
    for rank in &ranking {
        table.push(vec![
            rank.rank.to_string(),
            rank.account.name.clone(),
            format_rate(rank.account.interest_rate),
            context.money(rank.account.current_balance()),
            if rank.is_priority() { "Priority".into() } else { String::new() },
        ]);
    }
    output::raw(table.render());
}

fn print_other_liabilities(context: &ShellContext) {
    output::section("Other Liabilities");
    let others = SummaryService::other_liabilities(context.accounts());
    if others.is_empty() {
        io::print_info("No other liabilities tracked.");
        return;
    }

    let mut table = Table::new(vec![
        TableColumn::left("Account").max_width(28),
        TableColumn::left("Type"),
        TableColumn::right("Rate"),
        TableColumn::right("Balance"),
    ]);
    for account in others {
        table.push(vec![
            account.name.clone(),
            account.account_type.label().to_string(),
            format_rate(account.interest_rate),
            context.money(account.current_balance()),
        ]);
    }
    output::raw(table.render());
}
