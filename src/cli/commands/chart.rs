use payoff_core::{SeriesPoint, TimelineService, TrendSelection};

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{bar, format_date};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "chart <cards|breakdown|trend [all|<account>]>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "chart",
        "Show balance history: card totals, per-card breakdown or liability trend",
        USAGE,
        cmd_chart,
    )]
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("cards") => {
            let series = TimelineService::credit_card_series(context.accounts());
            print_series(context, "Total Credit Card Debt", &series);
            Ok(())
        }
        Some("breakdown") => print_breakdown(context),
        Some("trend") => {
            let (title, selection) = trend_selection(context, &args[1..])?;
            let series = TimelineService::liability_trend(context.accounts(), selection);
            print_series(context, &title, &series);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}

fn trend_selection(
    context: &ShellContext,
    args: &[&str],
) -> Result<(String, TrendSelection), CommandError> {
    match args.first() {
        None => Ok(("Liability Trend: All Liabilities".into(), TrendSelection::All)),
        Some(reference) if reference.eq_ignore_ascii_case("all") => {
            Ok(("Liability Trend: All Liabilities".into(), TrendSelection::All))
        }
        Some(reference) => {
            let id = context.resolve_account(reference)?;
            let name = context
                .tracker
                .portfolio()
                .account(&id)
                .map(|account| account.name.clone())
                .unwrap_or_default();
            Ok((format!("Liability Trend: {}", name), TrendSelection::Account(id)))
        }
    }
}

fn print_series(context: &ShellContext, title: &str, series: &[SeriesPoint]) {
    output::section(title);
    if series.is_empty() {
        io::print_info("No balance history to chart.");
        return;
    }

    let max = series.iter().map(|point| point.amount).fold(0.0, f64::max);
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("Amount"),
        TableColumn::left(""),
    ]);
    for point in series {
        table.push(vec![
            format_date(point.date),
            context.money(point.amount),
            bar(point.amount, max),
        ]);
    }
    output::raw(table.render());
}

fn print_breakdown(context: &ShellContext) -> CommandResult {
    output::section("Individual Credit Card Balances");
    let cards: Vec<_> = context
        .accounts()
        .iter()
        .filter(|account| account.is_credit_card())
        .collect();
    let points = TimelineService::card_breakdown(context.accounts());
    if points.is_empty() {
        io::print_info("No credit card history to chart.");
        return Ok(());
    }

    let mut columns = vec![TableColumn::left("Date")];
    columns.extend(
        cards
            .iter()
            .map(|card| TableColumn::right(card.name.clone()).max_width(18)),
    );
    let mut table = Table::new(columns);
    for point in &points {
        let mut row = vec![format_date(point.date)];
        row.extend(cards.iter().map(|card| {
            point
                .value(&card.id)
                .map(|value| context.money(value))
                .unwrap_or_else(|| "-".into())
        }));
        table.push(row);
    }
    output::raw(table.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::{process_line, script_context};
    use tempfile::tempdir;

    #[test]
    fn trend_selection_resolves_accounts() {
        let temp = tempdir().unwrap();
        let context = script_context(temp.path());

        let (title, selection) = trend_selection(&context, &[]).unwrap();
        assert_eq!(selection, TrendSelection::All);
        assert!(title.ends_with("All Liabilities"));

        let (title, selection) = trend_selection(&context, &["auto loan"]).unwrap();
        assert_eq!(
            selection,
            TrendSelection::Account(context.accounts()[1].id.clone())
        );
        assert_eq!(title, "Liability Trend: Auto Loan");

        assert!(trend_selection(&context, &["99"]).is_err());
    }

    #[test]
    fn every_chart_renders() {
        let temp = tempdir().unwrap();
        let mut context = script_context(temp.path());
        for line in ["chart cards", "chart breakdown", "chart trend", "chart trend 2"] {
            process_line(&mut context, line).unwrap();
        }
        assert!(process_line(&mut context, "chart pie").is_err());
    }
}
