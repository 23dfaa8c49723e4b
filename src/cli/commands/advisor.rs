use tracing::{debug, error};

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, PendingAdvice, ShellContext};
use crate::cli::io;
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "advise",
            "Ask the AI advisor to analyze your debts (runs in the background)",
            "advise",
            cmd_advise,
        ),
        CommandDefinition::new(
            "advice",
            "Show the latest analysis, or wait for the pending one",
            "advice [wait]",
            cmd_advice,
        ),
    ]
}

/// Starts an advisory request against a snapshot of the current accounts.
/// Later edits do not affect a request that is already running.
fn cmd_advise(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.pending_advice.is_some() {
        io::print_warning("An analysis is already running. Use `advice wait` to see it.");
        return Ok(());
    }

    let snapshot = context.tracker.snapshot();
    let credential = context.tracker.credential()?;
    let advisor = context.advisor.clone();
    let handle = context
        .runtime
        .spawn(async move { advisor.get_advice(&snapshot, credential.as_deref()).await });
    context.pending_advice = Some(PendingAdvice { handle });
    debug!("advisory request started");

    io::print_info("Analyzing your debts… keep working; the result will appear when ready.");
    Ok(())
}

fn cmd_advice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("wait") => {
            if !wait_for_advice(context) {
                show_last_advice(context);
            }
            Ok(())
        }
        None => {
            if context.pending_advice.is_some() && !poll_advice(context) {
                io::print_info("Analysis still running. Use `advice wait` to block until it finishes.");
                return Ok(());
            }
            show_last_advice(context);
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown advice action `{}`; usage: advice [wait]",
            other
        ))),
    }
}

fn show_last_advice(context: &ShellContext) {
    match &context.last_advice {
        Some(text) => print_advice(text),
        None => io::print_info("No analysis yet. Use `advise` to request one."),
    }
}

fn print_advice(text: &str) {
    output::section("AI Debt Advisor");
    output::raw(text.trim_end());
}

/// Prints the pending result if it has arrived. Returns whether it did.
pub(crate) fn poll_advice(context: &mut ShellContext) -> bool {
    let finished = context
        .pending_advice
        .as_ref()
        .is_some_and(|pending| pending.handle.is_finished());
    finished && wait_for_advice(context)
}

/// Blocks until the pending request completes. Returns false when nothing
/// was pending.
pub(crate) fn wait_for_advice(context: &mut ShellContext) -> bool {
    let Some(pending) = context.pending_advice.take() else {
        return false;
    };
    let text = match context.runtime.block_on(pending.handle) {
        Ok(text) => text,
        Err(err) => {
            error!(error = %err, "advisory task did not complete");
            payoff_advisor::FAILURE_MESSAGE.to_string()
        }
    };
    print_advice(&text);
    context.last_advice = Some(text);
    true
}
