use payoff_core::storage::BackupInfo;

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{positional, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "reset",
            "Delete every account (a backup is taken first)",
            "reset [--yes]",
            cmd_reset,
        ),
        CommandDefinition::new(
            "backup",
            "Snapshot the accounts, or list snapshots",
            "backup [note]|backup list",
            cmd_backup,
        ),
        CommandDefinition::new(
            "restore",
            "Replace the accounts with a snapshot",
            "restore <name|number> [--yes]",
            cmd_restore,
        ),
    ]
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.confirm_destructive(args, "Delete ALL accounts and history?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    let backup = context.tracker.reset_all()?;
    io::print_success("All accounts deleted.");
    if let Some(backup) = backup {
        io::print_info(format!("Previous data saved as `{}`.", backup.id));
    }
    Ok(())
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.first().is_some_and(|arg| arg.eq_ignore_ascii_case("list")) {
        return list_backups(context);
    }

    let note = (!args.is_empty()).then(|| args.join(" "));
    match context.tracker.backup(note.as_deref())? {
        Some(info) => io::print_success(format!("Backup created: {}", info.id)),
        None => io::print_warning("Nothing to back up yet."),
    }
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.tracker.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups found.");
        return Ok(());
    }

    output::section("Backups");
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Name"),
        TableColumn::left("Created"),
    ]);
    for (idx, backup) in backups.iter().enumerate() {
        table.push(vec![
            (idx + 1).to_string(),
            backup.id.clone(),
            backup.created_at.clone(),
        ]);
    }
    output::raw(table.render());
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let positional = positional(args);
    let reference = positional.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: restore <name|number> [--yes]".into())
    })?;
    let backup = find_backup(&context.tracker.list_backups()?, reference)
        .ok_or_else(|| CommandError::Message(format!("Backup `{}` not found.", reference)))?;

    if !context.confirm_destructive(
        args,
        &format!("Replace current accounts with `{}`?", backup.id),
    )? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    context.tracker.restore_backup(&backup)?;
    io::print_success(format!(
        "Restored {} account(s) from `{}`.",
        context.accounts().len(),
        backup.id
    ));
    Ok(())
}

/// Matches a 1-based list number, an exact name, or a name prefix.
fn find_backup(backups: &[BackupInfo], reference: &str) -> Option<BackupInfo> {
    if let Ok(index) = reference.parse::<usize>() {
        if index >= 1 && index <= backups.len() {
            return Some(backups[index - 1].clone());
        }
    }
    backups
        .iter()
        .find(|backup| backup.id == reference)
        .or_else(|| backups.iter().find(|backup| backup.id.starts_with(reference)))
        .cloned()
}
