//! Shell state, dispatch and error reporting.

use std::{io, path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tokio::{
    runtime::{Builder, Runtime},
    task::JoinHandle,
};
use tracing::warn;

use payoff_advisor::{DebtAdvisor, GeminiClient};
use payoff_config::{env_api_key, resolve_base_dir, Config, ConfigError, ConfigManager};
use payoff_core::{AccountService, CoreError, Tracker};
use payoff_domain::Account;
use payoff_storage_json::{JsonStore, StoragePaths};

use crate::cli::commands::{self, CommandDefinition, CommandRegistry};
use crate::cli::format::format_money;
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::errors::{AppError, CliError};

pub const CONFIRM_FLAG: &str = "--yes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Account `{0}` not found. Use `account list` to see accounts.")]
    AccountNotFound(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::App(AppError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::App(AppError::from(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::App(inner) => CliError::App(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// An advisory request running on the shell's runtime.
pub(crate) struct PendingAdvice {
    pub handle: JoinHandle<String>,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub advisor: DebtAdvisor,
    pub(crate) runtime: Runtime,
    pub(crate) pending_advice: Option<PendingAdvice>,
    pub last_advice: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, resolve_base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "configuration unreadable, using defaults");
                Config::default()
            }
        };

        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let store = JsonStore::with_retention(
            StoragePaths {
                data_root: config_manager.data_dir(&config),
                backup_root: config_manager.backup_dir(&config),
            },
            config.backup_retention,
        )?;
        let tracker = Tracker::open(Box::new(store));
        let advisor = build_advisor(&config);

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|err| AppError::Runtime(err.to_string()))?;

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            tracker,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            advisor,
            runtime,
            pending_advice: None,
            last_advice: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        if self.pending_advice.is_some() {
            "payoff (analyzing…)> ".into()
        } else {
            "payoff> ".into()
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|def| def.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other),
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    /// Destructive commands need `--yes` in script mode; interactively the
    /// user is asked unless the flag was passed.
    pub(crate) fn confirm_destructive(
        &self,
        args: &[&str],
        prompt: &str,
    ) -> Result<bool, CommandError> {
        if args.iter().any(|arg| *arg == CONFIRM_FLAG) {
            return Ok(true);
        }
        if !self.can_prompt() {
            cli_io::print_warning(format!(
                "Confirmation required. Re-run with `{}` to proceed.",
                CONFIRM_FLAG
            ));
            return Ok(false);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn accounts(&self) -> &[Account] {
        self.tracker.accounts()
    }

    pub(crate) fn resolve_account(&self, reference: &str) -> Result<String, CommandError> {
        AccountService::resolve(self.tracker.portfolio(), reference)
            .ok_or_else(|| CommandError::AccountNotFound(reference.to_string()))
    }

    pub(crate) fn money(&self, value: f64) -> String {
        format_money(value, &self.config.currency_symbol())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Rebuilds the advisor after its settings changed.
    pub(crate) fn refresh_advisor(&mut self) {
        self.advisor = build_advisor(&self.config);
    }
}

fn build_advisor(config: &Config) -> DebtAdvisor {
    let client = GeminiClient::new(
        config.advisor.endpoint.clone(),
        config.advisor.model.clone(),
        config.advisor.disable_thinking,
    );
    DebtAdvisor::new(Arc::new(client), env_api_key())
}

/// Strips the confirmation flag from positional arguments.
pub(crate) fn positional<'a>(args: &[&'a str]) -> Vec<&'a str> {
    args.iter()
        .copied()
        .filter(|arg| *arg != CONFIRM_FLAG)
        .collect()
}

#[cfg(test)]
pub(crate) fn process_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = crate::cli::shell::parse_command_line(line)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

#[cfg(test)]
pub(crate) fn script_context(base: &std::path::Path) -> ShellContext {
    ShellContext::with_base_dir(CliMode::Script, base.to_path_buf()).expect("shell context")
}
