use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const HOME_ENV: &str = "PAYOFF_HOME";
pub const API_KEY_ENVS: [&str; 2] = ["PAYOFF_API_KEY", "API_KEY"];

const DEFAULT_DIR_NAME: &str = ".payoff";

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root for stored data. Defaults to `<base>/store`.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default)]
    pub advisor: AdvisorSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            backup_retention: Self::default_backup_retention(),
            advisor: AdvisorSettings::default(),
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn resolve_data_dir(&self, base: &std::path::Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("store"),
        }
    }

    /// Symbol shown in front of amounts; unknown codes are shown verbatim.
    pub fn currency_symbol(&self) -> String {
        match self.currency.to_ascii_uppercase().as_str() {
            "USD" | "CAD" | "AUD" => "$".into(),
            "EUR" => "€".into(),
            "GBP" => "£".into(),
            "JPY" => "¥".into(),
            other => format!("{} ", other),
        }
    }
}

/// Settings for the text-generation service behind the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    #[serde(default = "AdvisorSettings::default_model")]
    pub model: String,
    #[serde(default = "AdvisorSettings::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "AdvisorSettings::default_disable_thinking")]
    pub disable_thinking: bool,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            endpoint: Self::default_endpoint(),
            disable_thinking: Self::default_disable_thinking(),
        }
    }
}

impl AdvisorSettings {
    pub fn default_model() -> String {
        "gemini-3-flash-preview".into()
    }

    pub fn default_endpoint() -> String {
        "https://generativelanguage.googleapis.com/v1beta".into()
    }

    pub fn default_disable_thinking() -> bool {
        true
    }
}

/// `PAYOFF_HOME` when set, otherwise `~/.payoff`.
pub fn resolve_base_dir() -> PathBuf {
    if let Some(dir) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Process-level default credential, if one is exported.
pub fn env_api_key() -> Option<String> {
    API_KEY_ENVS.iter().find_map(|name| {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
