use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::BotControlError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "BOTCTL_CONFIG";

/// A platform deployment the CLI can talk to.
///
/// Parsing is case-insensitive so both `prod/TOKEN` and `PROD/token`
/// address the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformEnvironment {
    Dev,
    Staging,
    Prod,
}

impl PlatformEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformEnvironment::Dev => "dev",
            PlatformEnvironment::Staging => "staging",
            PlatformEnvironment::Prod => "prod",
        }
    }
}

impl FromStr for PlatformEnvironment {
    type Err = BotControlError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "dev" => Ok(PlatformEnvironment::Dev),
            "staging" => Ok(PlatformEnvironment::Staging),
            "prod" => Ok(PlatformEnvironment::Prod),
            _ => Err(BotControlError::InvalidEnvironment(raw.to_string())),
        }
    }
}

impl fmt::Display for PlatformEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named slot in the config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformVariable {
    /// API token sent in the Authorization header.
    Token,
    /// Base URL of the CMS service.
    Cms,
    /// Base URL of the integrations manager service.
    IntegrationsManager,
}

impl PlatformVariable {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformVariable::Token => "token",
            PlatformVariable::Cms => "cms",
            PlatformVariable::IntegrationsManager => "integrations_manager",
        }
    }
}

impl FromStr for PlatformVariable {
    type Err = BotControlError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "token" => Ok(PlatformVariable::Token),
            "cms" => Ok(PlatformVariable::Cms),
            "integrations_manager" => Ok(PlatformVariable::IntegrationsManager),
            _ => Err(BotControlError::InvalidVariable(raw.to_string())),
        }
    }
}

impl fmt::Display for PlatformVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an `ENV/VARIABLE` token into its parts.
///
/// A bare `VARIABLE` resolves against `default_environment`.
pub fn parse_variable(
    default_environment: PlatformEnvironment,
    raw: &str,
) -> Result<(PlatformEnvironment, PlatformVariable), BotControlError> {
    match raw.split_once('/') {
        Some((prefix, rest)) => Ok((prefix.parse()?, rest.parse()?)),
        None => Ok((default_environment, raw.parse()?)),
    }
}

/// On-disk layout of the config file: a default environment plus one
/// table of variable values per environment.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    dev: BTreeMap<String, String>,
    #[serde(default)]
    staging: BTreeMap<String, String>,
    #[serde(default)]
    prod: BTreeMap<String, String>,
}

impl ConfigFile {
    fn table(&self, environment: PlatformEnvironment) -> &BTreeMap<String, String> {
        match environment {
            PlatformEnvironment::Dev => &self.dev,
            PlatformEnvironment::Staging => &self.staging,
            PlatformEnvironment::Prod => &self.prod,
        }
    }
}

/// Local store resolving `(environment, variable)` pairs to values.
///
/// Reads go through the typed [`ConfigFile`]; mutations re-edit the raw
/// TOML with `toml_edit` so user comments survive `config set`.
pub struct ConfigStore {
    path: PathBuf,
    text: String,
    file: ConfigFile,
}

impl ConfigStore {
    /// Load the store from `$BOTCTL_CONFIG`, falling back to
    /// `<config_dir>/botctl/config.toml`. A missing file is an empty store.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(config_path()?)
    }

    pub fn load_from(path: PathBuf) -> anyhow::Result<Self> {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        let file: ConfigFile = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(Self { path, text, file })
    }

    /// The default environment, `dev` when none is configured.
    pub fn environment(&self) -> Result<PlatformEnvironment, BotControlError> {
        match &self.file.environment {
            Some(name) => name.parse(),
            None => Ok(PlatformEnvironment::Dev),
        }
    }

    pub fn get(
        &self,
        environment: PlatformEnvironment,
        variable: PlatformVariable,
    ) -> Result<String, BotControlError> {
        self.file
            .table(environment)
            .get(variable.as_str())
            .cloned()
            .ok_or_else(|| BotControlError::MissingVariable {
                environment: environment.to_string(),
                variable: variable.to_string(),
            })
    }

    pub fn set(
        &mut self,
        environment: PlatformEnvironment,
        variable: PlatformVariable,
        value: &str,
    ) -> anyhow::Result<()> {
        self.edit(|doc| {
            doc[environment.as_str()][variable.as_str()] = toml_edit::value(value);
        })
    }

    /// Remove a value. Returns false if nothing was set.
    pub fn unset(
        &mut self,
        environment: PlatformEnvironment,
        variable: PlatformVariable,
    ) -> anyhow::Result<bool> {
        let mut removed = false;
        self.edit(|doc| {
            removed = doc
                .get_mut(environment.as_str())
                .and_then(toml_edit::Item::as_table_mut)
                .and_then(|table| table.remove(variable.as_str()))
                .is_some();
        })?;
        Ok(removed)
    }

    pub fn set_environment(&mut self, environment: PlatformEnvironment) -> anyhow::Result<()> {
        self.edit(|doc| {
            doc["environment"] = toml_edit::value(environment.as_str());
        })
    }

    /// Write the store back to disk, creating parent directories.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&self.path, &self.text)
            .with_context(|| format!("writing {}", self.path.display()))
    }

    fn edit(&mut self, apply: impl FnOnce(&mut toml_edit::DocumentMut)) -> anyhow::Result<()> {
        let mut doc: toml_edit::DocumentMut = self
            .text
            .parse()
            .with_context(|| format!("invalid config file {}", self.path.display()))?;
        apply(&mut doc);
        self.text = doc.to_string();
        self.file = toml::from_str(&self.text)
            .with_context(|| format!("invalid config file {}", self.path.display()))?;
        Ok(())
    }
}

fn config_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().context("could not determine the user config directory")?;
    Ok(base.join("botctl").join("config.toml"))
}
