//! CLI subcommands. Each command parses its arguments, performs exactly
//! one client-level operation, and prints the result.

pub mod bots;
pub mod config;
pub mod conversations;
pub mod integrations;
pub mod nlp;
pub mod users;

use crate::client::{BotClient, IntegrationClient};
use crate::config::{ConfigStore, PlatformEnvironment};
use crate::error::BotControlError;
use crate::gateway::{Gateway, GatewayConfig};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Per-invocation state threaded into every command: the loaded config
/// store and the effective platform environment.
pub struct CommandContext {
    pub store: ConfigStore,
    pub environment: PlatformEnvironment,
}

impl CommandContext {
    pub fn load(environment: Option<PlatformEnvironment>) -> anyhow::Result<Self> {
        let store = ConfigStore::load()?;
        let environment = match environment {
            Some(environment) => environment,
            None => store.environment()?,
        };
        Ok(Self { store, environment })
    }

    pub fn bot_client(&self) -> Result<BotClient, BotControlError> {
        let config = GatewayConfig::cms(&self.store, self.environment)?;
        Ok(BotClient::new(Gateway::new(config)))
    }

    pub fn integration_client(&self) -> Result<IntegrationClient, BotControlError> {
        let config = GatewayConfig::integrations(&self.store, self.environment)?;
        Ok(IntegrationClient::new(Gateway::new(config)))
    }
}
