use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::CommandContext;

#[derive(Debug, Args)]
pub struct MknlpArgs {
    /// Bot to configure
    pub bot: String,
    /// Provider config JSON file; defaults to an empty object
    pub config: Option<PathBuf>,
}

impl MknlpArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let config_json = read_config(self.config.as_deref())?;
        ctx.bot_client()?.install_nlp(&self.bot, &config_json)?;
        Ok(())
    }
}

pub(super) fn read_config(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => Ok("{}".to_string()),
    }
}
