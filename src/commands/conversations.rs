use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::CommandContext;

#[derive(Debug, Args)]
pub struct MkconversationArgs {
    /// Bot to upload the script to
    pub bot: String,
    /// Script file; reads stdin when omitted
    pub file: Option<PathBuf>,
}

impl MkconversationArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let script = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("reading script from stdin")?;
                buffer
            }
        };
        ctx.bot_client()?.post_conversation(&self.bot, &script)?;
        println!("uploaded conversation script to {}", self.bot);
        Ok(())
    }
}
