use clap::Args;
use dialoguer::Confirm;

use super::{CommandContext, OutputFormat};

#[derive(Debug, Args)]
pub struct MkbotArgs {
    /// Name of the bot to create
    pub name: String,
}

impl MkbotArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        ctx.bot_client()?.create_bot(&self.name)?;
        println!("created bot {}", self.name);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct RmbotArgs {
    /// Name of the bot to delete
    pub name: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

impl RmbotArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "delete bot {} from {}?",
                    self.name, ctx.environment
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("aborted");
                return Ok(());
            }
        }
        ctx.bot_client()?.destroy_bot(&self.name)?;
        println!("deleted bot {}", self.name);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LsbotsArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl LsbotsArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let bots = ctx.bot_client()?.bots()?;
        match self.format {
            OutputFormat::Text => {
                for bot in &bots {
                    println!("{}", bot.name);
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bots)?),
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ShowbotArgs {
    /// Name of the bot to show
    pub name: String,
}

impl ShowbotArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let bot = ctx.bot_client()?.require_bot(&self.name)?;
        println!("{}", serde_json::to_string_pretty(&bot)?);
        Ok(())
    }
}
