use clap::Subcommand;

use super::CommandContext;
use crate::config::parse_variable;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print a config value (ENV/VARIABLE, or VARIABLE for the default
    /// environment)
    Get { variable: String },
    /// Set a config value
    Set { variable: String, value: String },
    /// Remove a config value
    Rm { variable: String },
    /// Show or change the default environment
    Env { name: Option<String> },
}

impl ConfigCommand {
    pub fn execute(&self, ctx: &mut CommandContext) -> anyhow::Result<()> {
        match self {
            ConfigCommand::Get { variable } => {
                let (environment, variable) = parse_variable(ctx.environment, variable)?;
                println!("{}", ctx.store.get(environment, variable)?);
            }
            ConfigCommand::Set { variable, value } => {
                let (environment, variable) = parse_variable(ctx.environment, variable)?;
                ctx.store.set(environment, variable, value)?;
                ctx.store.save()?;
            }
            ConfigCommand::Rm { variable } => {
                let (environment, variable) = parse_variable(ctx.environment, variable)?;
                if ctx.store.unset(environment, variable)? {
                    ctx.store.save()?;
                } else {
                    eprintln!("{environment}/{variable} was not set");
                }
            }
            ConfigCommand::Env { name } => match name {
                Some(name) => {
                    ctx.store.set_environment(name.parse()?)?;
                    ctx.store.save()?;
                }
                None => println!("{}", ctx.store.environment()?),
            },
        }
        Ok(())
    }
}
