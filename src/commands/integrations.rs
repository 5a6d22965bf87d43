use std::path::PathBuf;

use clap::Args;

use super::{CommandContext, OutputFormat, nlp::read_config};

#[derive(Debug, Args)]
pub struct LsintegrationsArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl LsintegrationsArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let integrations = ctx.integration_client()?.integrations()?;
        match self.format {
            OutputFormat::Text => {
                for integration in &integrations {
                    println!("{}", integration.name);
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&integrations)?),
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ShowintegrationArgs {
    /// Name of the integration
    pub name: String,
}

impl ShowintegrationArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let integration = ctx.integration_client()?.integration(&self.name)?;
        println!("{}", integration.name);

        if !integration.configuration_options.is_empty() {
            println!("configuration options:");
            for (key, value) in &integration.configuration_options {
                println!("  {key} = {value}");
            }
        }
        if !integration.functions.is_empty() {
            println!("functions:");
            for function in &integration.functions {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {}({parameters})", function.name);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct MkintegrationArgs {
    /// Bot to install the integration on
    pub bot: String,
    /// Name of the integration
    pub name: String,
    /// Integration config JSON file; defaults to an empty object
    pub config: Option<PathBuf>,
}

impl MkintegrationArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let config_json = read_config(self.config.as_deref())?;
        ctx.bot_client()?
            .install_integration(&self.bot, &self.name, &config_json)?;
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CallfnArgs {
    /// Name of the integration
    pub integration: String,
    /// Name of the remote function
    pub function: String,
    /// Positional arguments matched against the function's parameter spec
    pub args: Vec<String>,
}

impl CallfnArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let body =
            ctx.integration_client()?
                .call_function(&self.integration, &self.function, &self.args)?;
        if !body.is_empty() {
            println!("{body}");
        }
        Ok(())
    }
}
