mod client;
mod commands;
mod config;
mod error;
mod gateway;
mod telemetry;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::CommandContext;
use commands::bots::{LsbotsArgs, MkbotArgs, RmbotArgs, ShowbotArgs};
use commands::config::ConfigCommand;
use commands::conversations::MkconversationArgs;
use commands::integrations::{
    CallfnArgs, LsintegrationsArgs, MkintegrationArgs, ShowintegrationArgs,
};
use commands::nlp::MknlpArgs;
use commands::users::{ChroleArgs, InviteArgs, MkadminArgs, RmadminArgs, UninviteArgs};
use config::PlatformEnvironment;

#[derive(Debug, Parser)]
#[command(
    name = "botctl",
    version,
    about = "Command-line client for the bot management platform"
)]
struct Cli {
    /// Platform environment to run against (defaults to the configured one)
    #[arg(short, long, global = true, value_enum)]
    environment: Option<PlatformEnvironment>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a bot
    Mkbot(MkbotArgs),
    /// Delete a bot
    Rmbot(RmbotArgs),
    /// List bots
    Lsbots(LsbotsArgs),
    /// Show one bot, including its users
    Showbot(ShowbotArgs),
    /// Invite a user to a bot
    Invite(InviteArgs),
    /// Remove a user from a bot
    Uninvite(UninviteArgs),
    /// Change a bot user's role
    Chrole(ChroleArgs),
    /// Grant a bot user the admin role
    Mkadmin(MkadminArgs),
    /// Revoke a bot user's admin role
    Rmadmin(RmadminArgs),
    /// Upload a conversation script to a bot
    Mkconversation(MkconversationArgs),
    /// Install an integration on a bot
    Mkintegration(MkintegrationArgs),
    /// Configure the NLP provider for a bot
    Mknlp(MknlpArgs),
    /// List available integrations
    Lsintegrations(LsintegrationsArgs),
    /// Show an integration's options and functions
    Showintegration(ShowintegrationArgs),
    /// Call an integration's remote function
    Callfn(CallfnArgs),
    /// Manage local configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Mkbot(_) => "mkbot",
            Self::Rmbot(_) => "rmbot",
            Self::Lsbots(_) => "lsbots",
            Self::Showbot(_) => "showbot",
            Self::Invite(_) => "invite",
            Self::Uninvite(_) => "uninvite",
            Self::Chrole(_) => "chrole",
            Self::Mkadmin(_) => "mkadmin",
            Self::Rmadmin(_) => "rmadmin",
            Self::Mkconversation(_) => "mkconversation",
            Self::Mkintegration(_) => "mkintegration",
            Self::Mknlp(_) => "mknlp",
            Self::Lsintegrations(_) => "lsintegrations",
            Self::Showintegration(_) => "showintegration",
            Self::Callfn(_) => "callfn",
            Self::Config { .. } => "config",
        }
    }
}

fn main() -> ExitCode {
    telemetry::init();

    let cli = Cli::parse();

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(domain) = e.downcast_ref::<error::BotControlError>() {
                eprintln!("error: {domain}");
                domain.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = CommandContext::load(cli.environment)?;

    match cli.command {
        Commands::Mkbot(args) => args.execute(&ctx),
        Commands::Rmbot(args) => args.execute(&ctx),
        Commands::Lsbots(args) => args.execute(&ctx),
        Commands::Showbot(args) => args.execute(&ctx),
        Commands::Invite(args) => args.execute(&ctx),
        Commands::Uninvite(args) => args.execute(&ctx),
        Commands::Chrole(args) => args.execute(&ctx),
        Commands::Mkadmin(args) => args.execute(&ctx),
        Commands::Rmadmin(args) => args.execute(&ctx),
        Commands::Mkconversation(args) => args.execute(&ctx),
        Commands::Mkintegration(args) => args.execute(&ctx),
        Commands::Mknlp(args) => args.execute(&ctx),
        Commands::Lsintegrations(args) => args.execute(&ctx),
        Commands::Showintegration(args) => args.execute(&ctx),
        Commands::Callfn(args) => args.execute(&ctx),
        Commands::Config { command } => command.execute(&mut ctx),
    }
}
