use clap::Args;

use super::CommandContext;
use crate::client::bots::{ADMIN_ROLE, Bot, BotUser};
use crate::error::BotControlError;

#[derive(Debug, Args)]
pub struct InviteArgs {
    /// Bot to invite the user to
    pub bot: String,
    /// Email address of the user
    pub email: String,
}

impl InviteArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let client = ctx.bot_client()?;
        let bot = client.require_bot(&self.bot)?;
        client.invite_user(bot.id, &self.email)?;
        println!("invited {} to {}", self.email, self.bot);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct UninviteArgs {
    /// Bot to remove the user from
    pub bot: String,
    /// Email address of the user
    pub email: String,
}

impl UninviteArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let client = ctx.bot_client()?;
        let bot = client.require_bot(&self.bot)?;
        let user = require_member(&bot, &self.email)?;
        client.uninvite_user(bot.id, user.id)?;
        println!("removed {} from {}", self.email, self.bot);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ChroleArgs {
    /// Bot the user belongs to
    pub bot: String,
    /// Email address of the user
    pub email: String,
    /// Role to assign (admin, customer, ...)
    pub role: String,
}

impl ChroleArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let client = ctx.bot_client()?;
        let bot = client.require_bot(&self.bot)?;
        let user = require_member(&bot, &self.email)?;
        if user.role == self.role {
            return Err(BotControlError::new(
                1,
                format!("user {} already has role {}", self.email, self.role),
            )
            .into());
        }
        client.set_user_role(bot.id, user.id, &self.role)?;
        println!("{} is now {} on {}", self.email, self.role, self.bot);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct MkadminArgs {
    /// Bot the user belongs to
    pub bot: String,
    /// Email address of the user
    pub email: String,
}

impl MkadminArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let client = ctx.bot_client()?;
        let bot = client.require_bot(&self.bot)?;
        let user = require_member(&bot, &self.email)?;
        if user.role == ADMIN_ROLE {
            return Err(BotControlError::new(
                1,
                format!("user {} is an admin already", self.email),
            )
            .into());
        }
        client.make_admin(bot.id, user.id)?;
        println!("{} is now an admin on {}", self.email, self.bot);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct RmadminArgs {
    /// Bot the user belongs to
    pub bot: String,
    /// Email address of the user
    pub email: String,
}

impl RmadminArgs {
    pub fn execute(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let client = ctx.bot_client()?;
        let bot = client.require_bot(&self.bot)?;
        let user = require_member(&bot, &self.email)?;
        if user.role != ADMIN_ROLE {
            return Err(BotControlError::new(
                1,
                format!("user {} is not an admin", self.email),
            )
            .into());
        }
        client.remove_admin(bot.id, user.id)?;
        println!("{} is no longer an admin on {}", self.email, self.bot);
        Ok(())
    }
}

/// Membership check shared by every user-mutating command; exits 2 when
/// the email does not belong to the bot.
fn require_member<'a>(bot: &'a Bot, email: &str) -> Result<&'a BotUser, BotControlError> {
    bot.user_by_email(email).ok_or_else(|| {
        BotControlError::new(2, format!("not a bot user: {} [{email}]", bot.name))
    })
}
