use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::BotControlError;
use crate::gateway::Gateway;

pub const ADMIN_ROLE: &str = "admin";
pub const CUSTOMER_ROLE: &str = "customer";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: u64,
    pub name: String,
    /// Only populated by the by-name lookup, which merges in a second
    /// fetch; the listing endpoint does not include users.
    #[serde(default)]
    pub users: Vec<BotUser>,
}

impl Bot {
    pub fn user_by_email(&self, email: &str) -> Option<&BotUser> {
        self.users.iter().find(|user| user.email == email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotUser {
    pub id: u64,
    pub email: String,
    pub role: String,
}

/// Client for the CMS API: bots, their users, conversation scripts, and
/// per-bot integration and NLP configuration.
pub struct BotClient {
    gateway: Gateway,
}

impl BotClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn bots(&self) -> Result<Vec<Bot>, BotControlError> {
        self.gateway.get("/bots")?.json()
    }

    /// Resolve a bot by name with its user list merged in.
    ///
    /// The backend has no lookup-by-name endpoint, so this is a linear
    /// scan of the full listing, re-fetched on every invocation.
    pub fn bot_by_name(&self, name: &str) -> Result<Option<Bot>, BotControlError> {
        let Some(mut bot) = self.bots()?.into_iter().find(|bot| bot.name == name) else {
            return Ok(None);
        };
        bot.users = self.users(bot.id)?;
        Ok(Some(bot))
    }

    /// Like [`bot_by_name`](Self::bot_by_name) but a miss is an error.
    pub fn require_bot(&self, name: &str) -> Result<Bot, BotControlError> {
        self.bot_by_name(name)?
            .ok_or_else(|| BotControlError::UnknownBot(name.to_string()))
    }

    pub fn create_bot(&self, name: &str) -> Result<(), BotControlError> {
        self.gateway.post("/bots", &json!({ "name": name }))?;
        Ok(())
    }

    pub fn destroy_bot(&self, name: &str) -> Result<(), BotControlError> {
        let bot = self.require_bot(name)?;
        self.gateway.delete(&format!("/bots/{}", bot.id))?;
        Ok(())
    }

    pub fn users(&self, bot_id: u64) -> Result<Vec<BotUser>, BotControlError> {
        self.gateway.get(&format!("/bots/{bot_id}/users"))?.json()
    }

    pub fn invite_user(&self, bot_id: u64, email: &str) -> Result<(), BotControlError> {
        self.gateway
            .post(&format!("/bots/{bot_id}/invite"), &json!({ "email": email }))?;
        Ok(())
    }

    pub fn uninvite_user(&self, bot_id: u64, user_id: u64) -> Result<(), BotControlError> {
        self.gateway
            .delete(&format!("/bots/{bot_id}/users/{user_id}"))?;
        Ok(())
    }

    pub fn set_user_role(
        &self,
        bot_id: u64,
        user_id: u64,
        role: &str,
    ) -> Result<(), BotControlError> {
        self.gateway.put(
            &format!("/bots/{bot_id}/users/{user_id}"),
            &json!({ "role": role }),
        )?;
        Ok(())
    }

    pub fn make_admin(&self, bot_id: u64, user_id: u64) -> Result<(), BotControlError> {
        self.set_user_role(bot_id, user_id, ADMIN_ROLE)
    }

    pub fn remove_admin(&self, bot_id: u64, user_id: u64) -> Result<(), BotControlError> {
        self.set_user_role(bot_id, user_id, CUSTOMER_ROLE)
    }

    /// Upload a conversation script.
    ///
    /// Script-upload format fallback: the raw body is tried first; if the
    /// backend rejects it, the script is re-sent exactly once wrapped as
    /// `{name, script}` JSON. Not a transient-failure retry.
    pub fn post_conversation(&self, bot_name: &str, script: &str) -> Result<(), BotControlError> {
        let bot = self.require_bot(bot_name)?;
        let endpoint = format!("/bots/{}/conversations", bot.id);

        let response = self.gateway.post_raw_unchecked(&endpoint, script)?;
        if response.ok() {
            return Ok(());
        }
        tracing::debug!(
            status = response.status,
            "raw script upload rejected, retrying in wrapped form"
        );

        let script_json: Value = serde_json::from_str(script)?;
        let name = format!(
            "{}-{bot_name}-script.json",
            Utc::now().format("%Y%m%dT%H%M%S")
        );
        self.gateway
            .post(&endpoint, &json!({ "name": name, "script": script_json }))?;
        Ok(())
    }

    /// Install an integration on a bot.
    ///
    /// Install-conflict fallback: a 409 means the integration is already
    /// installed, and the update endpoint takes the identical payload. Any
    /// other failure is reported on stderr and does not abort the command.
    pub fn install_integration(
        &self,
        bot_name: &str,
        integration_name: &str,
        config_json: &str,
    ) -> Result<(), BotControlError> {
        let bot = self.require_bot(bot_name)?;
        let body: Value = serde_json::from_str(config_json)?;

        let install = format!("/bots/{}/integrations/{integration_name}/install", bot.id);
        let mut response = self.gateway.post_unchecked(&install, &body)?;

        if response.status == 409 {
            let update = format!("/bots/{}/integrations/{integration_name}", bot.id);
            response = self.gateway.put_unchecked(&update, &body)?;
        }

        if !response.ok() {
            tracing::warn!(
                status = response.status,
                integration = integration_name,
                bot = bot_name,
                "integration install did not succeed"
            );
            eprintln!("could not install {integration_name} integration on bot {bot_name}");
        }
        Ok(())
    }

    /// Configure the LUIS NLP provider. Failure warns, never raises.
    pub fn install_nlp(&self, bot_name: &str, config_json: &str) -> Result<(), BotControlError> {
        let bot = self.require_bot(bot_name)?;
        let body: Value = serde_json::from_str(config_json)?;

        let endpoint = format!("/bots/{}/nlp_provider/luis", bot.id);
        let response = self.gateway.post_unchecked(&endpoint, &body)?;
        if !response.ok() {
            tracing::warn!(
                status = response.status,
                bot = bot_name,
                "NLP provider install did not succeed"
            );
            eprintln!("could not configure the NLP provider on bot {bot_name}");
        }
        Ok(())
    }
}
