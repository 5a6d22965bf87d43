//! Authenticated HTTP plumbing shared by the CMS and integrations clients.

use serde::de::DeserializeOwned;
use serde_json::Value;
use ureq::Agent;

use crate::config::{ConfigStore, PlatformEnvironment, PlatformVariable};
use crate::error::BotControlError;

/// Connection settings for one backend service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub token: String,
}

impl GatewayConfig {
    /// Settings for the CMS API. The CMS variable holds the bare host; the
    /// API lives under `/api/v1`.
    pub fn cms(
        store: &ConfigStore,
        environment: PlatformEnvironment,
    ) -> Result<Self, BotControlError> {
        let host = store.get(environment, PlatformVariable::Cms)?;
        Ok(Self {
            base_url: format!("{}/api/v1", host.trim_end_matches('/')),
            token: store.get(environment, PlatformVariable::Token)?,
        })
    }

    /// Settings for the integrations manager API.
    pub fn integrations(
        store: &ConfigStore,
        environment: PlatformEnvironment,
    ) -> Result<Self, BotControlError> {
        let host = store.get(environment, PlatformVariable::IntegrationsManager)?;
        Ok(Self {
            base_url: host.trim_end_matches('/').to_string(),
            token: store.get(environment, PlatformVariable::Token)?,
        })
    }
}

/// Response snapshot handed back to clients. The body is read eagerly;
/// every payload in this API is small.
#[derive(Debug)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BotControlError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// One best-effort HTTP call per operation: no retries, no backoff.
///
/// The checked methods (`get`, `post`, `put`, `delete`) fail on any
/// non-2xx status. The `*_unchecked` variants hand the response back for
/// caller-side branching; they are used exactly where a specific status
/// selects a fallback. A 401 is fatal from either flavor.
pub struct Gateway {
    agent: Agent,
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, config }
    }

    pub fn get(&self, endpoint: &str) -> Result<GatewayResponse, BotControlError> {
        let response = self
            .agent
            .get(self.url(endpoint))
            .header("Authorization", self.config.token.as_str())
            .header("Accept", "application/json")
            .call()?;
        self.classify(snapshot(response)?, endpoint, "", true)
    }

    pub fn delete(&self, endpoint: &str) -> Result<GatewayResponse, BotControlError> {
        let response = self
            .agent
            .delete(self.url(endpoint))
            .header("Authorization", self.config.token.as_str())
            .header("Accept", "application/json")
            .call()?;
        self.classify(snapshot(response)?, endpoint, "", true)
    }

    pub fn post(&self, endpoint: &str, body: &Value) -> Result<GatewayResponse, BotControlError> {
        self.send_json("POST", endpoint, body, true)
    }

    pub fn post_unchecked(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<GatewayResponse, BotControlError> {
        self.send_json("POST", endpoint, body, false)
    }

    pub fn put(&self, endpoint: &str, body: &Value) -> Result<GatewayResponse, BotControlError> {
        self.send_json("PUT", endpoint, body, true)
    }

    pub fn put_unchecked(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<GatewayResponse, BotControlError> {
        self.send_json("PUT", endpoint, body, false)
    }

    /// POST with no body at all.
    pub fn post_empty(&self, endpoint: &str) -> Result<GatewayResponse, BotControlError> {
        let response = self
            .agent
            .post(self.url(endpoint))
            .header("Authorization", self.config.token.as_str())
            .header("Accept", "application/json")
            .send_empty()?;
        self.classify(snapshot(response)?, endpoint, "", true)
    }

    /// POST a pre-encoded body without failing on a non-2xx status.
    pub fn post_raw_unchecked(
        &self,
        endpoint: &str,
        body: &str,
    ) -> Result<GatewayResponse, BotControlError> {
        let response = self
            .agent
            .post(self.url(endpoint))
            .header("Authorization", self.config.token.as_str())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send(body)?;
        self.classify(snapshot(response)?, endpoint, body, false)
    }

    fn send_json(
        &self,
        method: &str,
        endpoint: &str,
        body: &Value,
        fail: bool,
    ) -> Result<GatewayResponse, BotControlError> {
        let url = self.url(endpoint);
        let builder = match method {
            "PUT" => self.agent.put(url),
            _ => self.agent.post(url),
        };
        let response = builder
            .header("Authorization", self.config.token.as_str())
            .header("Accept", "application/json")
            .send_json(body)?;
        self.classify(snapshot(response)?, endpoint, &body.to_string(), fail)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn classify(
        &self,
        response: GatewayResponse,
        endpoint: &str,
        request_body: &str,
        fail: bool,
    ) -> Result<GatewayResponse, BotControlError> {
        if response.status == 401 {
            return Err(BotControlError::TokenExpired);
        }
        if fail && !response.ok() {
            tracing::error!(
                status = response.status,
                endpoint,
                response_body = %response.body,
                request_body = %request_body,
                "request failed"
            );
            return Err(BotControlError::Gateway {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}

fn snapshot(response: ureq::http::Response<ureq::Body>) -> Result<GatewayResponse, BotControlError> {
    let status = response.status().as_u16();
    let body = response.into_body().read_to_string()?;
    Ok(GatewayResponse { status, body })
}
