use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BotControlError;
use crate::gateway::Gateway;

/// Catalog entry describing an installable integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub name: String,
    #[serde(default)]
    pub configuration_options: BTreeMap<String, Value>,
    #[serde(default)]
    pub functions: Vec<RemoteFunction>,
}

/// A function the integrations manager can invoke remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFunction {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    #[serde(default)]
    pub required: bool,
}

/// Read-only client for the integrations manager catalog, plus remote
/// function invocation.
pub struct IntegrationClient {
    gateway: Gateway,
}

impl IntegrationClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn integrations(&self) -> Result<Vec<Integration>, BotControlError> {
        self.gateway.get("/integrations")?.json()
    }

    pub fn integration(&self, name: &str) -> Result<Integration, BotControlError> {
        self.gateway.get(&format!("/integrations/{name}"))?.json()
    }

    pub fn function(
        &self,
        integration: &str,
        name: &str,
    ) -> Result<RemoteFunction, BotControlError> {
        self.gateway
            .get(&format!("/integrations/{integration}/functions/{name}"))?
            .json()
    }

    /// Invoke a remote function and return the raw response body.
    ///
    /// With arguments, the function's parameter spec is fetched first and
    /// positional arguments are matched to parameter names. Without
    /// arguments the POST carries no body.
    pub fn call_function(
        &self,
        integration: &str,
        name: &str,
        args: &[String],
    ) -> Result<String, BotControlError> {
        let endpoint = format!("/integrations/{integration}/functions/{name}");
        let response = if args.is_empty() {
            self.gateway.post_empty(&endpoint)?
        } else {
            let spec = self.function(integration, name)?;
            let payload = build_payload(&spec, args)?;
            self.gateway.post(&endpoint, &payload)?
        };
        Ok(response.body)
    }
}

/// Match positional arguments to the function's parameter spec.
fn build_payload(function: &RemoteFunction, args: &[String]) -> Result<Value, BotControlError> {
    if args.len() > function.parameters.len() {
        return Err(BotControlError::new(
            1,
            format!(
                "{} takes at most {} argument(s), got {}",
                function.name,
                function.parameters.len(),
                args.len()
            ),
        ));
    }
    if let Some(missing) = function
        .parameters
        .iter()
        .skip(args.len())
        .find(|parameter| parameter.required)
    {
        return Err(BotControlError::new(
            1,
            format!("{} requires argument {}", function.name, missing.name),
        ));
    }

    let payload = function
        .parameters
        .iter()
        .zip(args)
        .map(|(parameter, arg)| (parameter.name.clone(), Value::String(arg.clone())))
        .collect::<serde_json::Map<_, _>>();
    Ok(Value::Object(payload))
}
