use super::{HttpClient, HttpRequest};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::Deserialize;
use tracing::debug;

pub const NEUTRINO_ENDPOINT: &str = "https://neutrinoapi.com/user-agent-info";

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::ExactIgnoreCase("unknown")]);

const TYPE_UNKNOWN: &str = "unknown";
const TYPE_ROBOT: &str = "robot";

/// The subset of the user-agent-info reply that gets mapped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NeutrinoReply {
    api_error: Option<i64>,
    api_error_msg: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    browser_name: Option<String>,
    version: Option<String>,
    operating_system: Option<String>,
    mobile_model: Option<String>,
    mobile_brand: Option<String>,
    is_mobile: Option<bool>,
}

/// Client for <https://www.neutrinoapi.com/> (user-agent-info endpoint).
pub struct NeutrinoApiCom<C> {
    client: C,
    user_id: String,
    api_key: String,
    endpoint: String,
}

impl<C: HttpClient> NeutrinoApiCom<C> {
    pub fn new(client: C, user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            api_key: api_key.into(),
            endpoint: NEUTRINO_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn fetch(&self, user_agent: &str) -> Result<serde_json::Value> {
        let request = HttpRequest::post(&self.endpoint)
            .field("user-id", &self.user_id)
            .field("api-key", &self.api_key)
            .field("output-format", "json")
            .field("output-case", "snake")
            .field("user-agent", user_agent);

        debug!(endpoint = %self.endpoint, "querying neutrinoapi.com");
        let response = self.client.send(&request)?;
        debug!(status = response.status, "neutrinoapi.com replied");

        match response.status {
            200 => {}
            403 => {
                return Err(Error::InvalidCredentials(
                    "your API userId or key is invalid for neutrinoapi.com".to_string(),
                ))
            }
            status => {
                return Err(Error::Request(format!(
                    "could not get valid response from neutrinoapi.com, status code {status}"
                )))
            }
        }

        let body: serde_json::Value = response.json()?;
        if !body.is_object() {
            return Err(Error::Request(
                "neutrinoapi.com returned no usable data".to_string(),
            ));
        }
        Ok(body)
    }
}

impl<C: HttpClient> Provider for NeutrinoApiCom<C> {
    fn name(&self) -> &str {
        "NeutrinoApiCom"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://www.neutrinoapi.com/")
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(true, false),
            device: DeviceCapabilities {
                model: true,
                brand: true,
                kind: true,
                is_mobile: true,
                is_touch: false,
            },
            bot: BotCapabilities {
                is_bot: true,
                name: true,
                kind: false,
            },
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        if user_agent.is_empty() {
            return Ok(None);
        }

        let body = self.fetch(user_agent)?;
        let reply: NeutrinoReply = serde_json::from_value(body.clone())
            .map_err(|e| Error::Request(format!("could not decode neutrinoapi.com reply: {e}")))?;

        if let Some(code) = reply.api_error {
            let message = reply.api_error_msg.unwrap_or_default();
            return Err(match code {
                2 => Error::LimitationExceeded(message),
                _ => Error::Request(format!("neutrinoapi.com error {code}: {message}")),
            });
        }

        let kind = reply.kind.as_deref();
        if matches!(kind, None | Some(TYPE_UNKNOWN)) {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(body);

        if kind == Some(TYPE_ROBOT) {
            result.bot.is_bot = Flag::True;
            result.bot.name = SENTINELS.real_string(reply.browser_name.as_deref());
            return Ok(Some(result));
        }

        result.browser.name = SENTINELS.real_string(reply.browser_name.as_deref());
        if let Some(version) = SENTINELS.real(reply.version.as_deref()) {
            result.browser.version.set_complete(version);
        }

        result.operating_system.name = SENTINELS.real_string(reply.operating_system.as_deref());

        result.device.model = SENTINELS.real_string(reply.mobile_model.as_deref());
        result.device.brand = SENTINELS.real_string(reply.mobile_brand.as_deref());
        result.device.kind = SENTINELS.real_string(kind);
        if reply.is_mobile == Some(true) {
            result.device.is_mobile = Flag::True;
        }

        Ok(Some(result))
    }
}
