use super::{HttpClient, HttpRequest};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::Deserialize;
use tracing::debug;

pub const WHAT_IS_MY_BROWSER_ENDPOINT: &str =
    "https://api.whatismybrowser.com/api/v1/user_agent_parse";

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::ExactIgnoreCase("unknown")]);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Reply {
    result: Option<String>,
    message_code: Option<String>,
    message: Option<String>,
    parse: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParseSection {
    browser_name: Option<String>,
    browser_version_full: Option<String>,
    operating_system_name: Option<String>,
    operating_system_version_full: Option<String>,
}

/// Client for the whatismybrowser.com v1 parse API.
pub struct WhatIsMyBrowserCom<C> {
    client: C,
    api_key: String,
    endpoint: String,
}

impl<C: HttpClient> WhatIsMyBrowserCom<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: WHAT_IS_MY_BROWSER_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn fetch(&self, user_agent: &str) -> Result<Reply> {
        let request = HttpRequest::post(&self.endpoint)
            .field("user_key", &self.api_key)
            .field("user_agent", user_agent);

        debug!(endpoint = %self.endpoint, "querying whatismybrowser.com");
        let response = self.client.send(&request)?;
        debug!(status = response.status, "whatismybrowser.com replied");

        // Error replies still carry a JSON body with a message code.
        let reply: Reply = response.json()?;
        if reply.message_code.is_none() && response.status != 200 {
            return Err(Error::Request(format!(
                "could not get valid response from whatismybrowser.com, status code {}",
                response.status
            )));
        }
        Ok(reply)
    }
}

impl<C: HttpClient> Provider for WhatIsMyBrowserCom<C> {
    fn name(&self) -> &str {
        "WhatIsMyBrowserCom"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://www.whatismybrowser.com/")
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            operating_system: NameVersionCapabilities::new(true, true),
            ..Default::default()
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        if user_agent.is_empty() {
            return Ok(None);
        }

        let reply = self.fetch(user_agent)?;
        let message = || reply.message.clone().unwrap_or_default();

        match reply.message_code.as_deref() {
            Some("usage_limit_exceeded") => return Err(Error::LimitationExceeded(message())),
            Some("no_api_user_key" | "user_key_invalid") => {
                return Err(Error::InvalidCredentials(message()))
            }
            Some("no_user_agent") => return Ok(None),
            _ => {}
        }

        if reply.result.as_deref() != Some("success") {
            return Err(Error::Request(format!(
                "whatismybrowser.com did not report success: {}",
                message()
            )));
        }

        let Some(parse) = reply.parse else {
            return Err(Error::Request(
                "whatismybrowser.com reply has no parse section".to_string(),
            ));
        };
        if parse.is_empty() {
            return Ok(None);
        }

        let raw = serde_json::Value::Object(parse);
        let section: ParseSection = serde_json::from_value(raw.clone())
            .map_err(|e| Error::Request(format!("could not decode parse section: {e}")))?;

        let browser = SENTINELS.real_string(section.browser_name.as_deref());
        let os = SENTINELS.real_string(section.operating_system_name.as_deref());
        if browser.is_none() && os.is_none() {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw);

        result.browser.name = browser;
        if let Some(version) = SENTINELS.real(section.browser_version_full.as_deref()) {
            result.browser.version.set_complete(version);
        }

        result.operating_system.name = os;
        if let Some(version) = SENTINELS.real(section.operating_system_version_full.as_deref()) {
            result.operating_system.version.set_complete(version);
        }

        Ok(Some(result))
    }
}
