use super::{Flag, Version};
use serde::Serialize;
use serde_json::{json, Value};

/// Canonical detection result. Built once per `parse` call by exactly one
/// provider; every leaf defaults to unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgent {
    pub browser: Browser,
    pub rendering_engine: RenderingEngine,
    pub operating_system: OperatingSystem,
    pub device: Device,
    pub bot: Bot,
    /// Engine output kept verbatim for diagnostics.
    #[serde(skip)]
    provider_result_raw: Value,
}

impl UserAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh result carrying the engine's raw payload.
    pub fn with_raw(raw: Value) -> Self {
        Self {
            provider_result_raw: raw,
            ..Self::default()
        }
    }

    pub fn provider_result_raw(&self) -> &Value {
        &self.provider_result_raw
    }

    pub fn is_bot(&self) -> bool {
        self.bot.is_bot.is_true()
    }

    pub fn is_mobile(&self) -> bool {
        self.device.is_mobile.is_true()
    }

    /// Full nested export. Every leaf key is present, `null` when unknown.
    pub fn to_array(&self) -> Value {
        json!({
            "browser": self.browser.to_array(),
            "renderingEngine": self.rendering_engine.to_array(),
            "operatingSystem": self.operating_system.to_array(),
            "device": self.device.to_array(),
            "bot": self.bot.to_array(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Browser {
    pub name: Option<String>,
    pub version: Version,
}

impl Browser {
    pub fn to_array(&self) -> Value {
        json!({ "name": self.name, "version": self.version.to_array() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderingEngine {
    pub name: Option<String>,
    pub version: Version,
}

impl RenderingEngine {
    pub fn to_array(&self) -> Value {
        json!({ "name": self.name, "version": self.version.to_array() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperatingSystem {
    pub name: Option<String>,
    pub version: Version,
}

impl OperatingSystem {
    pub fn to_array(&self) -> Value {
        json!({ "name": self.name, "version": self.version.to_array() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub model: Option<String>,
    pub brand: Option<String>,
    /// Free-text category as the engine reports it ("mobile", "TV Device", ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_mobile: Flag,
    pub is_touch: Flag,
}

impl Device {
    pub fn to_array(&self) -> Value {
        json!({
            "model": self.model,
            "brand": self.brand,
            "type": self.kind,
            "isMobile": self.is_mobile.as_option(),
            "isTouch": self.is_touch.as_option(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub is_bot: Flag,
    pub name: Option<String>,
    /// No adapter fills this yet.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Bot {
    pub fn to_array(&self) -> Value {
        json!({
            "isBot": self.is_bot.as_option(),
            "name": self.name,
            "type": self.kind,
        })
    }
}
