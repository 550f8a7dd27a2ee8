use super::{raw_payload, Provider};
use crate::error::Result;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const GENERIC_DEVICE_ID: &str = "generic";

const SENTINELS: Sentinels = Sentinels::NONE;

/// `brand_name` is "Generic" when WURFL only matched a fallback root.
const BRAND_SENTINELS: Sentinels = Sentinels::new(&[Sentinel::Exact("Generic")]);

/// `model_name` of fallback roots names an OS or browser, not a device.
const MODEL_SENTINELS: Sentinels = Sentinels::new(&[
    Sentinel::Prefix("Android"),
    Sentinel::Prefix("Firefox"),
    Sentinel::Prefix("Generic"),
    Sentinel::Prefix("unrecognized"),
    Sentinel::Prefix("Windows Mobile"),
    Sentinel::Prefix("Windows Phone"),
    Sentinel::Prefix("Windows RT"),
]);

/// One WURFL device: its id plus the raw and virtual capability tables,
/// all values stringly typed as WURFL stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WurflDevice {
    pub id: Option<String>,
    #[serde(rename = "all")]
    pub capabilities: IndexMap<String, String>,
    #[serde(rename = "virtual")]
    pub virtual_capabilities: IndexMap<String, String>,
}

impl WurflDevice {
    pub fn capability(&self, name: &str) -> Option<&str> {
        self.capabilities.get(name).map(String::as_str)
    }

    pub fn virtual_capability(&self, name: &str) -> Option<&str> {
        self.virtual_capabilities.get(name).map(String::as_str)
    }

    fn virtual_flag(&self, name: &str) -> bool {
        self.virtual_capability(name) == Some("true")
    }
}

/// A loaded WURFL repository.
pub trait WurflManager: Send + Sync {
    fn device_for_user_agent(&self, user_agent: &str) -> WurflDevice;

    /// Version of the loaded WURFL data.
    fn wurfl_version(&self) -> Option<String> {
        None
    }
}

pub struct Wurfl<M> {
    manager: M,
}

impl<M: WurflManager> Wurfl<M> {
    pub fn new(manager: M) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }
}

impl<M: WurflManager> Provider for Wurfl<M> {
    fn name(&self) -> &str {
        "Wurfl"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/mimmi20/Wurfl")
    }

    fn package_name(&self) -> Option<&str> {
        Some("mimmi20/wurfl")
    }

    fn version(&self) -> Option<String> {
        self.manager.wurfl_version()
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(true, true),
            device: DeviceCapabilities {
                model: true,
                brand: true,
                kind: true,
                is_mobile: true,
                is_touch: true,
            },
            bot: BotCapabilities {
                is_bot: true,
                name: false,
                kind: false,
            },
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        let raw = self.manager.device_for_user_agent(user_agent);

        let has_result = SENTINELS
            .real(raw.id.as_deref())
            .is_some_and(|id| id != GENERIC_DEVICE_ID);
        if !has_result {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        // brand_name of robots is always the crawler operator, so no name.
        if raw.virtual_flag("is_robot") {
            result.bot.is_bot = Flag::True;
            return Ok(Some(result));
        }

        result.browser.name = SENTINELS.real_string(raw.virtual_capability("advertised_browser"));
        if let Some(version) = SENTINELS.real(raw.virtual_capability("advertised_browser_version")) {
            result.browser.version.set_complete(version);
        }

        result.operating_system.name =
            SENTINELS.real_string(raw.virtual_capability("advertised_device_os"));
        if let Some(version) =
            SENTINELS.real(raw.virtual_capability("advertised_device_os_version"))
        {
            result.operating_system.version.set_complete(version);
        }

        // Full desktops carry placeholder brand/model data.
        if !raw.virtual_flag("is_full_desktop") {
            result.device.model = MODEL_SENTINELS.real_string(raw.capability("model_name"));
            result.device.brand = BRAND_SENTINELS.real_string(raw.capability("brand_name"));

            if raw.virtual_flag("is_mobile") {
                result.device.is_mobile = Flag::True;
            }
            if raw.virtual_flag("is_touchscreen") {
                result.device.is_touch = Flag::True;
            }
        }

        result.device.kind = SENTINELS.real_string(raw.virtual_capability("form_factor"));

        Ok(Some(result))
    }
}
