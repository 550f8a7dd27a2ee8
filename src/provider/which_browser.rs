use super::{raw_payload, Provider};
use crate::category::CategoryTable;
use crate::error::Result;
use crate::sentinel::Sentinels;
use crate::types::*;
use serde::{Deserialize, Serialize};

const DEVICE_TYPE_BOT: &str = "bot";

// WhichBrowser only fills fields it detected.
const SENTINELS: Sentinels = Sentinels::NONE;

/// WhichBrowser device types: desktop, mobile, dect, tablet, gaming,
/// ereader, media, headset, watch, emulator, television, monitor, camera,
/// signage, whiteboard.
const CATEGORIES: CategoryTable = CategoryTable {
    mobile: &["mobile", "tablet", "ereader", "media", "watch", "camera"],
    touch: &["tablet", "ereader"],
};

/// Nested record as WhichBrowser exports it. Absent sections are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhichBrowserResult {
    pub browser: Option<WhichBrowserBrowser>,
    pub engine: Option<WhichBrowserEngine>,
    pub os: Option<WhichBrowserOs>,
    pub device: Option<WhichBrowserDevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhichBrowserBrowser {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub version: Option<WhichBrowserVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhichBrowserEngine {
    pub name: Option<String>,
    pub version: Option<WhichBrowserVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhichBrowserOs {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub version: Option<WhichBrowserVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhichBrowserDevice {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub series: Option<String>,
}

/// A version is either a plain string or a detailed record whose `alias`
/// is a marketing name ("XP", "El Capitan") rather than a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhichBrowserVersion {
    Plain(String),
    Detailed {
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        alias: Option<String>,
        #[serde(default)]
        nickname: Option<String>,
    },
}

impl WhichBrowserVersion {
    /// A numeric `value` is decomposed; an `alias` (with its nickname) is
    /// stored verbatim through [`Version::set_alias`].
    fn apply(&self, target: &mut Version) {
        match self {
            Self::Plain(value) => {
                if SENTINELS.is_real(value) {
                    target.set_complete(value);
                }
            }
            Self::Detailed {
                value,
                alias,
                nickname,
            } => {
                if let Some(alias) = SENTINELS.real(alias.as_deref()) {
                    let alias = match SENTINELS.real(nickname.as_deref()) {
                        Some(nickname) => format!("{alias} {nickname}"),
                        None => alias.to_string(),
                    };
                    target.set_alias(&alias);
                } else if let Some(value) = SENTINELS.real(value.as_deref()) {
                    target.set_complete(value);
                }
            }
        }
    }
}

impl WhichBrowserResult {
    pub fn is_empty(&self) -> bool {
        self.browser.is_none() && self.engine.is_none() && self.os.is_none() && self.device.is_none()
    }

    fn device_type(&self) -> Option<&str> {
        self.device.as_ref().and_then(|d| d.kind.as_deref())
    }
}

/// The WhichBrowser engine, analysing the user agent plus request headers.
pub trait WhichBrowserParser: Send + Sync {
    fn analyse(&self, user_agent: &str, headers: &Headers) -> WhichBrowserResult;
}

pub struct WhichBrowser<E> {
    engine: E,
}

impl<E: WhichBrowserParser> WhichBrowser<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: WhichBrowserParser> Provider for WhichBrowser<E> {
    fn name(&self) -> &str {
        "WhichBrowser"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/WhichBrowser/Parser")
    }

    fn package_name(&self) -> Option<&str> {
        Some("whichbrowser/parser")
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(true, true),
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
                name: true,
                kind: false,
            },
        }
    }

    fn parse(&self, user_agent: &str, headers: &Headers) -> Result<Option<UserAgent>> {
        let raw = self.engine.analyse(user_agent, headers);

        if raw.is_empty() {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        if raw.device_type() == Some(DEVICE_TYPE_BOT) {
            result.bot.is_bot = Flag::True;
            result.bot.name = raw
                .browser
                .as_ref()
                .and_then(|b| SENTINELS.real_string(b.name.as_deref()));
            return Ok(Some(result));
        }

        if let Some(browser) = &raw.browser {
            result.browser.name = SENTINELS.real_string(browser.name.as_deref());
            if let Some(version) = &browser.version {
                version.apply(&mut result.browser.version);
            }
        }

        if let Some(engine) = &raw.engine {
            result.rendering_engine.name = SENTINELS.real_string(engine.name.as_deref());
            if let Some(version) = &engine.version {
                version.apply(&mut result.rendering_engine.version);
            }
        }

        if let Some(os) = &raw.os {
            result.operating_system.name = SENTINELS.real_string(os.name.as_deref());
            if let Some(version) = &os.version {
                version.apply(&mut result.operating_system.version);
            }
        }

        if let Some(device) = &raw.device {
            result.device.model = SENTINELS.real(device.model.as_deref()).map(|model| {
                match SENTINELS.real(device.series.as_deref()) {
                    Some(series) => format!("{model} {series}"),
                    None => model.to_string(),
                }
            });
            result.device.brand = SENTINELS.real_string(device.manufacturer.as_deref());
            result.device.kind = SENTINELS.real_string(device.kind.as_deref());

            let (is_mobile, is_touch) = CATEGORIES.flags(SENTINELS.real(device.kind.as_deref()));
            result.device.is_mobile = is_mobile;
            result.device.is_touch = is_touch;
        }

        Ok(Some(result))
    }
}
