use super::{raw_payload, Provider};
use crate::error::Result;
use crate::helpers::coerce_part;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Serialize};

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::Exact("Other")]);

const DEVICE_FAMILY_BOT: &str = "Spider";

/// Output of a uap-core based parser: user agent, OS and device families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UapClient {
    pub ua: UapVersioned,
    pub os: UapVersioned,
    pub device: UapDevice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UapVersioned {
    pub family: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UapDevice {
    pub family: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl UapVersioned {
    fn hydrate(&self, name: &mut Option<String>, version: &mut Version) {
        *name = SENTINELS.real_string(self.family.as_deref());

        let part = |p: &Option<String>| SENTINELS.real(p.as_deref()).and_then(coerce_part);
        if let Some(major) = part(&self.major) {
            version.set_major(Some(major));
            version.set_minor(part(&self.minor));
            version.set_patch(part(&self.patch));
        }
    }
}

pub trait UapParser: Send + Sync {
    fn parse(&self, user_agent: &str) -> UapClient;

    /// Version of the regexes file in use.
    fn regexes_version(&self) -> Option<String> {
        None
    }
}

pub struct UAParser<P> {
    parser: P,
}

impl<P: UapParser> UAParser<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }
}

impl<P: UapParser> Provider for UAParser<P> {
    fn name(&self) -> &str {
        "UAParser"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/ua-parser/uap-core")
    }

    fn package_name(&self) -> Option<&str> {
        Some("ua-parser/uap-php")
    }

    fn version(&self) -> Option<String> {
        self.parser.regexes_version()
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(true, true),
            device: DeviceCapabilities {
                model: true,
                brand: true,
                ..Default::default()
            },
            bot: BotCapabilities {
                is_bot: true,
                name: true,
                kind: false,
            },
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        let raw = self.parser.parse(user_agent);

        let has_result = [
            raw.ua.family.as_deref(),
            raw.os.family.as_deref(),
            raw.device.model.as_deref(),
            raw.device.brand.as_deref(),
            raw.device.family.as_deref(),
        ]
        .into_iter()
        .any(|v| SENTINELS.real(v).is_some());
        if !has_result {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        if raw.device.family.as_deref() == Some(DEVICE_FAMILY_BOT) {
            result.bot.is_bot = Flag::True;
            result.bot.name = SENTINELS.real_string(raw.ua.family.as_deref());
            return Ok(Some(result));
        }

        raw.ua
            .hydrate(&mut result.browser.name, &mut result.browser.version);
        raw.os.hydrate(
            &mut result.operating_system.name,
            &mut result.operating_system.version,
        );

        result.device.model = SENTINELS.real_string(raw.device.model.as_deref());
        result.device.brand = SENTINELS.real_string(raw.device.brand.as_deref());

        Ok(Some(result))
    }
}
