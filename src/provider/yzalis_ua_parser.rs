use super::{raw_payload, Provider};
use crate::category::CategoryTable;
use crate::error::Result;
use crate::helpers::coerce_part;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Serialize};

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::Exact("Other")]);

/// The parser reports "desktop" whenever it found nothing better.
const DEVICE_TYPE_DEFAULT: &str = "desktop";

const CATEGORIES: CategoryTable = CategoryTable {
    mobile: &["mobile", "tablet"],
    touch: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YzalisResult {
    pub browser: YzalisFamily,
    pub rendering_engine: YzalisFamily,
    pub operating_system: YzalisOperatingSystem,
    pub device: YzalisDevice,
    /// Parsed but not mapped: the canonical model has no email client.
    pub email_client: YzalisFamily,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YzalisFamily {
    pub family: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YzalisOperatingSystem {
    pub family: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YzalisDevice {
    pub constructor: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub trait YzalisParser: Send + Sync {
    fn parse(&self, user_agent: &str) -> YzalisResult;
}

/// Adapter for the yzalis/ua-parser engine. It cannot detect bots.
pub struct YzalisUAParser<P> {
    parser: P,
}

impl<P: YzalisParser> YzalisUAParser<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }
}

fn has_result(raw: &YzalisResult) -> bool {
    [
        raw.browser.family.as_deref(),
        raw.operating_system.family.as_deref(),
        raw.device.constructor.as_deref(),
        raw.device.model.as_deref(),
    ]
    .into_iter()
    .any(|v| SENTINELS.real(v).is_some())
}

fn hydrate_operating_system(os: &mut OperatingSystem, raw: &YzalisOperatingSystem) {
    os.name = SENTINELS.real_string(raw.family.as_deref());

    let part = |p: &Option<String>| SENTINELS.real(p.as_deref()).and_then(coerce_part);
    if let Some(major) = part(&raw.major) {
        os.version.set_major(Some(major));
        os.version.set_minor(part(&raw.minor));
        os.version.set_patch(part(&raw.patch));
    }
}

fn hydrate_device(device: &mut Device, raw: &YzalisDevice) {
    device.model = SENTINELS.real_string(raw.model.as_deref());
    device.brand = SENTINELS.real_string(raw.constructor.as_deref());

    let kind = SENTINELS
        .real(raw.kind.as_deref())
        .filter(|k| *k != DEVICE_TYPE_DEFAULT);
    device.kind = kind.map(str::to_string);
    device.is_mobile = CATEGORIES.flags(kind).0;
}

impl<P: YzalisParser> Provider for YzalisUAParser<P> {
    fn name(&self) -> &str {
        "YzalisUAParser"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/yzalis/UAParser")
    }

    fn package_name(&self) -> Option<&str> {
        Some("yzalis/ua-parser")
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
                is_touch: false,
            },
            bot: BotCapabilities::default(),
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        let raw = self.parser.parse(user_agent);

        if !has_result(&raw) {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        result.browser.name = SENTINELS.real_string(raw.browser.family.as_deref());
        if let Some(version) = SENTINELS.real(raw.browser.version.as_deref()) {
            result.browser.version.set_complete(version);
        }

        result.rendering_engine.name = SENTINELS.real_string(raw.rendering_engine.family.as_deref());
        if let Some(version) = SENTINELS.real(raw.rendering_engine.version.as_deref()) {
            result.rendering_engine.version.set_complete(version);
        }

        hydrate_operating_system(&mut result.operating_system, &raw.operating_system);
        hydrate_device(&mut result.device, &raw.device);

        Ok(Some(result))
    }
}
