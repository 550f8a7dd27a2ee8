use super::{raw_payload, Provider};
use crate::error::Result;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Sinergi's `UNKNOWN` constant, used for names and versions alike.
pub const SINERGI_UNKNOWN: &str = "unknown";

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::Exact(SINERGI_UNKNOWN)]);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SinergiBrowser {
    pub name: Option<String>,
    pub version: Option<String>,
    pub is_robot: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SinergiOs {
    pub name: Option<String>,
    pub version: Option<String>,
    pub is_mobile: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinergiDevice {
    pub name: Option<String>,
}

/// The three detectors run against the same user agent, kept together as
/// the raw payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SinergiResult {
    pub browser: SinergiBrowser,
    pub operating_system: SinergiOs,
    pub device: SinergiDevice,
}

/// sinergi/browser-detector ships separate browser, OS and device parsers.
pub trait SinergiDetector: Send + Sync {
    fn browser(&self, user_agent: &str) -> SinergiBrowser;
    fn operating_system(&self, user_agent: &str) -> SinergiOs;
    fn device(&self, user_agent: &str) -> SinergiDevice;
}

pub struct SinergiBrowserDetector<D> {
    detector: D,
}

impl<D: SinergiDetector> SinergiBrowserDetector<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }
}

impl<D: SinergiDetector> Provider for SinergiBrowserDetector<D> {
    fn name(&self) -> &str {
        "SinergiBrowserDetector"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/sinergi/php-browser-detector")
    }

    fn package_name(&self) -> Option<&str> {
        Some("sinergi/browser-detector")
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(true, true),
            device: DeviceCapabilities {
                model: true,
                is_mobile: true,
                ..Default::default()
            },
            bot: BotCapabilities {
                is_bot: true,
                ..Default::default()
            },
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        let raw = SinergiResult {
            browser: self.detector.browser(user_agent),
            operating_system: self.detector.operating_system(user_agent),
            device: self.detector.device(user_agent),
        };

        let has_result = raw.browser.is_robot
            || [
                raw.browser.name.as_deref(),
                raw.operating_system.name.as_deref(),
                raw.device.name.as_deref(),
            ]
            .into_iter()
            .any(|v| SENTINELS.real(v).is_some());
        if !has_result {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        if raw.browser.is_robot {
            result.bot.is_bot = Flag::True;
            return Ok(Some(result));
        }

        result.browser.name = SENTINELS.real_string(raw.browser.name.as_deref());
        if let Some(version) = SENTINELS.real(raw.browser.version.as_deref()) {
            result.browser.version.set_complete(version);
        }

        result.operating_system.name = SENTINELS.real_string(raw.operating_system.name.as_deref());
        if let Some(version) = SENTINELS.real(raw.operating_system.version.as_deref()) {
            result.operating_system.version.set_complete(version);
        }

        result.device.model = SENTINELS.real_string(raw.device.name.as_deref());
        if raw.operating_system.is_mobile {
            result.device.is_mobile = Flag::True;
        }

        Ok(Some(result))
    }
}
