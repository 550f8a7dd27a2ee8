use super::{raw_payload, Provider};
use crate::category::DEFAULT_CATEGORIES;
use crate::error::Result;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Woothee's marker for every field it could not detect.
pub const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

const CATEGORY_CRAWLER: &str = "crawler";

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::Exact(WOOTHEE_UNKNOWN)]);

// Woothee categories: pc, smartphone, mobilephone, crawler, appliance, misc.
// The shared table covers the two mobile ones.

/// Flat record produced by the Woothee classifier. Missing fields read as
/// [`WOOTHEE_UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WootheeResult {
    pub name: String,
    pub category: String,
    pub os: String,
    pub os_version: String,
    pub version: String,
    pub vendor: String,
}

impl Default for WootheeResult {
    fn default() -> Self {
        let unknown = || WOOTHEE_UNKNOWN.to_string();
        Self {
            name: unknown(),
            category: unknown(),
            os: unknown(),
            os_version: unknown(),
            version: unknown(),
            vendor: unknown(),
        }
    }
}

impl WootheeResult {
    fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.category.as_str(),
            self.os.as_str(),
            self.os_version.as_str(),
            self.version.as_str(),
            self.vendor.as_str(),
        ]
    }
}

pub trait WootheeClassifier: Send + Sync {
    fn parse(&self, user_agent: &str) -> WootheeResult;
}

pub struct Woothee<C> {
    classifier: C,
}

impl<C: WootheeClassifier> Woothee<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl<C: WootheeClassifier> Provider for Woothee<C> {
    fn name(&self) -> &str {
        "Woothee"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/woothee/woothee")
    }

    fn package_name(&self) -> Option<&str> {
        Some("woothee/woothee")
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(false, true),
            device: DeviceCapabilities {
                is_mobile: true,
                is_touch: true,
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
        let raw = self.classifier.parse(user_agent);

        if !raw.fields().iter().any(|v| SENTINELS.is_real(v)) {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        if raw.category == CATEGORY_CRAWLER {
            result.bot.is_bot = Flag::True;
            result.bot.name = SENTINELS.real_string(Some(raw.name.as_str()));
            return Ok(Some(result));
        }

        result.browser.name = SENTINELS.real_string(Some(raw.name.as_str()));
        if SENTINELS.is_real(&raw.version) {
            result.browser.version.set_complete(&raw.version);
        }

        // `os` mixes device and OS names (iPhone, iPod, Android...), so only
        // the version is trusted.
        if SENTINELS.is_real(&raw.os_version) {
            result.operating_system.version.set_complete(&raw.os_version);
        }

        let category = SENTINELS.real(Some(raw.category.as_str()));
        let (is_mobile, is_touch) = DEFAULT_CATEGORIES.flags(category);
        result.device.is_mobile = is_mobile;
        result.device.is_touch = is_touch;

        Ok(Some(result))
    }
}
