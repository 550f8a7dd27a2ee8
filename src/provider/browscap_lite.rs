use super::{raw_payload, Provider};
use crate::category::CategoryTable;
use crate::error::{Error, Result};
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Serialize};

const SENTINELS: Sentinels = Sentinels::new(&[Sentinel::ExactIgnoreCase("unknown")]);

/// Name of browscap's catch-all pattern.
const BROWSER_SENTINELS: Sentinels = Sentinels::new(&[
    Sentinel::ExactIgnoreCase("unknown"),
    Sentinel::ExactIgnoreCase("Default Browser"),
]);

const VERSION_SENTINELS: Sentinels = Sentinels::new(&[
    Sentinel::ExactIgnoreCase("unknown"),
    Sentinel::Exact("0.0"),
]);

/// Browscap `Device_Type` values, normalized.
const CATEGORIES: CategoryTable = CategoryTable {
    mobile: &[
        "mobilephone",
        "mobiledevice",
        "tablet",
        "ebookreader",
        "digitalcamera",
    ],
    touch: &["tablet", "ebookreader"],
};

pub const COLD_CACHE_MESSAGE: &str = "You need to warm-up the cache first to use this provider";

/// One row of the lite browscap table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowscapResult {
    pub browser: Option<String>,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub device_type: Option<String>,
    pub ismobiledevice: Option<bool>,
    pub istablet: Option<bool>,
}

/// A browscap lookup backed by a cache that must be filled beforehand.
pub trait Browscap: Send + Sync {
    fn is_cache_warm(&self) -> bool;

    fn get_browser(&self, user_agent: &str) -> BrowscapResult;

    /// Version of the loaded browscap data.
    fn data_version(&self) -> Option<String> {
        None
    }
}

pub struct BrowscapLite<B> {
    browscap: B,
}

impl<B: Browscap> BrowscapLite<B> {
    pub fn new(browscap: B) -> Self {
        Self { browscap }
    }

    pub fn browscap(&self) -> &B {
        &self.browscap
    }
}

impl<B: Browscap> Provider for BrowscapLite<B> {
    fn name(&self) -> &str {
        "BrowscapLite"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/browscap/browscap-php")
    }

    fn package_name(&self) -> Option<&str> {
        Some("browscap/browscap-php")
    }

    fn version(&self) -> Option<String> {
        self.browscap.data_version()
    }

    fn detection_capabilities(&self) -> DetectionCapabilities {
        DetectionCapabilities {
            browser: NameVersionCapabilities::new(true, true),
            rendering_engine: NameVersionCapabilities::new(false, false),
            operating_system: NameVersionCapabilities::new(true, false),
            device: DeviceCapabilities {
                kind: true,
                is_mobile: true,
                is_touch: true,
                ..Default::default()
            },
            bot: BotCapabilities::default(),
        }
    }

    fn parse(&self, user_agent: &str, _headers: &Headers) -> Result<Option<UserAgent>> {
        if !self.browscap.is_cache_warm() {
            return Err(Error::InvalidArgument(COLD_CACHE_MESSAGE.to_string()));
        }

        let raw = self.browscap.get_browser(user_agent);

        let has_result = BROWSER_SENTINELS.real(raw.browser.as_deref()).is_some()
            || SENTINELS.real(raw.platform.as_deref()).is_some()
            || SENTINELS.real(raw.device_type.as_deref()).is_some();
        if !has_result {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        result.browser.name = BROWSER_SENTINELS.real_string(raw.browser.as_deref());
        if let Some(version) = VERSION_SENTINELS.real(raw.version.as_deref()) {
            result.browser.version.set_complete(version);
        }

        result.operating_system.name = SENTINELS.real_string(raw.platform.as_deref());

        let device_type = SENTINELS.real(raw.device_type.as_deref());
        result.device.kind = device_type.map(str::to_string);

        let (is_mobile, is_touch) = CATEGORIES.flags(device_type);
        result.device.is_mobile = if raw.ismobiledevice == Some(true) {
            Flag::True
        } else {
            is_mobile
        };
        result.device.is_touch = if raw.istablet == Some(true) {
            Flag::True
        } else {
            is_touch
        };

        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table {
        warm: bool,
        row: BrowscapResult,
    }

    impl Browscap for Table {
        fn is_cache_warm(&self) -> bool {
            self.warm
        }

        fn get_browser(&self, _user_agent: &str) -> BrowscapResult {
            self.row.clone()
        }
    }

    fn provider(warm: bool, row: BrowscapResult) -> BrowscapLite<Table> {
        BrowscapLite::new(Table { warm, row })
    }

    #[test]
    fn cold_cache_is_invalid_argument() {
        let err = provider(false, BrowscapResult::default())
            .parse("...", &Headers::new())
            .unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert_eq!(msg, COLD_CACHE_MESSAGE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_browser_is_no_result() {
        let row = BrowscapResult {
            browser: Some("Default Browser".into()),
            version: Some("0.0".into()),
            platform: Some("unknown".into()),
            device_type: Some("unknown".into()),
            ..Default::default()
        };
        assert!(provider(true, row).parse("...", &Headers::new()).unwrap().is_none());
    }

    #[test]
    fn smart_tv() {
        let row = BrowscapResult {
            browser: Some("Chromium".into()),
            version: Some("48.0".into()),
            platform: Some("Linux".into()),
            device_type: Some("TV Device".into()),
            ismobiledevice: Some(false),
            istablet: Some(false),
        };
        let result = provider(true, row)
            .parse("Mozilla/5.0 (SMART-TV; X11; Linux armv7l)", &Headers::new())
            .unwrap()
            .unwrap();

        assert_eq!(result.browser.name.as_deref(), Some("Chromium"));
        assert_eq!(result.browser.version.complete(), Some("48.0"));
        assert_eq!(result.operating_system.name.as_deref(), Some("Linux"));
        assert_eq!(result.device.kind.as_deref(), Some("TV Device"));
        assert_eq!(result.device.is_mobile, Flag::Unknown);
        assert_eq!(result.device.is_touch, Flag::Unknown);
    }

    #[test]
    fn tablet_flags() {
        let row = BrowscapResult {
            browser: Some("Safari".into()),
            version: Some("0.0".into()),
            device_type: Some("Tablet".into()),
            ismobiledevice: Some(true),
            istablet: Some(true),
            ..Default::default()
        };
        let result = provider(true, row).parse("...", &Headers::new()).unwrap().unwrap();

        assert!(result.browser.version.is_empty());
        assert_eq!(result.device.is_mobile, Flag::True);
        assert_eq!(result.device.is_touch, Flag::True);
    }
}
