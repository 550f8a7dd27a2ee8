use super::{raw_payload, Provider};
use crate::category::CategoryTable;
use crate::error::Result;
use crate::sentinel::{Sentinel, Sentinels};
use crate::types::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Matomo writes `UNK` for unknown OS short names and `Unknown` for brands.
const SENTINELS: Sentinels = Sentinels::new(&[
    Sentinel::Exact("UNK"),
    Sentinel::ExactIgnoreCase("unknown"),
]);

const CATEGORIES: CategoryTable = CategoryTable {
    mobile: &[
        "smartphone",
        "featurephone",
        "phablet",
        "tablet",
        "portablemediaplayer",
        "camera",
        "wearable",
    ],
    touch: &["smartphone", "phablet", "tablet"],
};

// ---------------------------------------------------------------------------
// Raw detection, as produced by a Matomo-style regex engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Detection {
    pub bot: Option<DetectedBot>,
    pub os: Option<DetectedOs>,
    pub client: Option<DetectedClient>,
    pub device: Option<DetectedDevice>,
}

impl Detection {
    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedBot {
    pub name: String,
    pub category: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedOs {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedClient {
    #[serde(rename = "type")]
    pub kind: ClientType,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub engine_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedDevice {
    #[serde(rename = "type")]
    pub kind: Option<DeviceType>,
    pub brand: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Browser,
    FeedReader,
    MobileApp,
    Pim,
    Library,
    MediaPlayer,
}

impl ClientType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "browser" => Some(Self::Browser),
            "feed reader" => Some(Self::FeedReader),
            "mobile app" => Some(Self::MobileApp),
            "pim" => Some(Self::Pim),
            "library" => Some(Self::Library),
            "mediaplayer" => Some(Self::MediaPlayer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::FeedReader => "feed reader",
            Self::MobileApp => "mobile app",
            Self::Pim => "pim",
            Self::Library => "library",
            Self::MediaPlayer => "mediaplayer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Desktop,
    Smartphone,
    Tablet,
    Phablet,
    FeaturePhone,
    Console,
    Tv,
    CarBrowser,
    Camera,
    PortableMediaPlayer,
    Notebook,
    SmartDisplay,
    SmartSpeaker,
    Wearable,
    Peripheral,
}

impl DeviceType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "smartphone" => Some(Self::Smartphone),
            "tablet" => Some(Self::Tablet),
            "phablet" => Some(Self::Phablet),
            "feature phone" => Some(Self::FeaturePhone),
            "console" => Some(Self::Console),
            "tv" | "television" => Some(Self::Tv),
            "car browser" => Some(Self::CarBrowser),
            "camera" => Some(Self::Camera),
            "portable media player" => Some(Self::PortableMediaPlayer),
            "notebook" => Some(Self::Notebook),
            "smart display" => Some(Self::SmartDisplay),
            "smart speaker" => Some(Self::SmartSpeaker),
            "wearable" => Some(Self::Wearable),
            "peripheral" => Some(Self::Peripheral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Smartphone => "smartphone",
            Self::Tablet => "tablet",
            Self::Phablet => "phablet",
            Self::FeaturePhone => "feature phone",
            Self::Console => "console",
            Self::Tv => "tv",
            Self::CarBrowser => "car browser",
            Self::Camera => "camera",
            Self::PortableMediaPlayer => "portable media player",
            Self::Notebook => "notebook",
            Self::SmartDisplay => "smart display",
            Self::SmartSpeaker => "smart speaker",
            Self::Wearable => "wearable",
            Self::Peripheral => "peripheral",
        }
    }
}

macro_rules! string_enum_serde {
    ($ty:ident, $what:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $ty::from_str(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("unknown {}: {s}", $what)))
            }
        }
    };
}

string_enum_serde!(ClientType, "client type");
string_enum_serde!(DeviceType, "device type");

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// A Matomo-compatible detector: bot, OS, client and device in one pass,
/// refined by client hints taken from the request headers.
pub trait DeviceDetectorEngine: Send + Sync {
    fn detect(&self, user_agent: &str, hints: &ClientHints) -> Detection;
}

pub struct MatomoDeviceDetector<E> {
    engine: E,
}

impl<E: DeviceDetectorEngine> MatomoDeviceDetector<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

fn has_result(raw: &Detection) -> bool {
    if raw.is_bot() {
        return true;
    }
    let os = raw.os.as_ref().is_some_and(|o| SENTINELS.is_real(&o.name));
    let client = raw.client.as_ref().is_some_and(|c| SENTINELS.is_real(&c.name));
    let device = raw.device.as_ref().is_some_and(|d| {
        d.kind.is_some() || SENTINELS.is_real(&d.brand) || SENTINELS.is_real(&d.model)
    });
    os || client || device
}

impl<E: DeviceDetectorEngine> Provider for MatomoDeviceDetector<E> {
    fn name(&self) -> &str {
        "MatomoDeviceDetector"
    }

    fn homepage(&self) -> Option<&str> {
        Some("https://github.com/matomo-org/device-detector")
    }

    fn package_name(&self) -> Option<&str> {
        Some("matomo/device-detector")
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
        let hints = ClientHints::from_headers(headers);
        let raw = self.engine.detect(user_agent, &hints);

        if !has_result(&raw) {
            return Ok(None);
        }

        let mut result = UserAgent::with_raw(raw_payload(&raw)?);

        if let Some(bot) = &raw.bot {
            result.bot.is_bot = Flag::True;
            result.bot.name = SENTINELS.real_string(Some(bot.name.as_str()));
            return Ok(Some(result));
        }

        if let Some(client) = &raw.client {
            result.browser.name = SENTINELS.real_string(Some(client.name.as_str()));
            if SENTINELS.is_real(&client.version) {
                result.browser.version.set_complete(&client.version);
            }

            result.rendering_engine.name = SENTINELS.real_string(Some(client.engine.as_str()));
            if SENTINELS.is_real(&client.engine_version) {
                result.rendering_engine.version.set_complete(&client.engine_version);
            }
        }

        if let Some(os) = &raw.os {
            result.operating_system.name = SENTINELS.real_string(Some(os.name.as_str()));
            if SENTINELS.is_real(&os.version) {
                result.operating_system.version.set_complete(&os.version);
            }
        }

        if let Some(device) = &raw.device {
            result.device.model = SENTINELS.real_string(Some(device.model.as_str()));
            result.device.brand = SENTINELS.real_string(Some(device.brand.as_str()));

            let kind = device.kind.map(|k| k.as_str());
            result.device.kind = kind.map(str::to_string);
            let (is_mobile, is_touch) = CATEGORIES.flags(kind);
            result.device.is_mobile = is_mobile;
            result.device.is_touch = is_touch;
        }

        Ok(Some(result))
    }
}
