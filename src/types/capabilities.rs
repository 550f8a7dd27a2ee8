use serde::Serialize;

/// Static declaration of which canonical leaves a provider can populate.
/// Metadata for ranking providers; never checked against real output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionCapabilities {
    pub browser: NameVersionCapabilities,
    pub rendering_engine: NameVersionCapabilities,
    pub operating_system: NameVersionCapabilities,
    pub device: DeviceCapabilities,
    pub bot: BotCapabilities,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NameVersionCapabilities {
    pub name: bool,
    pub version: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    pub model: bool,
    pub brand: bool,
    #[serde(rename = "type")]
    pub kind: bool,
    pub is_mobile: bool,
    pub is_touch: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotCapabilities {
    pub is_bot: bool,
    pub name: bool,
    #[serde(rename = "type")]
    pub kind: bool,
}

impl NameVersionCapabilities {
    pub const fn new(name: bool, version: bool) -> Self {
        Self { name, version }
    }
}

impl DetectionCapabilities {
    /// Every leaf as `(dotted key, capable)`, in export order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("browser.name", self.browser.name),
            ("browser.version", self.browser.version),
            ("renderingEngine.name", self.rendering_engine.name),
            ("renderingEngine.version", self.rendering_engine.version),
            ("operatingSystem.name", self.operating_system.name),
            ("operatingSystem.version", self.operating_system.version),
            ("device.model", self.device.model),
            ("device.brand", self.device.brand),
            ("device.type", self.device.kind),
            ("device.isMobile", self.device.is_mobile),
            ("device.isTouch", self.device.is_touch),
            ("bot.isBot", self.bot.is_bot),
            ("bot.name", self.bot.name),
            ("bot.type", self.bot.kind),
        ]
        .into_iter()
    }

    pub fn supports(&self, key: &str) -> bool {
        self.iter().any(|(k, capable)| k == key && capable)
    }

    /// Leaf-wise OR.
    pub fn union(&self, other: &Self) -> Self {
        let nv = |a: NameVersionCapabilities, b: NameVersionCapabilities| {
            NameVersionCapabilities::new(a.name || b.name, a.version || b.version)
        };
        Self {
            browser: nv(self.browser, other.browser),
            rendering_engine: nv(self.rendering_engine, other.rendering_engine),
            operating_system: nv(self.operating_system, other.operating_system),
            device: DeviceCapabilities {
                model: self.device.model || other.device.model,
                brand: self.device.brand || other.device.brand,
                kind: self.device.kind || other.device.kind,
                is_mobile: self.device.is_mobile || other.device.is_mobile,
                is_touch: self.device.is_touch || other.device.is_touch,
            },
            bot: BotCapabilities {
                is_bot: self.bot.is_bot || other.bot.is_bot,
                name: self.bot.name || other.bot.name,
                kind: self.bot.kind || other.bot.kind,
            },
        }
    }
}
