use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::provider::http::{HttpClient, NeutrinoApiCom, WhatIsMyBrowserCom};
use crate::provider::{Chain, Provider};

/// Ordered list of providers making up a [`Chain`].
///
/// ```yaml
/// providers:
///   - local: MatomoDeviceDetector
///   - neutrino_api_com:
///       user_id: me
///       api_key: secret
///   - what_is_my_browser_com:
///       api_key: secret
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderConfig {
    /// A provider registered in the [`ProviderRegistry`] under this name.
    Local(String),
    NeutrinoApiCom {
        user_id: String,
        api_key: String,
        #[serde(default)]
        endpoint: Option<String>,
    },
    WhatIsMyBrowserCom {
        api_key: String,
        #[serde(default)]
        endpoint: Option<String>,
    },
}

impl ChainConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Engine-backed providers built by the caller, looked up by name when a
/// config is turned into a chain.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: IndexMap<String, Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the provider's own name.
    pub fn register(&mut self, provider: impl Provider + 'static) -> &mut Self {
        let name = provider.name().to_string();
        self.register_as(name, provider)
    }

    pub fn register_as(&mut self, name: impl Into<String>, provider: impl Provider + 'static) -> &mut Self {
        self.providers.insert(name.into(), Box::new(provider));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Chain {
    /// Build a chain in config order. Every name and credential problem is
    /// reported here, before anything is parsed.
    pub fn from_config(
        config: &ChainConfig,
        mut registry: ProviderRegistry,
        http_client: Option<Arc<dyn HttpClient>>,
    ) -> Result<Self> {
        let mut used = HashSet::new();
        let mut providers: Vec<Box<dyn Provider>> = Vec::with_capacity(config.providers.len());

        let require_client = |what: &str| {
            http_client.clone().ok_or_else(|| {
                Error::PackageNotLoaded(format!("{what} needs an HTTP client, none was given"))
            })
        };

        for entry in &config.providers {
            let provider: Box<dyn Provider> = match entry {
                ProviderConfig::Local(name) => {
                    if !used.insert(name.clone()) {
                        return Err(Error::InvalidArgument(format!(
                            "provider \"{name}\" is listed more than once"
                        )));
                    }
                    registry.providers.shift_remove(name).ok_or_else(|| {
                        Error::PackageNotLoaded(format!("no provider registered as \"{name}\""))
                    })?
                }
                ProviderConfig::NeutrinoApiCom {
                    user_id,
                    api_key,
                    endpoint,
                } => {
                    let mut p = NeutrinoApiCom::new(require_client("NeutrinoApiCom")?, user_id, api_key);
                    if let Some(endpoint) = endpoint {
                        p = p.with_endpoint(endpoint);
                    }
                    Box::new(p)
                }
                ProviderConfig::WhatIsMyBrowserCom { api_key, endpoint } => {
                    let mut p = WhatIsMyBrowserCom::new(require_client("WhatIsMyBrowserCom")?, api_key);
                    if let Some(endpoint) = endpoint {
                        p = p.with_endpoint(endpoint);
                    }
                    Box::new(p)
                }
            };
            debug!(provider = provider.name(), "added to chain");
            providers.push(provider);
        }

        Ok(Chain::new(providers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::http::testing::QueuedClient;
    use crate::provider::testing::{Behaviour, StubProvider};

    const YAML: &str = r#"
providers:
  - local: A
  - neutrino_api_com:
      user_id: me
      api_key: secret
  - what_is_my_browser_com:
      api_key: secret
      endpoint: http://localhost:8080/parse
"#;

    fn registry(names: &[&'static str]) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        for &name in names {
            registry.register(StubProvider::new(name, Behaviour::Miss));
        }
        registry
    }

    #[test]
    fn parses_yaml() {
        let config = ChainConfig::from_yaml(YAML).unwrap();
        assert_eq!(
            config.providers,
            vec![
                ProviderConfig::Local("A".into()),
                ProviderConfig::NeutrinoApiCom {
                    user_id: "me".into(),
                    api_key: "secret".into(),
                    endpoint: None,
                },
                ProviderConfig::WhatIsMyBrowserCom {
                    api_key: "secret".into(),
                    endpoint: Some("http://localhost:8080/parse".into()),
                },
            ]
        );
    }

    #[test]
    fn builds_chain_in_order() {
        let config = ChainConfig::from_yaml(YAML).unwrap();
        let client: Arc<dyn HttpClient> = Arc::new(QueuedClient::default());
        let chain = Chain::from_config(&config, registry(&["A", "B"]), Some(client)).unwrap();

        let names: Vec<&str> = chain.providers().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["A", "NeutrinoApiCom", "WhatIsMyBrowserCom"]);
    }

    #[test]
    fn unknown_local_provider() {
        let config = ChainConfig::from_yaml("providers: [{local: Missing}]").unwrap();
        let err = Chain::from_config(&config, registry(&["A"]), None).err().unwrap();
        assert!(matches!(err, Error::PackageNotLoaded(_)));
    }

    #[test]
    fn duplicate_local_provider() {
        let config = ChainConfig::from_yaml("providers: [{local: A}, {local: A}]").unwrap();
        let err = Chain::from_config(&config, registry(&["A"]), None).err().unwrap();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn remote_provider_needs_client() {
        let config =
            ChainConfig::from_yaml("providers: [{what_is_my_browser_com: {api_key: k}}]").unwrap();
        let err = Chain::from_config(&config, ProviderRegistry::new(), None).err().unwrap();
        assert!(matches!(err, Error::PackageNotLoaded(_)));
    }

    #[test]
    fn empty_config_is_empty_chain() {
        let config = ChainConfig::from_yaml("{}").unwrap();
        let chain = Chain::from_config(&config, ProviderRegistry::new(), None).unwrap();
        assert!(chain.providers().is_empty());
    }

    #[test]
    fn bad_yaml_is_yaml_error() {
        assert!(matches!(ChainConfig::from_yaml("providers: [{nope: 1}]"), Err(Error::YAML(_))));
    }
}
