use fixtures::fixtures;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use useragent_normalizer::provider::http::{HttpClient, HttpRequest, HttpResponse};
use useragent_normalizer::provider::*;
use useragent_normalizer::{Chain, Error, Flag, Headers, Provider, UserAgent};

/// One fixture case: what the engine returned for `user_agent`, and the
/// export expected from the adapter. A case without `expected` must yield
/// no result.
#[derive(Debug, Deserialize)]
struct Case<R> {
    user_agent: String,
    #[serde(default)]
    headers: Headers,
    raw: R,
    #[serde(default)]
    expected: Option<Value>,
}

/// Engine stand-in that hands back the recorded output.
struct Replay<R>(R);

impl WootheeClassifier for Replay<WootheeResult> {
    fn parse(&self, _user_agent: &str) -> WootheeResult {
        self.0.clone()
    }
}

impl WhichBrowserParser for Replay<WhichBrowserResult> {
    fn analyse(&self, _user_agent: &str, _headers: &Headers) -> WhichBrowserResult {
        self.0.clone()
    }
}

impl WurflManager for Replay<WurflDevice> {
    fn device_for_user_agent(&self, _user_agent: &str) -> WurflDevice {
        self.0.clone()
    }
}

impl YzalisParser for Replay<YzalisResult> {
    fn parse(&self, _user_agent: &str) -> YzalisResult {
        self.0.clone()
    }
}

impl UapParser for Replay<UapClient> {
    fn parse(&self, _user_agent: &str) -> UapClient {
        self.0.clone()
    }
}

impl SinergiDetector for Replay<SinergiResult> {
    fn browser(&self, _user_agent: &str) -> SinergiBrowser {
        self.0.browser.clone()
    }

    fn operating_system(&self, _user_agent: &str) -> SinergiOs {
        self.0.operating_system.clone()
    }

    fn device(&self, _user_agent: &str) -> SinergiDevice {
        self.0.device.clone()
    }
}

impl Browscap for Replay<BrowscapResult> {
    fn is_cache_warm(&self) -> bool {
        true
    }

    fn get_browser(&self, _user_agent: &str) -> BrowscapResult {
        self.0.clone()
    }
}

impl DeviceDetectorEngine for Replay<Detection> {
    fn detect(&self, _user_agent: &str, _hints: &useragent_normalizer::ClientHints) -> Detection {
        self.0.clone()
    }
}

/// Recursively write `patch` over `base`; objects merge, everything else
/// replaces.
fn overlay(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                overlay(base.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

fn run_cases<R, P>(path: &Path, build: impl Fn(R) -> P)
where
    R: DeserializeOwned,
    P: Provider,
{
    let content = std::fs::read_to_string(path).unwrap();
    let cases: Vec<Case<R>> = serde_yaml::from_str(&content).unwrap();
    assert!(!cases.is_empty(), "no cases in {}", path.display());

    for case in cases {
        let provider = build(case.raw);
        let result = provider
            .parse(&case.user_agent, &case.headers)
            .unwrap_or_else(|e| panic!("{} failed on {:?}: {e}", provider.name(), case.user_agent));

        match (result, case.expected) {
            (None, None) => {}
            (Some(result), Some(expected)) => {
                let mut want = UserAgent::new().to_array();
                overlay(&mut want, &expected);
                assert_eq!(
                    result.to_array(),
                    want,
                    "{} export mismatch for {:?}",
                    provider.name(),
                    case.user_agent
                );
            }
            (Some(result), None) => panic!(
                "{} expected no result for {:?}, got {}",
                provider.name(),
                case.user_agent,
                result.to_array()
            ),
            (None, Some(_)) => panic!(
                "{} found nothing for {:?}",
                provider.name(),
                case.user_agent
            ),
        }
    }
}

#[fixtures(["tests/fixtures/woothee.yml"])]
#[test]
fn test_woothee_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: WootheeResult| Woothee::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/which_browser.yml"])]
#[test]
fn test_which_browser_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: WhichBrowserResult| WhichBrowser::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/wurfl.yml"])]
#[test]
fn test_wurfl_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: WurflDevice| Wurfl::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/yzalis_ua_parser.yml"])]
#[test]
fn test_yzalis_ua_parser_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: YzalisResult| YzalisUAParser::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/ua_parser.yml"])]
#[test]
fn test_ua_parser_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: UapClient| UAParser::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/sinergi_browser_detector.yml"])]
#[test]
fn test_sinergi_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: SinergiResult| SinergiBrowserDetector::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/browscap_lite.yml"])]
#[test]
fn test_browscap_lite_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: BrowscapResult| BrowscapLite::new(Replay(raw)));
}

#[fixtures(["tests/fixtures/device_detector.yml"])]
#[test]
fn test_device_detector_fixtures(path: &std::path::Path) {
    run_cases(path, |raw: Detection| MatomoDeviceDetector::new(Replay(raw)));
}

// ---------------------------------------------------------------------------
// Chain over real adapters
// ---------------------------------------------------------------------------

fn woothee_miss() -> Woothee<Replay<WootheeResult>> {
    Woothee::new(Replay(WootheeResult::default()))
}

fn ua_parser_firefox() -> UAParser<Replay<UapClient>> {
    let raw = serde_json::from_value(serde_json::json!({
        "ua": {"family": "Firefox", "major": "3", "minor": "2", "patch": "1"},
        "os": {"family": "Windows", "major": "7"},
    }))
    .unwrap();
    UAParser::new(Replay(raw))
}

#[test]
fn test_chain_falls_through_to_first_hit() {
    let chain = Chain::new(vec![
        Box::new(woothee_miss()) as Box<dyn Provider>,
        Box::new(ua_parser_firefox()),
    ]);
    let result = chain.detect("Mozilla/5.0 Firefox/3.2.1", &Headers::new()).unwrap();

    assert_eq!(result.browser.name.as_deref(), Some("Firefox"));
    assert_eq!(result.browser.version.complete(), Some("3.2.1"));
    assert_eq!(result.operating_system.version.complete(), Some("7"));
    assert_eq!(result.device.is_mobile, Flag::Unknown);
}

#[test]
fn test_chain_stops_on_cold_browscap() {
    struct Cold;

    impl Browscap for Cold {
        fn is_cache_warm(&self) -> bool {
            false
        }

        fn get_browser(&self, _user_agent: &str) -> BrowscapResult {
            unreachable!("cold cache is never queried")
        }
    }

    let chain = Chain::new(vec![
        Box::new(woothee_miss()) as Box<dyn Provider>,
        Box::new(BrowscapLite::new(Cold)),
        Box::new(ua_parser_firefox()),
    ]);
    let err = chain.detect("ua", &Headers::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_chain_exhausted() {
    let chain = Chain::new(vec![Box::new(woothee_miss())]);
    let err = chain.detect("nothing", &Headers::new()).unwrap_err();
    assert!(err.is_no_result());
    assert_eq!(err.to_string(), "No result found for user agent: nothing");
}

#[test]
fn test_chain_from_config_with_remote_provider() {
    use std::sync::Mutex;

    struct OneShot(Mutex<Option<HttpResponse>>);

    impl HttpClient for OneShot {
        fn send(&self, _request: &HttpRequest) -> useragent_normalizer::Result<HttpResponse> {
            self.0
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| Error::Request("already used".into()))
        }
    }

    let config = useragent_normalizer::ChainConfig::from_yaml(
        "providers:\n  - local: Woothee\n  - what_is_my_browser_com:\n      api_key: k\n",
    )
    .unwrap();

    let mut registry = useragent_normalizer::ProviderRegistry::new();
    registry.register(woothee_miss());

    let client: Arc<dyn HttpClient> = Arc::new(OneShot(Mutex::new(Some(HttpResponse {
        status: 200,
        content_type: Some("application/json".into()),
        body: r#"{"result":"success","parse":{"browser_name":"Opera","browser_version_full":"12.16"}}"#
            .into(),
    }))));

    let chain = Chain::from_config(&config, registry, Some(client)).unwrap();
    let result = chain.detect("Opera/9.80", &Headers::new()).unwrap();

    assert_eq!(result.browser.name.as_deref(), Some("Opera"));
    assert_eq!(result.browser.version.minor(), Some(16));
    assert_eq!(result.provider_result_raw()["browser_name"], "Opera");
}
