use super::Provider;
use crate::error::{Error, Result};
use crate::types::{DetectionCapabilities, Headers, UserAgent};
use tracing::{debug, warn};

/// Tries its providers in order and returns the first result.
///
/// Only a miss moves on to the next provider. Any other error stops the
/// scan and reaches the caller unchanged; results are never merged.
pub struct Chain {
    providers: Vec<Box<dyn Provider>>,
}

impl Chain {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }
}

impl Provider for Chain {
    fn name(&self) -> &str {
        "Chain"
    }

    /// Union of what the members can detect.
    fn detection_capabilities(&self) -> DetectionCapabilities {
        self.providers
            .iter()
            .fold(DetectionCapabilities::default(), |acc, p| {
                acc.union(&p.detection_capabilities())
            })
    }

    fn parse(&self, user_agent: &str, headers: &Headers) -> Result<Option<UserAgent>> {
        for provider in &self.providers {
            match provider.parse(user_agent, headers) {
                Ok(Some(result)) => {
                    debug!(provider = provider.name(), "provider found a result");
                    return Ok(Some(result));
                }
                Ok(None) | Err(Error::NoResultFound { .. }) => {
                    debug!(provider = provider.name(), "no result, trying next provider");
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "provider failed, aborting chain");
                    return Err(err);
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{Behaviour, StubProvider};
    use std::sync::atomic::Ordering;

    fn found(name: &str) -> UserAgent {
        let mut ua = UserAgent::new();
        ua.browser.name = Some(name.to_string());
        ua
    }

    #[test]
    fn first_success_wins() {
        let a = StubProvider::new("A", Behaviour::Miss);
        let b = StubProvider::new("B", Behaviour::Found(found("Firefox")));
        let c = StubProvider::new("C", Behaviour::Found(found("Chrome")));
        let (a_calls, b_calls, c_calls) = (a.calls(), b.calls(), c.calls());

        let chain = Chain::new(vec![Box::new(a) as Box<dyn Provider>, Box::new(b), Box::new(c)]);
        let result = chain.detect("ua", &Headers::new()).unwrap();

        assert_eq!(result, found("Firefox"));
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fatal_error_aborts() {
        let a = StubProvider::new(
            "A",
            Behaviour::Fail(|| Error::InvalidCredentials("rejected".into())),
        );
        let b = StubProvider::new("B", Behaviour::Found(found("Firefox")));
        let b_calls = b.calls();

        let chain = Chain::new(vec![Box::new(a) as Box<dyn Provider>, Box::new(b)]);
        let err = chain.parse("ua", &Headers::new()).unwrap_err();

        assert!(matches!(err, Error::InvalidCredentials(_)));
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exhausted_chain_reports_no_result() {
        let chain = Chain::new(vec![
            Box::new(StubProvider::new("A", Behaviour::Miss)) as Box<dyn Provider>,
            Box::new(StubProvider::new("B", Behaviour::MissAsError)),
        ]);

        assert!(chain.parse("some agent", &Headers::new()).unwrap().is_none());
        let err = chain.detect("some agent", &Headers::new()).unwrap_err();
        assert!(err.is_no_result());
        assert_eq!(err.to_string(), "No result found for user agent: some agent");
    }

    #[test]
    fn empty_chain_has_no_result() {
        let chain = Chain::new(Vec::new());
        assert!(chain.parse("ua", &Headers::new()).unwrap().is_none());
        assert_eq!(chain.name(), "Chain");
    }

    #[test]
    fn capabilities_are_the_union() {
        let mut a = StubProvider::new("A", Behaviour::Miss);
        a.capabilities.browser.name = true;
        let mut b = StubProvider::new("B", Behaviour::Miss);
        b.capabilities.bot.is_bot = true;

        let chain = Chain::new(vec![Box::new(a) as Box<dyn Provider>, Box::new(b)]);
        let caps = chain.detection_capabilities();
        assert!(caps.browser.name);
        assert!(caps.bot.is_bot);
        assert!(!caps.device.model);
    }
}
