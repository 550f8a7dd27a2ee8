//! Provider adapters: one per detection engine, all mapping into the
//! canonical [`UserAgent`] model.

mod browscap_lite;
mod chain;
mod device_detector;
pub mod http;
mod sinergi_browser_detector;
mod ua_parser;
mod which_browser;
mod woothee;
mod wurfl;
mod yzalis_ua_parser;

pub use browscap_lite::*;
pub use chain::*;
pub use device_detector::*;
pub use sinergi_browser_detector::*;
pub use ua_parser::*;
pub use which_browser::*;
pub use woothee::*;
pub use wurfl::*;
pub use yzalis_ua_parser::*;

use crate::error::{Error, Result};
use crate::types::{DetectionCapabilities, Headers, UserAgent};

/// Anything that can try to classify a user agent.
///
/// `parse` returns `Ok(None)` when the engine ran fine but found nothing
/// usable; that is the only outcome a [`Chain`] moves past. Every `Err` is
/// fatal to the caller.
pub trait Provider: Send + Sync {
    /// Stable identifier.
    fn name(&self) -> &str;

    fn homepage(&self) -> Option<&str> {
        None
    }

    /// Name of the underlying engine package, when there is one.
    fn package_name(&self) -> Option<&str> {
        None
    }

    /// Version of the underlying engine or its data.
    fn version(&self) -> Option<String> {
        None
    }

    fn detection_capabilities(&self) -> DetectionCapabilities;

    fn parse(&self, user_agent: &str, headers: &Headers) -> Result<Option<UserAgent>>;

    /// Like [`Provider::parse`], with "no result" reported as
    /// [`Error::NoResultFound`].
    fn detect(&self, user_agent: &str, headers: &Headers) -> Result<UserAgent> {
        self.parse(user_agent, headers)?
            .ok_or_else(|| Error::no_result(user_agent))
    }
}

/// Capture an engine's raw output for [`UserAgent::provider_result_raw`].
pub(crate) fn raw_payload<T: serde::Serialize>(raw: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(raw)?)
}
