use indexmap::IndexMap;

/// Request headers passed alongside the user agent. Keys compare
/// case-insensitively when read through [`ClientHints`].
pub type Headers = IndexMap<String, String>;

/// Client hints extracted from HTTP headers (e.g. `X-Requested-With`,
/// `Sec-CH-UA-Mobile`, `Sec-CH-UA-Model`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientHints {
    /// Value of the `X-Requested-With` header (Android app/browser package ID).
    pub x_requested_with: Option<String>,
    /// Device model from `Sec-CH-UA-Model`.
    pub model: Option<String>,
    /// Mobile flag from `Sec-CH-UA-Mobile` (`?1` → true).
    pub mobile: Option<bool>,
}

impl ClientHints {
    pub fn from_headers(headers: &Headers) -> Self {
        let get = |names: &[&str]| {
            headers.iter().find_map(|(key, value)| {
                names
                    .iter()
                    .any(|n| key.eq_ignore_ascii_case(n))
                    .then_some(value.as_str())
            })
        };

        let x_requested_with = get(&["X-Requested-With", "http-x-requested-with"])
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let mobile = get(&["Sec-CH-UA-Mobile"]).and_then(|v| {
            if v.contains("?1") {
                Some(true)
            } else if v.contains("?0") {
                Some(false)
            } else {
                None
            }
        });

        let model = get(&["Sec-CH-UA-Model"])
            .map(|v| v.trim_matches('"'))
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            x_requested_with,
            model,
            mobile,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_requested_with.is_none() && self.model.is_none() && self.mobile.is_none()
    }
}
