use crate::helpers::split_parts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted `major.minor.patch` version.
///
/// `complete` always mirrors the contiguous prefix of present parts starting
/// at `major`, except after [`Version::set_alias`], which stores a free-form
/// release name with no numeric parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    complete: Option<String>,
}

impl Version {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a version from a dotted string (see [`Version::set_complete`]).
    pub fn parse(complete: &str) -> Self {
        let mut version = Self::default();
        version.set_complete(complete);
        version
    }

    pub fn major(&self) -> Option<u64> {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn complete(&self) -> Option<&str> {
        self.complete.as_deref()
    }

    pub fn set_major(&mut self, major: Option<u64>) {
        self.major = major;
        self.recompute();
    }

    pub fn set_minor(&mut self, minor: Option<u64>) {
        self.minor = minor;
        self.recompute();
    }

    pub fn set_patch(&mut self, patch: Option<u64>) {
        self.patch = patch;
        self.recompute();
    }

    /// Set all parts from a dotted string. Only the first three segments are
    /// read; empty or missing segments clear their part and non-numeric ones
    /// coerce to 0. `complete` is then rebuilt from the parts, so `"12.1.3.4"`
    /// reads back as `"12.1.3"`.
    pub fn set_complete(&mut self, complete: &str) {
        let [major, minor, patch] = split_parts(complete);
        self.major = major;
        self.minor = minor;
        self.patch = patch;
        self.recompute();
    }

    /// Store a release name (e.g. a codename) without numeric decomposition.
    /// Parts are cleared; an empty alias clears the whole version.
    pub fn set_alias(&mut self, alias: &str) {
        let alias = alias.trim();
        self.major = None;
        self.minor = None;
        self.patch = None;
        self.complete = if alias.is_empty() {
            None
        } else {
            Some(alias.to_string())
        };
    }

    pub fn is_empty(&self) -> bool {
        self.complete.is_none() && self.major.is_none()
    }

    /// Four-key export with nulls preserved.
    pub fn to_array(&self) -> serde_json::Value {
        serde_json::json!({
            "major": self.major,
            "minor": self.minor,
            "patch": self.patch,
            "complete": self.complete,
        })
    }

    fn recompute(&mut self) {
        let Some(major) = self.major else {
            self.complete = None;
            return;
        };
        let mut complete = major.to_string();
        if let Some(minor) = self.minor {
            complete.push_str(&format!(".{minor}"));
            if let Some(patch) = self.patch {
                complete.push_str(&format!(".{patch}"));
            }
        }
        self.complete = Some(complete);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.complete.as_deref().unwrap_or(""))
    }
}
