/// One way an engine spells "not detected".
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sentinel {
    /// Exact literal, e.g. `"Other"` or `"UNKNOWN"`.
    Exact(&'static str),
    /// Literal compared ignoring ASCII case.
    ExactIgnoreCase(&'static str),
    /// Placeholder prefix, e.g. `"Generic"` or `"unrecognized"`.
    Prefix(&'static str),
}

impl Sentinel {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Exact(s) => value == *s,
            Self::ExactIgnoreCase(s) => value.eq_ignore_ascii_case(s),
            Self::Prefix(p) => value.starts_with(p),
        }
    }
}

/// Per-engine table of unknown markers. An empty or blank value is never
/// real, whatever the table holds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sentinels(&'static [Sentinel]);

impl Sentinels {
    pub const NONE: Sentinels = Sentinels(&[]);

    pub const fn new(table: &'static [Sentinel]) -> Self {
        Self(table)
    }

    pub fn is_real(&self, value: &str) -> bool {
        !value.trim().is_empty() && !self.0.iter().any(|s| s.matches(value))
    }

    /// `Some(value)` only when the engine reported a real value.
    pub fn real<'a>(&self, value: Option<&'a str>) -> Option<&'a str> {
        value.filter(|v| self.is_real(v))
    }

    pub fn real_string(&self, value: Option<&str>) -> Option<String> {
        self.real(value).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: Sentinels = Sentinels::new(&[
        Sentinel::Exact("Other"),
        Sentinel::ExactIgnoreCase("unknown"),
        Sentinel::Prefix("Generic"),
    ]);

    #[test]
    fn rejects_markers() {
        assert!(!TABLE.is_real("Other"));
        assert!(!TABLE.is_real("UNKNOWN"));
        assert!(!TABLE.is_real("Generic Android"));
        assert!(!TABLE.is_real("  "));
        assert!(TABLE.is_real("other"));
        assert!(TABLE.is_real("Firefox"));
    }

    #[test]
    fn none_table_only_rejects_blank() {
        assert!(Sentinels::NONE.is_real("Other"));
        assert_eq!(Sentinels::NONE.real(Some("")), None);
        assert_eq!(Sentinels::NONE.real_string(Some("x")), Some("x".to_string()));
    }
}
