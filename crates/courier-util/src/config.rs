use serde::{Deserialize, Serialize};

pub const CAST_POLICY_ENV: &str = "COURIER_CAST_POLICY";
pub const REPORT_BLANK_ENV: &str = "COURIER_REPORT_BLANK";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UtilityConfig {
    /// What a strict cast does when the value has the wrong shape.
    pub cast_policy: CastPolicy,

    /// Emit a debug note when a strict cast short-circuits on a blank value.
    pub report_blank: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CastPolicy {
    /// Report the mismatch and return the zero value.
    #[default]
    Recover,
    /// Panic on mismatch. Integration bugs surface immediately.
    Panic,
}

impl CastPolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recover" => Some(CastPolicy::Recover),
            "panic" | "fail_fast" => Some(CastPolicy::Panic),
            _ => None,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl UtilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unknown or missing values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(CAST_POLICY_ENV) {
            match CastPolicy::parse(&raw) {
                Some(policy) => cfg.cast_policy = policy,
                None => tracing::warn!(
                    target: "courier_util",
                    value = %raw,
                    "ignoring unknown {CAST_POLICY_ENV}"
                ),
            }
        }

        if let Some(raw) = lookup(REPORT_BLANK_ENV) {
            match parse_flag(&raw) {
                Some(flag) => cfg.report_blank = flag,
                None => tracing::warn!(
                    target: "courier_util",
                    value = %raw,
                    "ignoring unknown {REPORT_BLANK_ENV}"
                ),
            }
        }

        cfg
    }
}
