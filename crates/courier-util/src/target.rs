//! Channel targets.
//!
//! A target is `<prefix>:<opaque-suffix>`. Only the prefix matters here: it
//! picks the channel, which decides the origin label shown to agents and
//! whether the raw phone number may be displayed. Matching is exact and
//! case-sensitive; anything unrecognized is plain SMS.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const HEYMARKET_PREFIX: &str = "hm";
pub const FACEBOOK_PREFIX: &str = "fb";
pub const LINE_PREFIX: &str = "line";
pub const ABC_PREFIX: &str = "abc";
pub const GMB_PREFIX: &str = "gmb";
pub const WHATSAPP_PREFIX: &str = "whatsapp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Heymarket,
    Facebook,
    Line,
    AppleBusinessChat,
    Google,
    WhatsApp,
    Sms,
}

impl Channel {
    pub const PREFIXED: [Channel; 6] = [
        Channel::Heymarket,
        Channel::Facebook,
        Channel::Line,
        Channel::AppleBusinessChat,
        Channel::Google,
        Channel::WhatsApp,
    ];

    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            HEYMARKET_PREFIX => Channel::Heymarket,
            FACEBOOK_PREFIX => Channel::Facebook,
            LINE_PREFIX => Channel::Line,
            ABC_PREFIX => Channel::AppleBusinessChat,
            GMB_PREFIX => Channel::Google,
            WHATSAPP_PREFIX => Channel::WhatsApp,
            _ => Channel::Sms,
        }
    }

    pub fn from_target(target: &str) -> Self {
        Self::from_prefix(prefix_of(target))
    }

    /// `None` for SMS, which has no prefix of its own.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Channel::Heymarket => Some(HEYMARKET_PREFIX),
            Channel::Facebook => Some(FACEBOOK_PREFIX),
            Channel::Line => Some(LINE_PREFIX),
            Channel::AppleBusinessChat => Some(ABC_PREFIX),
            Channel::Google => Some(GMB_PREFIX),
            Channel::WhatsApp => Some(WHATSAPP_PREFIX),
            Channel::Sms => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Heymarket => "Heymarket",
            Channel::Facebook => "Facebook",
            Channel::Line => "Line",
            Channel::AppleBusinessChat => "Apple Business Chat",
            Channel::Google => "Google",
            Channel::WhatsApp => "WhatsApp",
            Channel::Sms => "SMS",
        }
    }

    /// Only SMS conversations expose the customer's number.
    pub fn shows_phone(self) -> bool {
        matches!(self, Channel::Sms)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn prefix_of(target: &str) -> &str {
    target.split_once(':').map_or(target, |(prefix, _)| prefix)
}

/// Origin label for the channel `target` belongs to.
pub fn origin(target: &str) -> &'static str {
    Channel::from_target(target).label()
}

/// Whether the raw phone number may be shown for `target`.
pub fn show_phone(target: &str) -> bool {
    Channel::from_target(target).shows_phone()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn for_channel(channel: Channel, suffix: &str) -> Self {
        match channel.prefix() {
            Some(prefix) => Self(format!("{prefix}:{suffix}")),
            None => Self(suffix.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn prefix(&self) -> &str {
        prefix_of(&self.0)
    }

    /// Everything after the first `:`; `None` when there is no separator.
    pub fn suffix(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, suffix)| suffix)
    }

    pub fn channel(&self) -> Channel {
        Channel::from_prefix(self.prefix())
    }

    pub fn origin(&self) -> &'static str {
        self.channel().label()
    }

    pub fn shows_phone(&self) -> bool {
        self.channel().shows_phone()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
