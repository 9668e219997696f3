//! Listener name grammar: `[target:]event[.key]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{
    LISTEN_INVALID_PREFIX, LISTEN_INVALID_SUFFIX, LISTEN_MULTIPLE_COLONS, LISTEN_MULTIPLE_PERIODS,
};

/// Where the runtime attaches the listener instead of the host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefTarget {
    Child,
    Parent,
    Body,
    Document,
    Window,
}

impl RefTarget {
    pub const ALL: [RefTarget; 5] = [
        RefTarget::Child,
        RefTarget::Parent,
        RefTarget::Body,
        RefTarget::Document,
        RefTarget::Window,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RefTarget::Child => "child",
            RefTarget::Parent => "parent",
            RefTarget::Body => "body",
            RefTarget::Document => "document",
            RefTarget::Window => "window",
        }
    }

    /// Expects an already lowercased, trimmed prefix.
    pub fn lookup(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == prefix)
    }
}

/// Keyboard filter applied by the runtime before invoking the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySuffix {
    Enter,
    Escape,
    Space,
    Tab,
    Up,
    Right,
    Down,
    Left,
}

impl KeySuffix {
    pub const ALL: [KeySuffix; 8] = [
        KeySuffix::Enter,
        KeySuffix::Escape,
        KeySuffix::Space,
        KeySuffix::Tab,
        KeySuffix::Up,
        KeySuffix::Right,
        KeySuffix::Down,
        KeySuffix::Left,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeySuffix::Enter => "enter",
            KeySuffix::Escape => "escape",
            KeySuffix::Space => "space",
            KeySuffix::Tab => "tab",
            KeySuffix::Up => "up",
            KeySuffix::Right => "right",
            KeySuffix::Down => "down",
            KeySuffix::Left => "left",
        }
    }

    pub fn lookup(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSpecifier {
    /// The specifier exactly as authored (trimmed only).
    pub event_name: String,
    pub prefix: Option<RefTarget>,
    /// Lowercased event name without prefix or suffix.
    pub core_name: String,
    pub suffix: Option<KeySuffix>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("@Listen \"{token}\" is invalid: at most one colon allowed")]
    MultipleColons { token: String },
    #[error("@Listen \"{token}\" is invalid: at most one period allowed")]
    MultiplePeriods { token: String },
    #[error("invalid @Listen prefix \"{prefix}\" for \"{token}\"")]
    InvalidPrefix { prefix: String, token: String },
    #[error("invalid @Listen suffix \"{suffix}\" for \"{token}\"")]
    InvalidSuffix { suffix: String, token: String },
}

impl GrammarError {
    pub fn code(&self) -> &'static str {
        match self {
            GrammarError::MultipleColons { .. } => LISTEN_MULTIPLE_COLONS,
            GrammarError::MultiplePeriods { .. } => LISTEN_MULTIPLE_PERIODS,
            GrammarError::InvalidPrefix { .. } => LISTEN_INVALID_PREFIX,
            GrammarError::InvalidSuffix { .. } => LISTEN_INVALID_SUFFIX,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            GrammarError::MultipleColons { token }
            | GrammarError::MultiplePeriods { token }
            | GrammarError::InvalidPrefix { token, .. }
            | GrammarError::InvalidSuffix { token, .. } => token,
        }
    }
}

/// Decompose one comma segment. The caller has already skipped empty segments.
pub fn parse_event_specifier(segment: &str) -> Result<EventSpecifier, GrammarError> {
    let token = segment.trim();

    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() > 2 {
        return Err(GrammarError::MultipleColons {
            token: token.to_string(),
        });
    }

    let (prefix, working) = if let [raw_prefix, rest] = parts[..] {
        let lowered = raw_prefix.trim().to_lowercase();
        let target = RefTarget::lookup(&lowered).ok_or_else(|| GrammarError::InvalidPrefix {
            prefix: lowered.clone(),
            token: token.to_string(),
        })?;
        (Some(target), rest)
    } else {
        (None, token)
    };

    let parts: Vec<&str> = working.split('.').collect();
    if parts.len() > 2 {
        return Err(GrammarError::MultiplePeriods {
            token: token.to_string(),
        });
    }

    let (core, suffix) = if let [name, raw_suffix] = parts[..] {
        let lowered = raw_suffix.trim().to_lowercase();
        let key = KeySuffix::lookup(&lowered).ok_or_else(|| GrammarError::InvalidSuffix {
            suffix: lowered.clone(),
            token: token.to_string(),
        })?;
        (name, Some(key))
    } else {
        (working, None)
    };

    Ok(EventSpecifier {
        event_name: token.to_string(),
        prefix,
        core_name: core.trim().to_lowercase(),
        suffix,
    })
}
