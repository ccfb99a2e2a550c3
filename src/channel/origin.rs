//! Origin trust policy for the host channel.

use std::fmt;

/// Which host origins may drive the widget.
///
/// `Any` is the embeddable default: every message is accepted and the ready
/// signal targets `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OriginPolicy {
    #[default]
    Any,
    Exact(String),
}

impl OriginPolicy {
    /// Parse a configured origin; `*` or an empty string means any.
    pub fn parse(origin: &str) -> Self {
        match origin.trim() {
            "" | "*" => Self::Any,
            exact => Self::Exact(exact.to_string()),
        }
    }

    /// Whether a message from `origin` is accepted. Messages without an
    /// origin are only accepted under `Any`.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(allowed) => origin == Some(allowed.as_str()),
        }
    }

    /// Target origin used when signalling readiness.
    pub fn target(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Exact(allowed) => allowed,
        }
    }
}

impl fmt::Display for OriginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target())
    }
}
