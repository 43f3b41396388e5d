//! Availability verdict type.

use serde::{Deserialize, Serialize};

/// Semantic availability of a service channel.
///
/// Variant order defines severity: `Offline > Unstable > Online`, used by the
/// reconciler's override rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Online,
    // Wire name kept from the original dashboard contract (Portuguese).
    #[serde(rename = "instavel")]
    Unstable,
    Offline,
}

impl Verdict {
    pub fn is_offline(self) -> bool {
        self == Verdict::Offline
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Online => write!(f, "online"),
            Verdict::Unstable => write!(f, "instavel"),
            Verdict::Offline => write!(f, "offline"),
        }
    }
}
