//! Behaviour switches for the feed state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a failed load-more does to the feed.
///
/// In both cases the loaded entries are kept and pagination does not advance,
/// so the next trigger retries the same page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMoreFailurePolicy {
    /// Log the failure and show nothing.
    #[default]
    Drop,
    /// Show the failure in the footer until the next load or dismissal.
    Surface,
}

impl FromStr for LoadMoreFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "surface" => Ok(Self::Surface),
            other => Err(format!("unknown load_more_failure policy: {other}")),
        }
    }
}

impl fmt::Display for LoadMoreFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "drop",
            Self::Surface => "surface",
        })
    }
}

/// Which request, if any, the feed is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub request_id: u64,
    pub kind: crate::worker::FetchKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Surface".parse(), Ok(LoadMoreFailurePolicy::Surface));
        assert_eq!(" drop ".parse(), Ok(LoadMoreFailurePolicy::Drop));
        assert!("retry".parse::<LoadMoreFailurePolicy>().is_err());
    }
}
