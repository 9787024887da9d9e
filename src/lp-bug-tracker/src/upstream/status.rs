//! Launchpad bug task status.

use std::fmt;

/// Every status requested when searching bug tasks, open and closed alike.
pub const SEARCHED_STATUSES: [&str; 11] = [
    "New",
    "Opinion",
    "Invalid",
    "Won't Fix",
    "Expired",
    "Confirmed",
    "Triaged",
    "In Progress",
    "Fix Committed",
    "Fix Released",
    "Incomplete",
];

/// Status of a Launchpad bug task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BugStatus {
    New,
    Opinion,
    Invalid,
    WontFix,
    Expired,
    Confirmed,
    Triaged,
    InProgress,
    FixCommitted,
    FixReleased,
    Incomplete,
    /// A status this tool does not know about; treated as open.
    Other(String),
}

impl BugStatus {
    /// Parses the status text reported by Launchpad.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "New" => Self::New,
            "Opinion" => Self::Opinion,
            "Invalid" => Self::Invalid,
            "Won't Fix" => Self::WontFix,
            "Expired" => Self::Expired,
            "Confirmed" => Self::Confirmed,
            "Triaged" => Self::Triaged,
            "In Progress" => Self::InProgress,
            "Fix Committed" => Self::FixCommitted,
            "Fix Released" => Self::FixReleased,
            "Incomplete" => Self::Incomplete,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the status text exactly as Launchpad spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "New",
            Self::Opinion => "Opinion",
            Self::Invalid => "Invalid",
            Self::WontFix => "Won't Fix",
            Self::Expired => "Expired",
            Self::Confirmed => "Confirmed",
            Self::Triaged => "Triaged",
            Self::InProgress => "In Progress",
            Self::FixCommitted => "Fix Committed",
            Self::FixReleased => "Fix Released",
            Self::Incomplete => "Incomplete",
            Self::Other(other) => other,
        }
    }

    /// Returns true if the bug no longer needs a mirror kept open.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            Self::Invalid | Self::WontFix | Self::Expired | Self::FixReleased
        )
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searched_statuses_are_all_known() {
        for status in SEARCHED_STATUSES {
            let parsed = BugStatus::parse(status);
            assert!(!matches!(parsed, BugStatus::Other(_)), "{status}");
            assert_eq!(parsed.as_str(), status);
        }
    }

    #[test]
    fn only_terminal_statuses_are_closed() {
        let closed: Vec<&str> = SEARCHED_STATUSES
            .into_iter()
            .filter(|s| BugStatus::parse(s).is_closed())
            .collect();

        assert_eq!(closed, ["Invalid", "Won't Fix", "Expired", "Fix Released"]);
    }

    #[test]
    fn unknown_status_is_open_and_kept_verbatim() {
        let status = BugStatus::parse("Deferred");
        assert!(!status.is_closed());
        assert_eq!(status.to_string(), "Deferred");
    }
}
