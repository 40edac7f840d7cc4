// Summary status derived from working-tree and branch-tracking counts
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-word summary of a repository's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusValue {
    Clean,
    Dirty,
    Ahead,
    Behind,
    Diverged,
    Unknown,
}

impl StatusValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusValue::Clean => "clean",
            StatusValue::Dirty => "dirty",
            StatusValue::Ahead => "ahead",
            StatusValue::Behind => "behind",
            StatusValue::Diverged => "diverged",
            StatusValue::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusValue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(StatusValue::Clean),
            "dirty" => Ok(StatusValue::Dirty),
            "ahead" => Ok(StatusValue::Ahead),
            "behind" => Ok(StatusValue::Behind),
            "diverged" => Ok(StatusValue::Diverged),
            "unknown" => Ok(StatusValue::Unknown),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Classify a repository from its uncommitted change count and ahead/behind counts.
///
/// Uncommitted changes win over any divergence from the upstream.
pub fn classify(changed: usize, ahead: usize, behind: usize) -> StatusValue {
    if changed > 0 {
        StatusValue::Dirty
    } else if ahead > 0 && behind > 0 {
        StatusValue::Diverged
    } else if ahead > 0 {
        StatusValue::Ahead
    } else if behind > 0 {
        StatusValue::Behind
    } else {
        StatusValue::Clean
    }
}
