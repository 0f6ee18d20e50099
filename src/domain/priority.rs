//! Priority Levels
//!
//! The fixed set of board columns. Every task lives in exactly one.

use serde::{Deserialize, Serialize};

/// Task priority, doubling as the board column the task is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Unprioritized backlog
    #[default]
    None,
}

impl Priority {
    /// All priorities in display order
    pub const ALL: [Priority; 4] = [Priority::High, Priority::Medium, Priority::Low, Priority::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_round_trip() {
        for p in Priority::ALL {
            assert_eq!(Priority::from_str(p.as_str()), p);
        }
    }

    #[test]
    fn test_unknown_string_defaults_to_none() {
        assert_eq!(Priority::from_str("urgent"), Priority::None);
    }
}
