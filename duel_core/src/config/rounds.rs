//! Round timing policy

use crate::types::Action;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a round may wait for declarations, and what undeclared sides do
/// when it runs out.
///
/// Without a deadline a round waits indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundPolicy {
    #[serde(default)]
    pub deadline_secs: Option<f64>,
    #[serde(default = "default_fallback_action")]
    pub fallback_action: Action,
}

impl Default for RoundPolicy {
    fn default() -> Self {
        RoundPolicy {
            deadline_secs: None,
            fallback_action: default_fallback_action(),
        }
    }
}

fn default_fallback_action() -> Action {
    Action::Defend
}

impl RoundPolicy {
    pub fn with_deadline(deadline: Duration, fallback_action: Action) -> Self {
        RoundPolicy {
            deadline_secs: Some(deadline.as_secs_f64()),
            fallback_action,
        }
    }

    /// Deadline as a `Duration`. `None` when unset or not representable.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_deadline() {
        let policy = RoundPolicy::default();
        assert_eq!(policy.deadline(), None);
        assert_eq!(policy.fallback_action, Action::Defend);
    }

    #[test]
    fn test_parse_policy() {
        let policy: RoundPolicy = toml::from_str(
            r#"
deadline_secs = 30.0
fallback_action = "evade"
"#,
        )
        .unwrap();
        assert_eq!(policy.deadline(), Some(Duration::from_secs(30)));
        assert_eq!(policy.fallback_action, Action::Evade);
    }

    #[test]
    fn test_unrepresentable_deadline_is_none() {
        for secs in [1e30, f64::INFINITY, f64::NAN, -5.0] {
            let policy = RoundPolicy {
                deadline_secs: Some(secs),
                ..Default::default()
            };
            assert_eq!(policy.deadline(), None);
        }
    }
}
