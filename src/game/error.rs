// Misconfiguration warnings
//
// Nothing in the simulation is fatal. Missing collaborators are reported once
// through the log and the affected system falls back to a degraded default.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Misconfiguration {
    #[error("no camera attached; steering uses the character's own forward vector")]
    MissingCamera,

    #[error("no collision world configured; ground probe reports airborne")]
    MissingCollisionWorld,

    #[error("ground mask is empty; the character will never be grounded")]
    EmptyGroundMask,

    #[error("max stamina is not positive; stamina-gated actions are unavailable")]
    NoStaminaCapacity,

    #[error("respawn zone '{0}' has no respawn point")]
    MissingRespawnPoint(String),
}

/// Logs each distinct warning once
#[derive(Debug, Default)]
pub struct WarningLog {
    seen: HashSet<Misconfiguration>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `warning` unless it was already reported. Returns true if logged.
    pub fn warn(&mut self, warning: Misconfiguration) -> bool {
        if self.seen.contains(&warning) {
            return false;
        }
        log::warn!("{}", warning);
        self.seen.insert(warning);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = Misconfiguration::MissingRespawnPoint("pit".to_string());
        assert_eq!(warning.to_string(), "respawn zone 'pit' has no respawn point");
    }

    #[test]
    fn test_warns_once() {
        let mut log = WarningLog::new();
        assert!(log.warn(Misconfiguration::MissingCamera));
        assert!(!log.warn(Misconfiguration::MissingCamera));
        assert!(log.warn(Misconfiguration::EmptyGroundMask));
    }
}
