//! Non-interactive conflict confirmation policies.
//!
//! For scripted runs and tests, where a terminal prompt is unavailable or
//! unwanted, a fixed policy answers every diverging write the same way. The
//! interactive prompt lives in the CLI crate.

use armature_core::{
    application::ports::ConflictPrompt,
    domain::{ConflictDecision, ConflictEntry},
    error::ArmatureResult,
};
use tracing::info;

/// What to answer for every diverging write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Overwrite every diverging target.
    AlwaysWrite,
    /// Keep every diverging target as-is.
    AlwaysSkip,
}

/// Policy-driven implementation of the confirmation port.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm {
    policy: ConfirmPolicy,
}

impl AutoConfirm {
    pub fn new(policy: ConfirmPolicy) -> Self {
        Self { policy }
    }

    /// Overwrite everything (the `--force` behavior).
    pub fn force() -> Self {
        Self::new(ConfirmPolicy::AlwaysWrite)
    }

    /// Keep everything (the `--skip-all` behavior).
    pub fn skip_all() -> Self {
        Self::new(ConfirmPolicy::AlwaysSkip)
    }
}

impl ConflictPrompt for AutoConfirm {
    fn confirm(&self, entry: &ConflictEntry, _existing: &str) -> ArmatureResult<ConflictDecision> {
        let decision = match self.policy {
            ConfirmPolicy::AlwaysWrite => ConflictDecision::Write,
            ConfirmPolicy::AlwaysSkip => ConflictDecision::Skip,
        };
        info!(path = %entry.path.display(), ?decision, "auto-confirmed");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_always_writes() {
        let prompt = AutoConfirm::force();
        let entry = ConflictEntry::new("/x", "new");
        assert_eq!(prompt.confirm(&entry, "old").unwrap(), ConflictDecision::Write);
    }

    #[test]
    fn skip_all_always_skips() {
        let prompt = AutoConfirm::skip_all();
        let entry = ConflictEntry::new("/x", "new");
        assert_eq!(prompt.confirm(&entry, "old").unwrap(), ConflictDecision::Skip);
    }
}
