//! Interactive conflict prompt (terminal).
//!
//! Presents overwrite / skip / diff-then-decide for every diverging write.
//! Compiled only with the `interactive` feature; scripted runs use the
//! `AutoConfirm` policies from `armature-adapters` instead.

use dialoguer::{theme::ColorfulTheme, Select};
use owo_colors::OwoColorize;

use armature_core::{
    application::{ports::ConflictPrompt, EngineError},
    domain::{ConflictDecision, ConflictEntry},
    error::ArmatureResult,
};

/// Terminal-backed implementation of the confirmation port.
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractivePrompt;

impl InteractivePrompt {
    pub fn new() -> Self {
        Self
    }
}

impl ConflictPrompt for InteractivePrompt {
    fn confirm(&self, entry: &ConflictEntry, existing: &str) -> ArmatureResult<ConflictDecision> {
        let options = [
            "Overwrite - use the generated content",
            "Skip - keep the existing file",
            "Diff - show the change, then decide",
        ];

        loop {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Conflict on {}", entry.path.display()))
                .items(&options)
                .default(0)
                .interact()
                .map_err(|e| EngineError::Prompt {
                    reason: e.to_string(),
                })?;

            match selection {
                0 => return Ok(ConflictDecision::Write),
                1 => return Ok(ConflictDecision::Skip),
                2 => show_diff(existing, &entry.content),
                _ => unreachable!(),
            }
        }
    }
}

/// Minimal line diff: removed lines from the existing file, added lines from
/// the proposed content.
fn show_diff(existing: &str, proposed: &str) {
    let old: Vec<&str> = existing.lines().collect();
    let new: Vec<&str> = proposed.lines().collect();

    for line in &old {
        if !new.contains(line) {
            println!("{}", format!("- {line}").red());
        }
    }
    for line in &new {
        if !old.contains(line) {
            println!("{}", format!("+ {line}").green());
        }
    }
}
