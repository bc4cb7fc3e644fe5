//! Reconciles queued file-write intents against the filesystem.
//!
//! The conflicter owns a FIFO queue filled by the currently-executing step
//! and drained by exactly one resolution pass per step. The per-step cadence
//! matters: a pass never spans two steps, and the next step starts with an
//! empty queue.

use tracing::{debug, info};

use crate::application::ports::{ConflictPrompt, Filesystem};
use crate::domain::{ConflictDecision, ConflictEntry, ResolutionReport};
use crate::error::ArmatureResult;

#[derive(Debug, Default)]
pub struct Conflicter {
    queue: Vec<ConflictEntry>,
}

impl Conflicter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a write intent for the next resolution pass.
    pub fn register(&mut self, entry: ConflictEntry) {
        self.queue.push(entry);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// One resolution pass: drain the queue in FIFO order.
    ///
    /// A missing target is written without interaction; identical existing
    /// content is a no-op; anything else goes to the prompt. The queue is
    /// emptied even on the silent paths, so a pass always leaves the
    /// conflicter ready for the next step.
    pub fn resolve(
        &mut self,
        fs: &dyn Filesystem,
        prompt: &dyn ConflictPrompt,
    ) -> ArmatureResult<ResolutionReport> {
        let mut report = ResolutionReport::default();

        for entry in self.queue.drain(..) {
            if !fs.exists(&entry.path) {
                if let Some(parent) = entry.path.parent() {
                    fs.create_dir_all(parent)?;
                }
                fs.write_file(&entry.path, &entry.content)?;
                debug!(path = %entry.path.display(), "create");
                report.written += 1;
                continue;
            }

            let existing = fs.read_file(&entry.path)?;
            if existing == entry.content {
                debug!(path = %entry.path.display(), "identical");
                report.identical += 1;
                continue;
            }

            match prompt.confirm(&entry, &existing)? {
                ConflictDecision::Write => {
                    fs.write_file(&entry.path, &entry.content)?;
                    info!(path = %entry.path.display(), "overwrite");
                    report.written += 1;
                }
                ConflictDecision::Skip => {
                    info!(path = %entry.path.display(), "skip");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }
}
