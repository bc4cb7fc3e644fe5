//! Single-use completion tokens for steps that finish asynchronously.
//!
//! A step obtains a token with `Generator::defer` and must signal it exactly
//! once; until then the engine suspends the pipeline. The token is a one-shot
//! channel behind a cloneable handle: every clone shares the same shot, so a
//! second signal from any clone is rejected at runtime.

use std::sync::{mpsc, Arc, Mutex};

use thiserror::Error;

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Failed { cause: String },
}

/// Rejection of a second signal on the same token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion token was already signalled")]
    AlreadySignalled,
}

/// Single-use handle a deferred step invokes to resume the pipeline.
#[derive(Debug, Clone)]
pub struct CompletionToken {
    shot: Arc<Mutex<Option<mpsc::Sender<StepOutcome>>>>,
}

impl CompletionToken {
    /// Create a token and the receiver the engine suspends on.
    pub(crate) fn channel() -> (Self, mpsc::Receiver<StepOutcome>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                shot: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Signal successful completion.
    pub fn complete(&self) -> Result<(), CompletionError> {
        self.signal(StepOutcome::Completed)
    }

    /// Signal failure. The engine emits the cause as an error event and
    /// truncates the remaining steps.
    pub fn fail(&self, cause: impl Into<String>) -> Result<(), CompletionError> {
        self.signal(StepOutcome::Failed {
            cause: cause.into(),
        })
    }

    /// Whether this token (or any clone of it) has already been signalled.
    pub fn is_signalled(&self) -> bool {
        self.shot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    fn signal(&self, outcome: StepOutcome) -> Result<(), CompletionError> {
        let mut slot = self
            .shot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match slot.take() {
            Some(tx) => {
                // The engine may already have given up on this step; a closed
                // receiver is not the step's problem.
                let _ = tx.send(outcome);
                Ok(())
            }
            None => Err(CompletionError::AlreadySignalled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_once() {
        let (token, rx) = CompletionToken::channel();
        token.complete().unwrap();
        assert_eq!(rx.recv().unwrap(), StepOutcome::Completed);
    }

    #[test]
    fn second_signal_is_rejected() {
        let (token, _rx) = CompletionToken::channel();
        token.complete().unwrap();
        assert_eq!(token.complete(), Err(CompletionError::AlreadySignalled));
        assert_eq!(token.fail("nope"), Err(CompletionError::AlreadySignalled));
    }

    #[test]
    fn clones_share_the_single_shot() {
        let (token, rx) = CompletionToken::channel();
        let clone = token.clone();
        clone.fail("mostlyn't").unwrap();

        assert_eq!(
            rx.recv().unwrap(),
            StepOutcome::Failed {
                cause: "mostlyn't".into()
            }
        );
        assert_eq!(token.complete(), Err(CompletionError::AlreadySignalled));
    }

    #[test]
    fn dropping_all_handles_closes_the_channel() {
        let (token, rx) = CompletionToken::channel();
        drop(token);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn is_signalled_tracks_state() {
        let (token, _rx) = CompletionToken::channel();
        assert!(!token.is_signalled());
        token.complete().unwrap();
        assert!(token.is_signalled());
    }

    #[test]
    fn token_can_complete_from_another_thread() {
        let (token, rx) = CompletionToken::channel();
        let handle = std::thread::spawn(move || token.complete().unwrap());
        assert_eq!(rx.recv().unwrap(), StepOutcome::Completed);
        handle.join().unwrap();
    }
}
