//! Application layer: the run engine and its orchestration pieces.
//!
//! Everything here works against the port traits in [`ports`]; nothing in
//! this layer touches a disk, a terminal, or a registry directly.

pub mod blueprint;
pub mod conflicter;
pub mod error;
pub mod events;
pub mod generator;
pub mod ports;
pub mod storage;
pub mod token;

pub use blueprint::{Blueprint, BlueprintBuilder, Phase, Step, StepError, StepFn, StepResult};
pub use conflicter::Conflicter;
pub use error::EngineError;
pub use events::EventBus;
pub use generator::{Environment, Generator, Instantiation};
pub use storage::{Storage, STORAGE_FILE};
pub use token::{CompletionError, CompletionToken, StepOutcome};
