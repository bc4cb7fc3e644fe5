//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `armature-adapters` (and the
//! interactive prompt in `armature-cli`) implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the engine, implemented by
//!   infrastructure
//!   - `Filesystem`: file operations for the conflicter and storage
//!   - `Resolver`: hook-name to blueprint lookup
//!   - `ConflictPrompt`: interactive write/skip decisions
//!   - `RootLocator`: destination-root discovery
//!   - `ProjectDefaults`: project-level option defaults

pub mod output;

pub use output::{ConflictPrompt, Filesystem, ProjectDefaults, Resolver, RootLocator};
