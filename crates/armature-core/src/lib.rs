//! Armature Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Armature
//! generator framework, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          armature-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Layer               │
//! │  (Generator, Conflicter, Storage)       │
//! │      Runs Blueprints to Completion      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Resolver, Filesystem, ConflictPrompt,  │
//! │   RootLocator, ProjectDefaults)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    armature-adapters (Infrastructure)   │
//! │ (InMemoryResolver, LocalFilesystem, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Registry, ConflictEntry, RunEvent)    │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use armature_core::{
//!     application::{Blueprint, Environment, Generator, Instantiation},
//!     domain::ArgumentConfig,
//! };
//!
//! // 1. Declare a blueprint
//! let blueprint = Arc::new(
//!     Blueprint::builder("webapp")
//!         .describe("Scaffold a web application")
//!         .step("write_manifest", |r#gen| {
//!             r#gen.write("manifest.json", "{}");
//!             Ok(())
//!         })
//!         .build()
//!         .unwrap(),
//! );
//!
//! // 2. Instantiate against an environment of adapters and run
//! # fn environment() -> Environment { unimplemented!() }
//! let env: Environment = environment();
//! let mut generator = Generator::new(
//!     blueprint,
//!     Instantiation::new("webapp").string_args(["my-app"]),
//!     env,
//! );
//! generator.argument("name", ArgumentConfig::default());
//! let report = generator.run();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (engine and orchestration)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ports::{ConflictPrompt, Filesystem, ProjectDefaults, Resolver, RootLocator},
        Blueprint, BlueprintBuilder, CompletionToken, Conflicter, Environment, Generator,
        Instantiation, Phase, Storage, STORAGE_FILE,
    };
    pub use crate::domain::{
        ArgumentConfig, ArgumentSpec, ConflictDecision, ConflictEntry, HookEntry, OptionConfig,
        OptionSpec, RunEvent, RunReport, ValueKind,
    };
    pub use crate::error::{ArmatureError, ArmatureResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
