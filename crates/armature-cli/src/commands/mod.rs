//! Subcommand handlers.

pub mod completions;
pub mod info;
pub mod list;
pub mod run;

use std::sync::Arc;

use armature_adapters::{InMemoryResolver, LocalFilesystem, MarkerRootLocator, StaticDefaults};
use armature_core::application::{
    ports::{ConflictPrompt, Filesystem},
    Environment,
};

use crate::config::AppConfig;

/// Assemble the production environment a generator runs against: local
/// filesystem, marker-file root discovery, and the config file's
/// project-level defaults.
pub(crate) fn environment(
    resolver: InMemoryResolver,
    prompt: Arc<dyn ConflictPrompt>,
    config: &AppConfig,
) -> Environment {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());

    let mut defaults = StaticDefaults::new();
    for (name, value) in &config.defaults {
        defaults = defaults.with(name.clone(), value.clone());
    }

    Environment::new(
        Arc::new(resolver),
        fs.clone(),
        prompt,
        Arc::new(MarkerRootLocator::new(fs)),
        Arc::new(defaults),
    )
}
