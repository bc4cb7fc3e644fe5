//! Implementation of the `armature info` command.
//!
//! Instantiates the generator with its `help` option set, so declared
//! arguments register without required-ness enforcement, then prints the
//! rendered help text.

use std::sync::Arc;

use armature_adapters::{AutoConfirm, InMemoryResolver};
use armature_core::application::{Generator, Instantiation};

use crate::{
    cli::InfoArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub fn execute(args: InfoArgs, config: AppConfig) -> CliResult<()> {
    let resolver = InMemoryResolver::with_builtin().map_err(CliError::Core)?;
    let blueprint = resolver
        .get(&args.namespace)
        .map_err(|_| CliError::GeneratorNotFound {
            namespace: args.namespace.clone(),
        })?;

    let env = super::environment(resolver, Arc::new(AutoConfirm::skip_all()), &config);
    let inst = Instantiation::new(args.namespace.clone())
        .resolved(blueprint.name().to_string())
        .option("help", true)
        .start_dir(std::env::current_dir()?);
    let generator = Generator::new(blueprint, inst, env);

    // The help text is the entire output; print it raw so it survives pipes.
    println!("{}", generator.help());
    Ok(())
}
