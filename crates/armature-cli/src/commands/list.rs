//! Implementation of the `armature list` command.

use armature_adapters::InMemoryResolver;

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let resolver = InMemoryResolver::with_builtin().map_err(CliError::Core)?;

    match args.format {
        ListFormat::Table => {
            output.header("Registered generators:")?;
            for key in resolver.keys() {
                let blueprint = resolver.get(&key).map_err(CliError::Core)?;
                output.print(&format!("  {:<12} {}", key, blueprint.description()))?;
            }
        }
        ListFormat::List => {
            // One namespace per line, straight to stdout so the output stays
            // parseable in non-TTY pipes.
            for key in resolver.keys() {
                println!("{key}");
            }
        }
    }

    Ok(())
}
