//! Implementation of the `armature run` command.
//!
//! Responsibility: translate CLI arguments into an `Instantiation`, drive the
//! generator pipeline, and display results. No engine logic lives here.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use armature_adapters::{AutoConfirm, InMemoryResolver};
use armature_core::{
    application::{ports::ConflictPrompt, Generator, Instantiation},
    domain::RunEvent,
};

use crate::{
    cli::{global::GlobalArgs, RunArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `armature run` command.
///
/// Dispatch sequence:
/// 1. Resolve the namespace to a registered blueprint
/// 2. Instantiate the generator against the production environment
/// 3. Reject missing required arguments before anything runs
/// 4. Drive the step pipeline, echoing the event stream
/// 5. Optionally run the declared hooks (`--hooks`)
#[instrument(skip_all, fields(namespace = %args.namespace))]
pub fn execute(
    args: RunArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve the blueprint
    let resolver = InMemoryResolver::with_builtin().map_err(CliError::Core)?;
    let blueprint = resolver
        .get(&args.namespace)
        .map_err(|_| CliError::GeneratorNotFound {
            namespace: args.namespace.clone(),
        })?;

    let start_dir = match &args.dest {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    // 2. Instantiate
    let env = super::environment(resolver, select_prompt(&args), &config);
    let inst = Instantiation::new(args.namespace.clone())
        .resolved(blueprint.name().to_string())
        .string_args(args.args.iter().cloned())
        .start_dir(start_dir);
    let mut generator = Generator::new(blueprint, inst, env);
    let events = generator.subscribe();

    debug!(
        root = %generator.destination_root().display(),
        steps = generator.blueprint().steps().len(),
        "generator instantiated"
    );

    // 3. Setup-time validation events fire before any subscriber exists, so
    //    the missing-required check is made against the registry here.
    let missing: Vec<&str> = generator
        .arguments_declared()
        .iter()
        .filter(|spec| spec.required && generator.value(&spec.name).is_none())
        .map(|spec| spec.name.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!(
                "missing required argument(s): {} (usage: {})",
                missing.join(", "),
                generator.usage()
            ),
        });
    }

    // 4. Run the pipeline
    output.header(&format!("Running '{}'...", args.namespace))?;
    let report = generator.run();
    info!(
        steps = report.steps_run,
        conflict_passes = report.conflict_passes,
        "pipeline finished"
    );

    let mut first_error = None;
    for event in events.try_iter() {
        match event {
            RunEvent::Method { name } => output.print(&format!("  {name}"))?,
            RunEvent::Error { cause } => {
                output.error(&cause)?;
                first_error.get_or_insert(cause);
            }
        }
    }
    if let Some(cause) = first_error {
        return Err(CliError::GeneratorFailed { cause });
    }

    // 5. Hooks, only on an error-free pipeline
    if args.hooks && !generator.hooks().is_empty() {
        output.header("Running hooks...")?;
        for hook in generator.hooks() {
            output.print(&format!("  {}", hook.name))?;
        }
        generator.run_hooks().map_err(CliError::Core)?;
    }

    output.success(&format!(
        "'{}' finished: {} step(s), {} conflict pass(es)",
        args.namespace, report.steps_run, report.conflict_passes
    ))?;

    if !global.quiet {
        output.print(&format!(
            "Project root: {}",
            generator.destination_root().display()
        ))?;
    }

    Ok(())
}

/// Pick the confirmation strategy for diverging writes.
///
/// `--force` / `--skip-all` short-circuit. Otherwise the interactive prompt
/// runs when the build carries it and stdin is a terminal; scripted runs keep
/// existing files untouched.
fn select_prompt(args: &RunArgs) -> Arc<dyn ConflictPrompt> {
    if args.force {
        return Arc::new(AutoConfirm::force());
    }
    if args.skip_all {
        return Arc::new(AutoConfirm::skip_all());
    }

    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal;
        if std::io::stdin().is_terminal() {
            return Arc::new(crate::prompt::InteractivePrompt::new());
        }
    }

    Arc::new(AutoConfirm::skip_all())
}
