//! The generator instance: registries, run engine, and hook engine.
//!
//! A [`Generator`] is one executable unit: a [`Blueprint`] bound to
//! positional arguments, an options bag, collaborator ports, and a
//! destination root. Declarations (`argument`, `option`, `hook_for`, `desc`)
//! happen during setup; `run` drives the step pipeline; `run_hooks` delegates
//! to sub-generators.
//!
//! Failure channels are deliberately asymmetric: step failures surface only
//! on the event stream (`run` reports counts), while `run_hooks` returns its
//! first error directly. See the error taxonomy on [`crate::error`].

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::application::blueprint::{Blueprint, Step};
use crate::application::conflicter::Conflicter;
use crate::application::error::EngineError;
use crate::application::events::EventBus;
use crate::application::ports::{
    ConflictPrompt, Filesystem, ProjectDefaults, Resolver, RootLocator,
};
use crate::application::storage::Storage;
use crate::application::token::{CompletionToken, StepOutcome};
use crate::domain::{
    appname_from_root, ArgumentConfig, ArgumentSpec, ConflictEntry, DomainError, HookEntry,
    OptionConfig, OptionSpec, Registry, ResolutionReport, RunEvent, RunReport, ValueKind,
    HELP_OPTION, HOOK_OPTION_DESC,
};
use crate::error::{ArmatureError, ArmatureResult};

/// The collaborator ports a generator runs against.
///
/// Cheap to clone; hook-created sub-generators share the same environment.
#[derive(Clone)]
pub struct Environment {
    pub resolver: Arc<dyn Resolver>,
    pub filesystem: Arc<dyn Filesystem>,
    pub prompt: Arc<dyn ConflictPrompt>,
    pub root_locator: Arc<dyn RootLocator>,
    pub project_defaults: Arc<dyn ProjectDefaults>,
    /// Binary name used as the first word of usage lines.
    pub invocation: String,
}

impl Environment {
    pub fn new(
        resolver: Arc<dyn Resolver>,
        filesystem: Arc<dyn Filesystem>,
        prompt: Arc<dyn ConflictPrompt>,
        root_locator: Arc<dyn RootLocator>,
        project_defaults: Arc<dyn ProjectDefaults>,
    ) -> Self {
        Self {
            resolver,
            filesystem,
            prompt,
            root_locator,
            project_defaults,
            invocation: "armature".into(),
        }
    }

    pub fn with_invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = invocation.into();
        self
    }
}

/// Everything a caller supplies when instantiating a generator.
#[derive(Debug, Clone)]
pub struct Instantiation {
    /// Positional input values, read-only after construction.
    pub args: Vec<Value>,
    /// Caller-supplied option values; declared defaults merge in underneath.
    pub options: Map<String, Value>,
    /// Registry-qualified identifier the generator was looked up under.
    pub resolved: String,
    /// Namespace used to build the usage string.
    pub namespace: String,
    /// Directory the destination-root discovery starts from.
    pub start_dir: PathBuf,
}

impl Instantiation {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            args: Vec::new(),
            options: Map::new(),
            resolved: namespace.clone(),
            namespace,
            start_dir: PathBuf::from("."),
        }
    }

    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Convenience for the common all-strings positional list.
    pub fn string_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(|s| Value::String(s.into())).collect();
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn resolved(mut self, resolved: impl Into<String>) -> Self {
        self.resolved = resolved.into();
        self
    }

    pub fn start_dir(mut self, start_dir: impl Into<PathBuf>) -> Self {
        self.start_dir = start_dir.into();
        self
    }
}

/// One executable generator.
pub struct Generator {
    blueprint: Arc<Blueprint>,
    env: Environment,
    resolved: String,
    namespace: String,
    description: String,
    args: Vec<Value>,
    options: Map<String, Value>,
    running: bool,
    registry: Registry,
    values: Map<String, Value>,
    destination_root: PathBuf,
    appname: String,
    storage: Storage,
    storage_generation: usize,
    conflicter: Conflicter,
    events: EventBus,
    pending: Option<mpsc::Receiver<StepOutcome>>,
    pending_token: Option<CompletionToken>,
}

impl Generator {
    /// Instantiate a generator: locate the destination root from the start
    /// directory, bind storage to it, and seed the implicit `help` option.
    pub fn new(blueprint: Arc<Blueprint>, inst: Instantiation, env: Environment) -> Self {
        let destination_root = env.root_locator.locate(&inst.start_dir);
        let storage = Storage::open(&destination_root, env.filesystem.clone());
        let appname = appname_from_root(&destination_root);
        let description = blueprint.description().to_string();

        debug!(
            namespace = %inst.namespace,
            root = %destination_root.display(),
            "generator instantiated"
        );

        let mut r#gen = Self {
            description,
            resolved: inst.resolved,
            namespace: inst.namespace,
            args: inst.args,
            options: inst.options,
            running: false,
            registry: Registry::new(),
            values: Map::new(),
            destination_root,
            appname,
            storage,
            storage_generation: 0,
            conflicter: Conflicter::new(),
            events: EventBus::new(),
            pending: None,
            pending_token: None,
            blueprint,
            env,
        };

        // The blueprint's setup bodies declare arguments, options, and hooks
        // against the fresh instance, inherited setups first.
        let blueprint = r#gen.blueprint.clone();
        for setup in blueprint.setups() {
            setup(&mut r#gen);
        }

        r#gen
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// The registry-qualified identifier this generator was instantiated
    /// under.
    pub fn resolved(&self) -> &str {
        &self.resolved
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Application name derived from the destination root's base name.
    pub fn appname(&self) -> &str {
        &self.appname
    }

    /// A value bound by `argument`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn options_declared(&self) -> &[OptionSpec] {
        self.registry.options()
    }

    pub fn arguments_declared(&self) -> &[ArgumentSpec] {
        self.registry.arguments()
    }

    pub fn hooks(&self) -> &[HookEntry] {
        self.registry.hooks()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    /// How many times storage has been rebound by destination-root moves.
    pub fn storage_generation(&self) -> usize {
        self.storage_generation
    }

    /// Subscribe to the run event stream (`Method` and `Error`).
    pub fn subscribe(&self) -> mpsc::Receiver<RunEvent> {
        self.events.subscribe()
    }

    // ── Destination root ──────────────────────────────────────────────────────

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Move the destination root, rebinding storage to the new root.
    ///
    /// Setting the current value again is a no-op: rebinding happens only
    /// when the root actually changes.
    pub fn set_destination_root(&mut self, path: impl Into<PathBuf>) -> &Path {
        let path = path.into();
        if path != self.destination_root {
            info!(from = %self.destination_root.display(), to = %path.display(), "destination root moved");
            self.destination_root = path;
            self.storage = Storage::open(&self.destination_root, self.env.filesystem.clone());
            self.appname = appname_from_root(&self.destination_root);
            self.storage_generation += 1;
        }
        &self.destination_root
    }

    // ── Declarations ──────────────────────────────────────────────────────────

    /// Declare a positional argument and immediately bind its value.
    ///
    /// `List`-kinded arguments bind the entire positional list; everything
    /// else binds the slot at its registration index, coerced per the kind.
    /// A missing required value emits an `Error` event; the argument still
    /// registers. Panics if the generator is already running.
    pub fn argument(&mut self, name: &str, config: ArgumentConfig) -> &mut Self {
        assert!(
            !self.running,
            "arguments must be declared before the generator runs"
        );

        let index = self.registry.next_argument_index();
        let spec = self.registry.register_argument(name, config);

        match spec.kind {
            ValueKind::List => {
                self.values
                    .insert(name.to_string(), Value::Array(self.args.clone()));
            }
            kind => match self.args.get(index) {
                Some(value) => {
                    self.values.insert(name.to_string(), kind.coerce(value.clone()));
                }
                None => {
                    if spec.required && !self.help_requested() {
                        let cause = DomainError::MissingArgument {
                            name: name.to_string(),
                        }
                        .to_string();
                        warn!(argument = name, "missing required argument");
                        self.events.emit(RunEvent::Error { cause });
                    }
                }
            },
        }

        self
    }

    /// Declare a named option. Unset config fields take the documented
    /// defaults; the declared default merges into the options bag when the
    /// caller supplied no value. Panics if the generator is already running.
    pub fn option(&mut self, name: &str, config: OptionConfig) -> &mut Self {
        assert!(
            !self.running,
            "options must be declared before the generator runs"
        );

        let default = self.registry.register_option(name, config).default.clone();
        self.options.entry(name.to_string()).or_insert(default);
        self
    }

    /// Declare a hook: registers the option that carries the hook's
    /// invocation context (defaulted via `default_for`) and appends the hook
    /// entry. Panics if the generator is already running.
    pub fn hook_for(&mut self, name: &str) -> &mut Self {
        assert!(
            !self.running,
            "hooks must be declared before the generator runs"
        );

        let default = self.default_for(name);
        self.registry.register_option(
            name,
            OptionConfig::default()
                .description(HOOK_OPTION_DESC)
                .default_value(default.clone()),
        );
        self.options.entry(name.to_string()).or_insert(default);
        self.registry.add_hook(name);
        self
    }

    /// Replace the description shown by `help`.
    pub fn desc(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Resolve a default value for `name`: instantiation options first, then
    /// the project-defaults port, then `Null`.
    pub fn default_for(&self, name: &str) -> Value {
        if let Some(value) = self.options.get(name) {
            return value.clone();
        }
        self.env
            .project_defaults
            .lookup(name)
            .unwrap_or(Value::Null)
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn usage(&self) -> String {
        self.registry.usage(&self.invocation())
    }

    pub fn help(&self) -> String {
        self.registry.help(&self.invocation(), &self.description)
    }

    fn invocation(&self) -> String {
        format!("{} {}", self.env.invocation, self.namespace)
    }

    // ── Step facilities ───────────────────────────────────────────────────────

    /// Queue a file-write intent for the current step's resolution pass.
    /// Relative paths resolve against the destination root.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        let path = path.into();
        let path = if path.is_relative() {
            self.destination_root.join(path)
        } else {
            path
        };
        self.conflicter.register(ConflictEntry::new(path, content));
        self
    }

    /// Obtain the current step's completion token, suspending the pipeline
    /// until it is signalled. Repeated calls within one step hand back the
    /// same token.
    pub fn defer(&mut self) -> CompletionToken {
        if let Some(token) = &self.pending_token {
            return token.clone();
        }
        let (token, rx) = CompletionToken::channel();
        self.pending = Some(rx);
        self.pending_token = Some(token.clone());
        token
    }

    // ── Run engine ────────────────────────────────────────────────────────────

    /// Execute the step pipeline.
    ///
    /// Emits one `Method` event per step and runs one conflicter resolution
    /// pass after each step completes. A step failure emits `Error` and
    /// truncates the remaining steps. Returns exactly once, with counts only:
    /// the error value travels on the event stream, never here.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub fn run(&mut self) -> RunReport {
        self.running = true;
        let steps = self.blueprint.ordered_steps();
        let mut report = RunReport::default();

        info!(steps = steps.len(), "running generator");

        for step in &steps {
            self.events.emit(RunEvent::Method {
                name: step.name().to_string(),
            });
            report.steps_run += 1;

            let outcome = self.execute_step(step);
            let failed = matches!(outcome, StepOutcome::Failed { .. });
            if let StepOutcome::Failed { cause } = outcome {
                warn!(step = step.name(), %cause, "step failed");
                self.events.emit(RunEvent::Error { cause });
            }

            report.conflict_passes += 1;
            match self.resolve_conflicts() {
                Ok(resolution) => {
                    debug!(
                        step = step.name(),
                        written = resolution.written,
                        skipped = resolution.skipped,
                        "conflicts resolved"
                    );
                }
                Err(e) => {
                    warn!(step = step.name(), error = %e, "conflict pass failed");
                    self.events.emit(RunEvent::Error {
                        cause: e.to_string(),
                    });
                    break;
                }
            }

            if failed {
                break;
            }
        }

        report
    }

    fn execute_step(&mut self, step: &Step) -> StepOutcome {
        self.pending = None;
        self.pending_token = None;

        let result = step.invoke(self);

        let pending = self.pending.take();
        // Drop our own handle before blocking, so a token the step discarded
        // closes the channel instead of suspending forever.
        self.pending_token = None;

        match result {
            // A sync error wins over a pending token the failing step may
            // never fire.
            Err(e) => StepOutcome::Failed {
                cause: e.to_string(),
            },
            Ok(()) => match pending {
                Some(rx) => rx.recv().unwrap_or_else(|_| StepOutcome::Failed {
                    cause: "completion token dropped without being signalled".into(),
                }),
                None => StepOutcome::Completed,
            },
        }
    }

    fn resolve_conflicts(&mut self) -> ArmatureResult<ResolutionReport> {
        let fs = self.env.filesystem.clone();
        let prompt = self.env.prompt.clone();
        self.conflicter.resolve(fs.as_ref(), prompt.as_ref())
    }

    // ── Hook engine ───────────────────────────────────────────────────────────

    /// Resolve and run every declared hook, strictly in series.
    ///
    /// Each hook's blueprint comes from the resolver port, keyed by the hook
    /// name and the value bound to its option; the sub-generator runs its
    /// whole pipeline (conflict resolution included) before the next hook
    /// starts. Every hook runs even after a failure; the first error —
    /// a resolution failure or the first `Error` event a sub-generator
    /// emitted — is returned once the last hook finished.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub fn run_hooks(&mut self) -> Result<(), ArmatureError> {
        let hooks = self.registry.hooks().to_vec();
        let mut first_err: Option<ArmatureError> = None;

        info!(hooks = hooks.len(), "running hooks");

        for hook in &hooks {
            let context = self.default_for(&hook.name);
            let blueprint = match self.env.resolver.resolve(&hook.name, &context) {
                Ok(blueprint) => blueprint,
                Err(e) => {
                    warn!(hook = %hook.name, error = %e, "hook resolution failed");
                    first_err.get_or_insert(e);
                    continue;
                }
            };

            let inst = Instantiation::new(hook.name.clone())
                .resolved(blueprint.name().to_string())
                .args(self.args.clone())
                .start_dir(self.destination_root.clone());
            let mut sub = Generator::new(blueprint, inst, self.env.clone());
            let sub_events = sub.subscribe();

            debug!(hook = %hook.name, "hook pipeline starting");
            sub.run();

            if first_err.is_none() {
                if let Some(cause) = sub_events.try_iter().find_map(|event| match event {
                    RunEvent::Error { cause } => Some(cause),
                    RunEvent::Method { .. } => None,
                }) {
                    first_err = Some(
                        EngineError::HookFailed {
                            hook: hook.name.clone(),
                            cause,
                        }
                        .into(),
                    );
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn help_requested(&self) -> bool {
        match self.options.get(HELP_OPTION) {
            Some(Value::Null) | Some(Value::Bool(false)) | None => false,
            Some(_) => true,
        }
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("namespace", &self.namespace)
            .field("resolved", &self.resolved)
            .field("running", &self.running)
            .field("destination_root", &self.destination_root)
            .finish_non_exhaustive()
    }
}
