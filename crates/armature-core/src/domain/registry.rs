//! Declarative argument/option/hook registry.
//!
//! A [`Registry`] is pure bookkeeping: it records what a generator declared
//! and renders the help/usage text from those declarations. Binding positional
//! values and enforcing required-ness involve the event stream and therefore
//! live on the generator itself, not here.

use serde_json::Value;

use super::value::ValueKind;

/// Name of the option every generator carries from birth.
pub const HELP_OPTION: &str = "help";

/// Description of the implicit `help` option.
pub const HELP_OPTION_DESC: &str = "Print generator's options and usage";

/// Description given to options created by hook declarations.
pub const HOOK_OPTION_DESC: &str = "Something to be invoked";

// ── Specs ─────────────────────────────────────────────────────────────────────

/// A declared positional argument.
///
/// Never mutated after creation; destroyed with the generator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    pub name: String,
    pub kind: ValueKind,
    pub required: bool,
    pub description: Option<String>,
}

/// Caller-supplied overrides for [`ArgumentSpec`] defaults.
#[derive(Debug, Clone, Default)]
pub struct ArgumentConfig {
    pub kind: Option<ValueKind>,
    pub required: Option<bool>,
    pub description: Option<String>,
}

impl ArgumentConfig {
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared named option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    pub kind: ValueKind,
    pub default: Value,
    pub hidden: bool,
}

/// Caller-supplied overrides for [`OptionSpec`] defaults.
#[derive(Debug, Clone, Default)]
pub struct OptionConfig {
    pub description: Option<String>,
    pub kind: Option<ValueKind>,
    pub default: Option<Value>,
    pub hidden: Option<bool>,
}

impl OptionConfig {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}

/// A declared hook. The name matches the option that supplies the hook's
/// invocation context.
#[derive(Debug, Clone, PartialEq)]
pub struct HookEntry {
    pub name: String,
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Everything a generator declared during setup.
#[derive(Debug, Clone)]
pub struct Registry {
    options: Vec<OptionSpec>,
    arguments: Vec<ArgumentSpec>,
    hooks: Vec<HookEntry>,
}

impl Registry {
    /// A fresh registry already carries the implicit `help` option, so the
    /// option count starts at one.
    pub fn new() -> Self {
        Self {
            options: vec![OptionSpec {
                name: HELP_OPTION.into(),
                description: HELP_OPTION_DESC.into(),
                kind: ValueKind::Bool,
                default: Value::Bool(false),
                hidden: false,
            }],
            arguments: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Append an option spec, filling unset fields with the documented
    /// defaults: `"Description for <name>"`, `Bool`, `false`, not hidden.
    pub fn register_option(&mut self, name: &str, config: OptionConfig) -> &OptionSpec {
        let spec = OptionSpec {
            name: name.to_string(),
            description: config
                .description
                .unwrap_or_else(|| format!("Description for {name}")),
            kind: config.kind.unwrap_or(ValueKind::Bool),
            default: config.default.unwrap_or(Value::Bool(false)),
            hidden: config.hidden.unwrap_or(false),
        };
        self.options.push(spec);
        self.options.last().expect("just pushed")
    }

    /// Append an argument spec. The registration index (position in the
    /// declaration order) decides which positional slot the argument binds.
    pub fn register_argument(&mut self, name: &str, config: ArgumentConfig) -> ArgumentSpec {
        let spec = ArgumentSpec {
            name: name.to_string(),
            kind: config.kind.unwrap_or_default(),
            required: config.required.unwrap_or(true),
            description: config.description,
        };
        self.arguments.push(spec.clone());
        spec
    }

    /// Append a hook entry. The matching option is registered by the caller.
    pub fn add_hook(&mut self, name: &str) {
        self.hooks.push(HookEntry {
            name: name.to_string(),
        });
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn hooks(&self) -> &[HookEntry] {
        &self.hooks
    }

    /// Index the next registered argument would bind.
    pub fn next_argument_index(&self) -> usize {
        self.arguments.len()
    }

    #[cfg(test)]
    pub(crate) fn clear_arguments(&mut self) {
        self.arguments.clear();
    }

    #[cfg(test)]
    pub(crate) fn clear_options(&mut self) {
        self.options.clear();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// One-line usage string: `<invocation> [options] [<arg>] ...`.
    ///
    /// `[options]` appears only when at least one option is registered; each
    /// argument contributes one bracketed placeholder regardless of its
    /// required flag. Either segment disappears entirely with an empty
    /// backing registry.
    pub fn usage(&self, invocation: &str) -> String {
        let mut out = invocation.to_string();
        if !self.options.is_empty() {
            out.push_str(" [options]");
        }
        for arg in &self.arguments {
            out.push_str(&format!(" [<{}>]", arg.name));
        }
        out
    }

    /// Full help text: usage line, description, options block, arguments
    /// block. Deterministic output; columns padded so the `#` markers align.
    pub fn help(&self, invocation: &str, description: &str) -> String {
        let mut out = String::new();
        out.push_str("Usage:\n");
        out.push_str(&format!("  {}\n", self.usage(invocation)));

        if !description.is_empty() {
            out.push('\n');
            out.push_str(description);
            out.push('\n');
        }

        let visible: Vec<&OptionSpec> = self.options.iter().filter(|o| !o.hidden).collect();
        if !visible.is_empty() {
            out.push_str("\nOptions:\n");
            let width = visible.iter().map(|o| o.name.len() + 2).max().unwrap_or(0);
            for opt in visible {
                let flag = format!("--{}", opt.name);
                out.push_str(&format!("  {flag:<width$}  # {}\n", opt.description));
            }
        }

        if !self.arguments.is_empty() {
            out.push_str("\nArguments:\n");
            let width = self.arguments.iter().map(|a| a.name.len()).max().unwrap_or(0);
            for arg in &self.arguments {
                out.push_str(&format!(
                    "  {:<width$}  # Type: {}  Required: {}\n",
                    arg.name, arg.kind, arg.required
                ));
            }
        }

        out
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
