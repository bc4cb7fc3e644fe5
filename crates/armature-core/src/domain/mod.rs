// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Armature.
//!
//! This module contains pure business logic with ZERO external dependencies
//! beyond serde's value types. All I/O, prompting, and generator resolution
//! concerns are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable specs**: Registered specs are Clone + PartialEq and never
//!   mutated after creation
//! - **Rendering lives with the data**: usage/help text is produced by the
//!   registry that owns the declarations

pub mod conflict;
pub mod error;
pub mod events;
pub mod registry;
pub mod value;

// Re-exports for convenience
pub use conflict::{ConflictDecision, ConflictEntry, ResolutionReport};
pub use error::{DomainError, ErrorCategory};
pub use events::{RunEvent, RunReport};
pub use registry::{
    ArgumentConfig, ArgumentSpec, HookEntry, OptionConfig, OptionSpec, Registry, HELP_OPTION,
    HELP_OPTION_DESC, HOOK_OPTION_DESC,
};
pub use value::{appname_from_root, ValueKind};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // ========================================================================
    // Registry Tests
    // ========================================================================

    #[test]
    fn fresh_registry_has_exactly_the_help_option() {
        let reg = Registry::new();
        assert_eq!(reg.options().len(), 1);
        assert_eq!(reg.options()[0].name, HELP_OPTION);
        assert_eq!(reg.options()[0].description, HELP_OPTION_DESC);
    }

    #[test]
    fn option_defaults_match_contract() {
        let mut reg = Registry::new();
        reg.register_option("foo", OptionConfig::default());

        assert_eq!(reg.options().len(), 2);
        let spec = reg.options().last().unwrap();
        assert_eq!(
            spec,
            &OptionSpec {
                name: "foo".into(),
                description: "Description for foo".into(),
                kind: ValueKind::Bool,
                default: Value::Bool(false),
                hidden: false,
            }
        );
    }

    #[test]
    fn option_config_overrides_field_by_field() {
        let mut reg = Registry::new();
        reg.register_option(
            "theme",
            OptionConfig::default()
                .kind(ValueKind::Str)
                .default_value("dark")
                .description("Color theme"),
        );

        let spec = reg.options().last().unwrap();
        assert_eq!(spec.kind, ValueKind::Str);
        assert_eq!(spec.default, json!("dark"));
        assert_eq!(spec.description, "Color theme");
        assert!(!spec.hidden);
    }

    #[test]
    fn argument_defaults_to_required_string() {
        let mut reg = Registry::new();
        let spec = reg.register_argument("name", ArgumentConfig::default());

        assert_eq!(spec.kind, ValueKind::Str);
        assert!(spec.required);
        assert_eq!(reg.arguments().len(), 1);
    }

    #[test]
    fn argument_indices_follow_declaration_order() {
        let mut reg = Registry::new();
        assert_eq!(reg.next_argument_index(), 0);
        reg.register_argument("first", ArgumentConfig::default());
        assert_eq!(reg.next_argument_index(), 1);
        reg.register_argument("second", ArgumentConfig::default());
        assert_eq!(reg.next_argument_index(), 2);
    }

    #[test]
    fn hooks_record_in_registration_order() {
        let mut reg = Registry::new();
        reg.add_hook("model");
        reg.add_hook("view");

        let names: Vec<&str> = reg.hooks().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["model", "view"]);
    }

    // ========================================================================
    // Usage Rendering Tests
    // ========================================================================

    #[test]
    fn usage_with_options_and_argument() {
        let mut reg = Registry::new();
        reg.register_argument(
            "baz",
            ArgumentConfig::default().kind(ValueKind::Number).required(false),
        );

        assert_eq!(reg.usage("armature dummy"), "armature dummy [options] [<baz>]");
    }

    #[test]
    fn usage_drops_arguments_segment_when_registry_cleared() {
        let mut reg = Registry::new();
        reg.register_argument("baz", ArgumentConfig::default().required(false));
        reg.clear_arguments();

        assert_eq!(reg.usage("armature dummy"), "armature dummy [options]");
    }

    #[test]
    fn usage_drops_options_segment_when_both_registries_cleared() {
        let mut reg = Registry::new();
        reg.clear_arguments();
        reg.clear_options();

        assert_eq!(reg.usage("armature dummy"), "armature dummy");
    }

    #[test]
    fn usage_brackets_required_arguments_too() {
        let mut reg = Registry::new();
        reg.register_argument("app", ArgumentConfig::default().required(true));

        assert_eq!(reg.usage("armature x"), "armature x [options] [<app>]");
    }

    // ========================================================================
    // Help Rendering Tests
    // ========================================================================

    #[test]
    fn help_renders_all_blocks() {
        let mut reg = Registry::new();
        reg.register_option("ooOoo", OptionConfig::default());
        reg.register_argument(
            "baz",
            ArgumentConfig::default().kind(ValueKind::Number).required(false),
        );

        let help = reg.help("armature dummy", "A new desc for this generator");

        assert!(help.contains("Usage:"));
        assert!(help.contains("armature dummy [options] [<baz>]"));
        assert!(help.contains("A new desc for this generator"));
        assert!(help.contains("Options:"));
        assert!(help.contains("--help   # Print generator's options and usage"));
        assert!(help.contains("--ooOoo  # Description for ooOoo"));
        assert!(help.contains("Arguments:"));
        assert!(help.contains("baz  # Type: Number  Required: false"));
    }

    #[test]
    fn help_omits_hidden_options() {
        let mut reg = Registry::new();
        reg.register_option("secret", OptionConfig::default().hidden(true));

        let help = reg.help("armature dummy", "");
        assert!(!help.contains("secret"));
    }

    #[test]
    fn help_omits_arguments_block_without_arguments() {
        let reg = Registry::new();
        let help = reg.help("armature dummy", "");
        assert!(!help.contains("Arguments:"));
    }

    #[test]
    fn help_is_deterministic() {
        let mut reg = Registry::new();
        reg.register_option("alpha", OptionConfig::default());
        reg.register_argument("one", ArgumentConfig::default());

        let a = reg.help("armature g", "desc");
        let b = reg.help("armature g", "desc");
        assert_eq!(a, b);
    }

    // ========================================================================
    // Conflict Vocabulary Tests
    // ========================================================================

    #[test]
    fn resolution_report_totals() {
        let report = ResolutionReport {
            written: 2,
            skipped: 1,
            identical: 3,
        };
        assert_eq!(report.total(), 6);
    }

    #[test]
    fn run_event_error_predicate() {
        assert!(RunEvent::Error { cause: "x".into() }.is_error());
        assert!(!RunEvent::Method { name: "y".into() }.is_error());
    }
}
