//! Built-in blueprints shipped with the framework.
//!
//! Small, dependency-free generators that double as living documentation:
//! `app` scaffolds a minimal project shell and delegates model generation to
//! the `model` hook.

use std::sync::Arc;

use serde_json::Value;

use armature_core::{
    application::Blueprint,
    domain::{ArgumentConfig, ValueKind},
    error::ArmatureResult,
};

use crate::resolver::InMemoryResolver;

/// Register every built-in blueprint into a resolver.
pub fn register_builtin(resolver: &InMemoryResolver) -> ArmatureResult<()> {
    resolver.register("app", app_blueprint()?)?;
    resolver.register("model", model_blueprint()?)?;
    Ok(())
}

/// `app`: a minimal project shell with a delegated `model` hook.
pub fn app_blueprint() -> ArmatureResult<Arc<Blueprint>> {
    let blueprint = Blueprint::builder("app")
        .describe("Scaffold a minimal application shell")
        .setup(|r#gen| {
            r#gen.argument("name", ArgumentConfig::default().required(false));
            r#gen.hook_for("model");
        })
        .step("write_readme", |r#gen| {
            let name = project_name(r#gen);
            r#gen.write("README.md", format!("# {name}\n\nGenerated by armature.\n"));
            Ok(())
        })
        .step("write_index", |r#gen| {
            let name = project_name(r#gen);
            r#gen.write(
                "index.html",
                format!("<!doctype html>\n<title>{name}</title>\n"),
            );
            Ok(())
        })
        .step("record_name", |r#gen| {
            let name = project_name(r#gen);
            r#gen.storage_mut().set("name", name)?;
            Ok(())
        })
        .build()?;
    Ok(Arc::new(blueprint))
}

/// `model`: writes one data-model stub, named by the first positional value.
pub fn model_blueprint() -> ArmatureResult<Arc<Blueprint>> {
    let blueprint = Blueprint::builder("model")
        .describe("Generate a data model stub")
        .setup(|r#gen| {
            r#gen.argument(
                "name",
                ArgumentConfig::default().kind(ValueKind::Str).required(false),
            );
        })
        .step("write_model", |r#gen| {
            let name = r#gen
                .value("name")
                .and_then(Value::as_str)
                .unwrap_or("application-model")
                .to_string();
            r#gen.write(
                format!("app/models/{name}.json"),
                format!("{{\n  \"model\": \"{name}\"\n}}\n"),
            );
            Ok(())
        })
        .build()?;
    Ok(Arc::new(blueprint))
}

fn project_name(r#gen: &armature_core::application::Generator) -> String {
    r#gen.value("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| r#gen.appname().to_string())
}
