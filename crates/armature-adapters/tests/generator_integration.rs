//! Integration tests: the core pipeline against the in-memory adapters.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use armature_adapters::{
    AutoConfirm, InMemoryResolver, MarkerRootLocator, MemoryFilesystem, StaticDefaults,
};
use armature_core::{
    application::{Blueprint, Environment, Generator, Instantiation},
    domain::RunEvent,
};

fn environment(fs: MemoryFilesystem, resolver: InMemoryResolver) -> Environment {
    let fs = Arc::new(fs);
    Environment::new(
        Arc::new(resolver),
        fs.clone(),
        Arc::new(AutoConfirm::force()),
        Arc::new(MarkerRootLocator::new(fs)),
        Arc::new(StaticDefaults::new()),
    )
}

fn app_generator(fs: MemoryFilesystem, args: &[&str]) -> Generator {
    let resolver = InMemoryResolver::with_builtin().unwrap();
    let blueprint = resolver.get("app").unwrap();
    Generator::new(
        blueprint,
        Instantiation::new("app")
            .string_args(args.iter().copied())
            .start_dir("/work/temp.dev"),
        environment(fs, resolver),
    )
}

#[test]
fn full_pipeline_writes_the_shell() {
    let fs = MemoryFilesystem::new();
    let mut r#gen = app_generator(fs.clone(), &["my-app"]);
    let events = r#gen.subscribe();

    let report = r#gen.run();

    assert_eq!(report.steps_run, 3);
    let methods = events
        .try_iter()
        .filter(|e| matches!(e, RunEvent::Method { .. }))
        .count();
    assert_eq!(methods, 3);

    let readme = fs
        .snapshot(Path::new("/work/temp.dev/README.md"))
        .expect("README written");
    assert!(readme.contains("# my-app"));
    assert!(fs.snapshot(Path::new("/work/temp.dev/index.html")).is_some());
}

#[test]
fn appname_falls_back_when_no_name_argument() {
    let fs = MemoryFilesystem::new();
    let mut r#gen = app_generator(fs.clone(), &[]);

    r#gen.run();

    let readme = fs.snapshot(Path::new("/work/temp.dev/README.md")).unwrap();
    assert!(readme.contains("# temp dev"));
}

#[test]
fn hooks_resolve_through_the_registry_and_run_in_series() {
    let fs = MemoryFilesystem::new();
    let mut r#gen = app_generator(fs.clone(), &[]);

    r#gen.run_hooks().unwrap();

    // the `model` hook ran its own full pipeline, conflicts included
    assert!(fs
        .snapshot(Path::new("/work/temp.dev/app/models/application-model.json"))
        .is_some());
}

#[test]
fn hook_sub_generator_receives_the_positional_args() {
    let fs = MemoryFilesystem::new();
    let mut r#gen = app_generator(fs.clone(), &["invoice"]);

    r#gen.run_hooks().unwrap();

    assert!(fs
        .snapshot(Path::new("/work/temp.dev/app/models/invoice.json"))
        .is_some());
}

#[test]
fn destination_root_binds_where_the_marker_lives() {
    let fs = MemoryFilesystem::new();
    fs.seed("/project/.armaturerc.json", r#"{"flavor": "vanilla"}"#);

    let resolver = InMemoryResolver::with_builtin().unwrap();
    let blueprint = resolver.get("app").unwrap();
    let r#gen = Generator::new(
        blueprint,
        Instantiation::new("app").start_dir("/project/subdir"),
        environment(fs, resolver),
    );

    assert_eq!(r#gen.destination_root(), Path::new("/project"));
    assert_eq!(r#gen.storage().get("flavor"), Some(&json!("vanilla")));
}

#[test]
fn skip_all_policy_preserves_diverging_files() {
    let fs = MemoryFilesystem::new();
    fs.seed("/work/temp.dev/README.md", "hand-edited\n");

    let resolver = InMemoryResolver::with_builtin().unwrap();
    let blueprint = resolver.get("app").unwrap();
    let fs_arc = Arc::new(fs.clone());
    let env = Environment::new(
        Arc::new(resolver),
        fs_arc.clone(),
        Arc::new(AutoConfirm::skip_all()),
        Arc::new(MarkerRootLocator::new(fs_arc)),
        Arc::new(StaticDefaults::new()),
    );
    let mut r#gen = Generator::new(
        blueprint,
        Instantiation::new("app").start_dir("/work/temp.dev"),
        env,
    );

    r#gen.run();

    // diverging file kept, fresh file still created
    assert_eq!(
        fs.snapshot(Path::new("/work/temp.dev/README.md")).as_deref(),
        Some("hand-edited\n")
    );
    assert!(fs.snapshot(Path::new("/work/temp.dev/index.html")).is_some());
}

#[test]
fn storage_written_by_one_run_is_read_by_the_next() {
    let fs = MemoryFilesystem::new();
    let mut first = app_generator(fs.clone(), &["persisted"]);
    first.run();

    let second = app_generator(fs, &[]);
    assert_eq!(second.storage().get("name"), Some(&json!("persisted")));
}

#[test]
fn project_defaults_feed_hook_options() {
    let fs = MemoryFilesystem::new();
    let resolver = InMemoryResolver::with_builtin().unwrap();

    // a project-level default supplies the hook context
    let target = Arc::new(
        Blueprint::builder("themed-model")
            .step("write", |r#gen| {
                r#gen.write("themed.txt", "themed");
                Ok(())
            })
            .build()
            .unwrap(),
    );
    resolver.register("model:dark", target).unwrap();

    let fs_arc = Arc::new(fs.clone());
    let env = Environment::new(
        Arc::new(resolver.clone()),
        fs_arc.clone(),
        Arc::new(AutoConfirm::force()),
        Arc::new(MarkerRootLocator::new(fs_arc)),
        Arc::new(StaticDefaults::new().with("model", "dark")),
    );
    let mut r#gen = Generator::new(
        resolver.get("app").unwrap(),
        Instantiation::new("app").start_dir("/work/site"),
        env,
    );

    r#gen.run_hooks().unwrap();

    assert!(fs.snapshot(Path::new("/work/site/themed.txt")).is_some());
}
