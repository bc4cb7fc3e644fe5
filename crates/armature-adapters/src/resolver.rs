//! In-memory blueprint registry implementing the resolver port.
//!
//! Lookup keys follow the `name:context` convention: a hook whose option is
//! bound to the string `"ember"` resolves `"hook1:ember"` first, then falls
//! back to the bare hook name. The composition rule lives here, not in the
//! engine.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use serde_json::Value;
use tracing::debug;

use armature_core::{
    application::{ports::Resolver, Blueprint, EngineError},
    error::{ArmatureError, ArmatureResult},
};

/// Thread-safe in-memory blueprint registry.
#[derive(Clone, Default)]
pub struct InMemoryResolver {
    inner: Arc<RwLock<HashMap<String, Arc<Blueprint>>>>,
}

impl InMemoryResolver {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in blueprints loaded.
    pub fn with_builtin() -> ArmatureResult<Self> {
        let resolver = Self::new();
        crate::builtin::register_builtin(&resolver)?;
        Ok(resolver)
    }

    /// Insert or replace a blueprint under a lookup key.
    pub fn register(
        &self,
        key: impl Into<String>,
        blueprint: Arc<Blueprint>,
    ) -> ArmatureResult<()> {
        let key = key.into();
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        debug!(%key, blueprint = blueprint.name(), "blueprint registered");
        inner.insert(key, blueprint);
        Ok(())
    }

    /// Direct lookup by exact key, bypassing the hook composition rule.
    pub fn get(&self, key: &str) -> ArmatureResult<Arc<Blueprint>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.get(key).cloned().ok_or_else(|| {
            EngineError::Resolution {
                hook: key.to_string(),
                reason: "no blueprint registered under this key".into(),
            }
            .into()
        })
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        let mut keys: Vec<String> = inner.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Resolver for InMemoryResolver {
    fn resolve(&self, hook: &str, context: &Value) -> ArmatureResult<Arc<Blueprint>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;

        if let Value::String(context) = context {
            if !context.is_empty() {
                let composed = format!("{hook}:{context}");
                if let Some(blueprint) = inner.get(&composed) {
                    return Ok(blueprint.clone());
                }
            }
        }

        inner.get(hook).cloned().ok_or_else(|| {
            EngineError::Resolution {
                hook: hook.to_string(),
                reason: format!("no blueprint registered for context {context}"),
            }
            .into()
        })
    }
}

fn lock_error() -> ArmatureError {
    ArmatureError::Internal {
        message: "blueprint registry lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint(name: &str) -> Arc<Blueprint> {
        Arc::new(Blueprint::builder(name).build().unwrap())
    }

    #[test]
    fn composed_key_wins_over_bare_name() {
        let resolver = InMemoryResolver::new();
        resolver.register("hook1", blueprint("generic")).unwrap();
        resolver.register("hook1:ember", blueprint("ember")).unwrap();

        let resolved = resolver
            .resolve("hook1", &Value::String("ember".into()))
            .unwrap();
        assert_eq!(resolved.name(), "ember");
    }

    #[test]
    fn falls_back_to_bare_name() {
        let resolver = InMemoryResolver::new();
        resolver.register("hook1", blueprint("generic")).unwrap();

        let resolved = resolver
            .resolve("hook1", &Value::String("unknown".into()))
            .unwrap();
        assert_eq!(resolved.name(), "generic");
    }

    #[test]
    fn non_string_context_uses_bare_name() {
        let resolver = InMemoryResolver::new();
        resolver.register("hook1", blueprint("generic")).unwrap();

        let resolved = resolver.resolve("hook1", &Value::Bool(true)).unwrap();
        assert_eq!(resolved.name(), "generic");
    }

    #[test]
    fn unresolvable_hook_errors() {
        let resolver = InMemoryResolver::new();
        assert!(resolver.resolve("ghost", &Value::Null).is_err());
    }

    #[test]
    fn keys_are_sorted() {
        let resolver = InMemoryResolver::new();
        resolver.register("b", blueprint("b")).unwrap();
        resolver.register("a", blueprint("a")).unwrap();

        assert_eq!(resolver.keys(), ["a", "b"]);
    }
}
