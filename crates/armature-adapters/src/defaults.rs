//! Project-level option defaults.

use std::collections::HashMap;

use serde_json::Value;

use armature_core::application::ports::ProjectDefaults;

/// Fixed map of project-level defaults, typically loaded from the CLI's
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticDefaults {
    values: HashMap<String, Value>,
}

impl StaticDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl ProjectDefaults for StaticDefaults {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_hits_and_misses() {
        let defaults = StaticDefaults::new().with("theme", "dark");
        assert_eq!(defaults.lookup("theme"), Some(json!("dark")));
        assert_eq!(defaults.lookup("absent"), None);
    }
}
