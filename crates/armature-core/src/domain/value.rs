//! Value kinds for declared options and arguments, plus the coercion rules
//! applied when positional input is bound to a declared argument.
//!
//! Values themselves are `serde_json::Value`s: callers hand generators an
//! options bag and a positional list in whatever shapes they parsed, and the
//! declared kind decides how each one is interpreted.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

/// The declared shape of an option or argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// A flag. The default kind for options.
    Bool,
    /// Free text. The default kind for arguments.
    #[default]
    Str,
    /// Integer or float.
    Number,
    /// The whole positional list, not a single slot.
    List,
}

impl ValueKind {
    /// Coerce a bound value toward this kind.
    ///
    /// Only `Number` and `Str` actively convert; everything else passes
    /// through. Coercion is best-effort: a value that cannot be converted is
    /// bound unchanged rather than rejected.
    pub fn coerce(self, value: Value) -> Value {
        match self {
            Self::Number => match value {
                Value::String(s) => {
                    if let Ok(n) = s.parse::<i64>() {
                        Value::from(n)
                    } else if let Ok(f) = s.parse::<f64>() {
                        Value::from(f)
                    } else {
                        Value::String(s)
                    }
                }
                other => other,
            },
            Self::Str => match value {
                Value::Number(n) => Value::String(n.to_string()),
                Value::Bool(b) => Value::String(b.to_string()),
                other => other,
            },
            Self::Bool | Self::List => value,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bool => "Boolean",
            Self::Str => "String",
            Self::Number => "Number",
            Self::List => "Array",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(Self::Bool),
            "str" | "string" => Ok(Self::Str),
            "number" | "num" => Ok(Self::Number),
            "array" | "list" => Ok(Self::List),
            other => Err(format!("unknown value kind: {other}")),
        }
    }
}

/// Derive a human application name from a destination root.
///
/// The base name of the root directory, reduced to alphanumerics and spaces;
/// a run of any other characters becomes a single space.
/// `"temp.dev"` becomes `"temp dev"`.
pub fn appname_from_root(root: &Path) -> String {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    let mut pending_gap = false;
    for c in base.chars() {
        if c.is_alphanumeric() {
            if pending_gap && !out.is_empty() {
                out.push(' ');
            }
            pending_gap = false;
            out.push(c);
        } else {
            pending_gap = true;
        }
    }
    out
}
