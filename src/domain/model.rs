use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw minor body identifier as supplied by the caller.
///
/// Callers pass names, designations, integer numbers or float numbers
/// interchangeably; batch entry points accept any iterable of values
/// convertible into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Name(String),
    Number(u64),
    Float(f64),
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Name(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Name(value)
    }
}

impl From<&String> for Identifier {
    fn from(value: &String) -> Self {
        Identifier::Name(value.clone())
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier::Number(value)
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Identifier::Number(value as u64)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        if value >= 0 {
            Identifier::Number(value as u64)
        } else {
            Identifier::Float(value as f64)
        }
    }
}

impl From<f64> for Identifier {
    fn from(value: f64) -> Self {
        Identifier::Float(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Name(s) => write!(f, "{}", s),
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A standardized identifier, ready for index or remote lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Number(u64),
    /// Canonical provisional or survey designation, e.g. "2001 JE2", "2040 P-L".
    Designation(String),
    /// Lowercased name with collapsed whitespace.
    Name(String),
}

impl LookupKey {
    /// The query string sent to the remote service.
    pub fn query(&self) -> String {
        match self {
            LookupKey::Number(n) => n.to_string(),
            LookupKey::Designation(d) => d.clone(),
            LookupKey::Name(n) => n.clone(),
        }
    }
}

/// The result triple of one resolution.
///
/// `None` fields mean "not found" and are distinct from any valid value.
/// When external ids are not requested, `id` stays `None` even for
/// successful resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub name: Option<String>,
    pub number: Option<u64>,
    pub id: Option<String>,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.name.is_some() || self.number.is_some()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.number, &self.name) {
            (Some(number), Some(name)) => write!(f, "({}) {}", number, name),
            (None, Some(name)) => write!(f, "{}", name),
            (Some(number), None) => write!(f, "({})", number),
            (None, None) => write!(f, "not found"),
        }
    }
}

/// Per-call resolution settings, constructed once per batch.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Include the external catalogue id in the results.
    pub return_id: bool,
    /// Consult the local index before querying the remote service.
    pub try_local_first: bool,
    /// Emit progress lines; never alters results.
    pub show_progress: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            return_id: false,
            try_local_first: true,
            show_progress: false,
        }
    }
}
