//! Data model types for the usage-example catalog.
//!
//! An [`ExampleEntry`] documents one SDK operation, keyed by its
//! [`EntryKey`] (`service`, `method`).

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Key ─────────────────────────────────────────────────────────────────────

/// Primary key of a catalog entry: the `(service, method)` pair.
///
/// Both halves are trimmed and lowercased on construction, so lookups with
/// `"Lambda "` and `"lambda"` resolve to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub service: String,
    pub method: String,
}

impl EntryKey {
    pub fn new(service: &str, method: &str) -> Self {
        Self {
            service: normalize_identifier(service),
            method: normalize_identifier(method),
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.method)
    }
}

/// Trim and lowercase a `service` or `method` identifier.
pub fn normalize_identifier(s: &str) -> String {
    s.trim().to_lowercase()
}

// ── Entry ───────────────────────────────────────────────────────────────────

/// One documented SDK operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleEntry {
    pub service: String,
    pub method: String,
    pub description: String,
    /// Source text demonstrating the call. Stored verbatim.
    pub code: String,
    /// Parameter explanations in declaration order.
    #[serde(default, with = "parameter_map")]
    pub parameters: Vec<Parameter>,
    /// Dependency the code sample imports (e.g., "@aws-sdk/client-s3").
    pub package: String,
}

/// A named parameter and its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl ExampleEntry {
    /// Start an entry for `(service, method)` with every other field empty.
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            description: String::new(),
            code: String::new(),
            parameters: Vec::new(),
            package: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.push(Parameter::new(name, description));
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// The normalized key of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.service, &self.method)
    }

    /// Look up a parameter explanation by exact name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.description.as_str())
    }
}

/// Borrowed view that serializes parameters as an ordered mapping.
pub(crate) struct ParameterMap<'a>(pub &'a [Parameter]);

impl Serialize for ParameterMap<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        parameter_map::serialize(self.0, serializer)
    }
}

/// Serializes `Vec<Parameter>` as a YAML/JSON mapping, keeping declaration
/// order. Deserialization keeps every pair it is handed, so duplicate names
/// reach the validator instead of being collapsed.
mod parameter_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::Parameter;

    pub fn serialize<S: Serializer>(
        params: &[Parameter],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(params.len()))?;
        for p in params {
            map.serialize_entry(&p.name, &p.description)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Parameter>, D::Error> {
        struct ParamVisitor;

        impl<'de> Visitor<'de> for ParamVisitor {
            type Value = Vec<Parameter>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of parameter names to explanations")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut params = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, description)) = access.next_entry::<String, String>()? {
                    params.push(Parameter { name, description });
                }
                Ok(params)
            }
        }

        deserializer.deserialize_any(ParamVisitor)
    }
}
