//! Command and verb types.
//!
//! A command is the ordered list of path segments used as the routing key,
//! the verb is the request method that selects the routing sub-table.

use serde::{Deserialize, Serialize};

/// Request verb used to pick a routing sub-table.
///
/// Anything other than GET, POST or PUT is carried as [`Verb::Other`] and
/// only ever reaches the verb-independent job routes. A hand-built
/// `Other("get")` still routes as GET.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Verb {
    Get,
    Post,
    Put,
    Other(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Other(method) => method,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Verb {
    fn from(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Verb::Get,
            "POST" => Verb::Post,
            "PUT" => Verb::Put,
            other => Verb::Other(other.to_string()),
        }
    }
}

impl From<String> for Verb {
    fn from(method: String) -> Self {
        Verb::from(method.as_str())
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        verb.as_str().to_string()
    }
}

/// Ordered, non-empty list of command segments.
///
/// Index 0 is the resource group; the following segments select the
/// operation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Command(Vec<String>);

impl Command {
    /// Build a command from segments, dropping empty ones.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Err("command must contain at least one segment".to_string());
        }

        Ok(Self(segments))
    }

    /// Split an already-decoded path on `/`.
    #[cfg(test)]
    pub fn from_path(path: &str) -> Result<Self, String> {
        Self::from_segments(path.split('/'))
    }

    /// Split a raw, percent-encoded URL path on `/`, then decode each segment.
    ///
    /// An encoded slash (`%2F`) stays inside its segment.
    pub fn from_encoded_path(path: &str) -> Result<Self, String> {
        let segments = path
            .split('/')
            .map(|raw| {
                urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .map_err(|e| format!("segment '{}' is not valid UTF-8: {}", raw, e))
            })
            .collect::<Result<Vec<String>, String>>()?;

        Self::from_segments(segments)
    }

    /// The resource group (first segment).
    pub fn resource(&self) -> &str {
        &self.0[0]
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
