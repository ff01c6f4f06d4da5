pub mod application;
pub mod job;
pub mod profile;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque backend identifier. The API hands out both integer and string ids
/// depending on the resource, so both shapes are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IntOrString {
            Int(i64),
            String(String),
        }

        match IntOrString::deserialize(deserializer)? {
            IntOrString::Int(i) => Ok(ResourceId(i.to_string())),
            IntOrString::String(s) => Ok(ResourceId(s)),
        }
    }
}

/// Deserialize a `null`-able string field into a plain `String`.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_accepts_numbers_and_strings() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"[42, "a1b2"]"#).unwrap();
        assert_eq!(ids, vec![ResourceId::from(42), ResourceId::from("a1b2")]);
        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), r#""42""#);
    }
}
