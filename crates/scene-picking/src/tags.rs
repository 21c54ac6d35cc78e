//! Semantic tags: which node names mean "open a panel"

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Key into the static panel content table
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keys shipped with the portfolio scene
pub const DEFAULT_KEYS: [&str; 8] = [
    "monitor", "mataua", "ieee", "lago", "lienzo", "pastel", "cv", "libro",
];

/// Recognized tag prefix plus the content keys it may be followed by
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagRegistry {
    pub prefix: String,
    pub keys: BTreeSet<String>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self {
            prefix: "info_".to_owned(),
            keys: DEFAULT_KEYS.iter().map(|k| (*k).to_owned()).collect(),
        }
    }
}

impl TagRegistry {
    /// `info_cv` -> `cv`, if `cv` is registered
    pub fn resolve(&self, name: &str) -> Option<ContentKey> {
        let suffix = name.strip_prefix(self.prefix.as_str())?;
        self.keys
            .contains(suffix)
            .then(|| ContentKey(suffix.to_owned()))
    }

    /// Node name a loader should give the meshes of `key`
    pub fn tag_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_keys() {
        let tags = TagRegistry::default();
        assert_eq!(tags.resolve("info_cv").map(|k| k.to_string()), Some("cv".to_owned()));
        assert_eq!(
            tags.resolve("info_libro").as_ref().map(ContentKey::as_str),
            Some("libro")
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_names() {
        let tags = TagRegistry::default();
        assert_eq!(tags.resolve("info_unknown"), None);
        assert_eq!(tags.resolve("monitor"), None);
        assert_eq!(tags.resolve("Cube.001"), None);
        assert_eq!(tags.resolve("info_"), None);
    }

    #[test]
    fn test_tag_name_round_trips() {
        let tags = TagRegistry::default();
        for key in DEFAULT_KEYS {
            let name = tags.tag_name(key);
            assert_eq!(tags.resolve(&name).map(|k| k.to_string()), Some(key.to_owned()));
        }
    }
}
