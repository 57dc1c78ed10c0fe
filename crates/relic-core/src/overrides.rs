//! Manually curated override entries.
//!
//! On disk an entry is a JSON array: `[]` marks a package as known
//! compatible with the current runtime, `[owner, name, url]` marks it as
//! legacy-only with its repository already resolved.

use serde::{Deserialize, Serialize};

use crate::{CoreError, RepoIdentity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum OverrideEntry {
    /// Known compatible; excluded from the ranking.
    Compatible,
    /// Known legacy-only with a resolved repository.
    Legacy { repo: RepoIdentity, url: String },
}

impl TryFrom<Vec<String>> for OverrideEntry {
    type Error = CoreError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        match <[String; 3]>::try_from(value) {
            Ok([owner, name, url]) => Ok(Self::Legacy {
                repo: RepoIdentity { owner, name },
                url,
            }),
            Err(value) if value.is_empty() => Ok(Self::Compatible),
            Err(value) => Err(CoreError::InvalidOverride { len: value.len() }),
        }
    }
}

impl From<OverrideEntry> for Vec<String> {
    fn from(entry: OverrideEntry) -> Self {
        match entry {
            OverrideEntry::Compatible => Vec::new(),
            OverrideEntry::Legacy { repo, url } => vec![repo.owner, repo.name, url],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_shapes() {
        let table: BTreeMap<String, OverrideEntry> = serde_json::from_str(
            r#"{"six": [], "legacy": ["acme", "legacy-py", "https://github.com/acme/legacy-py"]}"#,
        )
        .unwrap();

        assert_eq!(table["six"], OverrideEntry::Compatible);
        assert_eq!(
            table["legacy"],
            OverrideEntry::Legacy {
                repo: RepoIdentity::new("acme", "legacy-py"),
                url: "https://github.com/acme/legacy-py".to_string(),
            }
        );
    }

    #[test]
    fn rejects_other_arity() {
        let err = serde_json::from_str::<OverrideEntry>(r#"["acme", "foo"]"#).unwrap_err();
        assert!(err.to_string().contains("expected 0 or 3 elements, got 2"));
    }

    #[test]
    fn serializes_back_to_arrays() {
        let entry = OverrideEntry::Legacy {
            repo: RepoIdentity::new("a", "b"),
            url: "u".to_string(),
        };
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"["a","b","u"]"#);
        assert_eq!(
            serde_json::to_string(&OverrideEntry::Compatible).unwrap(),
            "[]"
        );
    }
}
