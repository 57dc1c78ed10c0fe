//! Classification tuning: runtime tag vocabulary and oracle toggle.

use relic_core::RuntimeTags;
use serde::{Deserialize, Serialize};

fn default_wildcard_tags() -> Vec<String> {
    RuntimeTags::default().wildcard
}

fn default_current_prefixes() -> Vec<String> {
    RuntimeTags::default().current_prefixes
}

fn default_skip_prefixes() -> Vec<String> {
    vec!["XStatic".to_string()]
}

const fn default_use_oracle() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifyConfig {
    /// Release tags meaning "built for both runtimes".
    #[serde(default = "default_wildcard_tags")]
    pub wildcard_tags: Vec<String>,

    /// Release tag prefixes meaning "built for the current runtime".
    #[serde(default = "default_current_prefixes")]
    pub current_prefixes: Vec<String>,

    /// Package name prefixes excluded without any lookup (static-file bundles).
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,

    /// Consult the classifier-based compatibility oracle before scanning releases.
    #[serde(default = "default_use_oracle")]
    pub use_oracle: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            wildcard_tags: default_wildcard_tags(),
            current_prefixes: default_current_prefixes(),
            skip_prefixes: default_skip_prefixes(),
            use_oracle: default_use_oracle(),
        }
    }
}

impl ClassifyConfig {
    #[must_use]
    pub fn runtime_tags(&self) -> RuntimeTags {
        RuntimeTags {
            wildcard: self.wildcard_tags.clone(),
            current_prefixes: self.current_prefixes.clone(),
        }
    }
}
