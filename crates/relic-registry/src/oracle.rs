//! Classifier-based compatibility oracle.
//!
//! A project counts as current-runtime compatible when its trove
//! classifiers declare Python 3 support (`Programming Language :: Python :: 3`,
//! `... :: 3.x`, or `... :: 3 :: Only`). The answer comes from the metadata
//! document the classifier already fetched, so the oracle never issues a
//! request of its own. Without a document it reports "not compatible".

use std::convert::Infallible;

use relic_core::{CompatibilityOracle, RegistryMetadata};

const PYTHON_CLASSIFIER: &str = "Programming Language :: Python :: ";

/// Oracle answering from `PyPI` trove classifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TroveOracle;

impl CompatibilityOracle for TroveOracle {
    type Error = Infallible;

    fn supports_current_runtime(
        &self,
        _name: &str,
        metadata: Option<&RegistryMetadata>,
    ) -> Result<bool, Self::Error> {
        Ok(metadata.is_some_and(|meta| declares_current_runtime(meta.classifiers())))
    }
}

/// Whether any classifier declares Python 3 support.
#[must_use]
pub fn declares_current_runtime(classifiers: &[String]) -> bool {
    classifiers.iter().any(|classifier| {
        classifier
            .strip_prefix(PYTHON_CLASSIFIER)
            .is_some_and(|version| {
                version == "3" || version.starts_with("3.") || version.starts_with("3 ::")
            })
    })
}
