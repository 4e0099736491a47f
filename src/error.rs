use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while pulling versions out of the build file.
/// Both abort the documentation build.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("cannot read version file {}: {source}", .path.display())]
    ConfigurationMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Also covers a matching line with fewer than three fields.
    #[error("no usable `{key}` assignment found (expected `{key} = <version>`)")]
    KeyNotFound { key: String },
}

impl VersionError {
    pub fn key_not_found(key: &str) -> Self {
        VersionError::KeyNotFound {
            key: key.to_string(),
        }
    }
}
