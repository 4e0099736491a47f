//! docver - publish Makefile version numbers as documentation attributes
//!
//! Reads `OPENSHIFT_VERSION`, `CRC_VERSION` and `MICROSHIFT_VERSION` from a
//! Makefile and merges them into a site playbook's `asciidoc.attributes`
//! when the generator fires its playbook-built event.

pub mod attributes;
pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod lifecycle;
pub mod makefile;
pub mod playbook;
pub mod version;

pub use error::VersionError;
pub use version::{extract_versions, VersionSet};
