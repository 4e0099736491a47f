use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attributes::AttributeStore;
use crate::error::VersionError;
use crate::makefile::variable_value;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d+)*([-+~][0-9A-Za-z.+~-]+)?$").expect("version pattern is valid")
});

/// Which rendering of a variable's value an attribute publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionForm {
    /// The value exactly as written, e.g. `4.15.2`
    Full,
    /// First two dot-separated components, e.g. `4.15`
    Minor,
}

impl VersionForm {
    pub fn render<'a>(&self, full: &'a str) -> &'a str {
        match self {
            VersionForm::Full => full,
            VersionForm::Minor => short_version(full),
        }
    }
}

/// One documentation attribute and where its value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Attribute name as referenced from the docs, e.g. `ocp-ver`
    pub name: String,
    /// Makefile variable holding the version, e.g. `OPENSHIFT_VERSION`
    pub variable: String,
    #[serde(default = "default_form")]
    pub form: VersionForm,
    /// Label used in the build report (defaults to the attribute name)
    #[serde(default)]
    pub label: Option<String>,
}

fn default_form() -> VersionForm {
    VersionForm::Full
}

impl AttributeSpec {
    pub fn new(name: &str, variable: &str, form: VersionForm, label: &str) -> Self {
        Self {
            name: name.to_string(),
            variable: variable.to_string(),
            form,
            label: Some(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// The attributes published for the product docs, in report order.
pub fn default_attributes() -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::new(
            "ocp-ver-full",
            "OPENSHIFT_VERSION",
            VersionForm::Full,
            "OpenShift patch version",
        ),
        AttributeSpec::new(
            "ocp-ver",
            "OPENSHIFT_VERSION",
            VersionForm::Minor,
            "OpenShift minor version",
        ),
        AttributeSpec::new(
            "prod-ver-full",
            "CRC_VERSION",
            VersionForm::Full,
            "CRC patch version",
        ),
        AttributeSpec::new("prod-ver", "CRC_VERSION", VersionForm::Minor, "CRC minor version"),
        AttributeSpec::new(
            "ushift-ver",
            "MICROSHIFT_VERSION",
            VersionForm::Full,
            "MicroShift version",
        ),
    ]
}

/// Keep the first two dot-separated components ("4.15.2" -> "4.15").
/// Strings with fewer than two dots are returned as-is.
pub fn short_version(full: &str) -> &str {
    match full.match_indices('.').nth(1) {
        Some((idx, _)) => &full[..idx],
        None => full,
    }
}

pub fn looks_like_version(value: &str) -> bool {
    VERSION_PATTERN.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub name: String,
    pub label: String,
    pub value: String,
}

/// Attribute name -> version string, built fresh for every build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    entries: Vec<VersionEntry>,
}

/// Extract the default attribute set from Makefile text.
pub fn extract_versions(text: &str) -> Result<VersionSet, VersionError> {
    extract_versions_with(text, &default_attributes())
}

/// Extract an explicit attribute list. Fails on the first missing variable
/// so callers never see a partial set.
pub fn extract_versions_with(
    text: &str,
    specs: &[AttributeSpec],
) -> Result<VersionSet, VersionError> {
    let mut set = VersionSet::default();

    for spec in specs {
        let full = variable_value(text, &spec.variable)
            .ok_or_else(|| VersionError::key_not_found(&spec.variable))?;

        if !looks_like_version(full) {
            warn!(
                "{} = {:?} does not look like a version, publishing it anyway",
                spec.variable, full
            );
        }

        let value = spec.form.render(full);
        debug!("{} -> {} = {}", spec.variable, spec.name, value);
        set.insert(&spec.name, spec.label(), value);
    }

    Ok(set)
}

impl VersionSet {
    /// Read `path` and extract `specs` from it.
    pub fn read(path: &Path, specs: &[AttributeSpec]) -> Result<Self, VersionError> {
        debug!("Reading versions from {}", path.display());
        let bytes = fs::read(path).map_err(|source| VersionError::ConfigurationMissing {
            path: path.to_path_buf(),
            source,
        })?;
        // Non-UTF-8 bytes (e.g. Latin-1 comments) must not hide the variables
        let text = String::from_utf8_lossy(&bytes);
        extract_versions_with(&text, specs)
    }

    /// Insert or replace an entry; replacement keeps the original position.
    pub fn insert(&mut self, name: &str, label: &str, value: &str) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.label = label.to_string();
                entry.value = value.to_string();
            }
            None => self.entries.push(VersionEntry {
                name: name.to_string(),
                label: label.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.value.clone()))
            .collect()
    }

    /// Merge every entry into `store`, overwriting existing names.
    pub fn merge_into<S: AttributeStore + ?Sized>(&self, store: &mut S) {
        for entry in &self.entries {
            store.set_attribute(&entry.name, &entry.value);
        }
    }

    /// Human-readable `label: value` lines for the build log.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}: {}", entry.label, entry.value)?;
        }
        Ok(())
    }
}
