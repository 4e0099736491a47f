//! Antora-style playbook: the build configuration the site generator hands to
//! its extensions. Only `asciidoc.attributes` is modeled; everything else is
//! carried through untouched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::fs;
use std::path::Path;

use crate::attributes::AttributeStore;

/// Keys survive a round-trip but not their order: `asciidoc` is always
/// written first, followed by the remaining top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    #[serde(default)]
    pub asciidoc: AsciiDocConfig,

    #[serde(flatten)]
    pub other: Mapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsciiDocConfig {
    #[serde(default)]
    pub attributes: Mapping,

    #[serde(flatten)]
    pub other: Mapping,
}

impl Playbook {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read playbook {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse playbook {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document is a valid, empty playbook
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_yaml()?)
            .with_context(|| format!("Failed to write playbook {}", path.display()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.asciidoc.attributes.get(name).and_then(|v| v.as_str())
    }
}

impl AttributeStore for Playbook {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.asciidoc.attributes.set_attribute(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYBOOK: &str = r#"
site:
  title: CRC Documentation
  start_page: crc::index.adoc
content:
  sources:
    - url: .
      start_path: docs
asciidoc:
  attributes:
    ocp-ver: '4.14'
    page-pagination: ''
  extensions:
    - ./docs/extensions/get-versions.js
"#;

    #[test]
    fn test_parse_attributes() {
        let playbook = Playbook::from_yaml(PLAYBOOK).unwrap();
        assert_eq!(playbook.attribute("ocp-ver"), Some("4.14"));
        assert!(playbook.other.contains_key("site"));
        assert!(playbook.asciidoc.other.contains_key("extensions"));
    }

    #[test]
    fn test_round_trip_preserves_other_keys() {
        let mut playbook = Playbook::from_yaml(PLAYBOOK).unwrap();
        playbook.set_attribute("ocp-ver", "4.15");

        let yaml = playbook.to_yaml().unwrap();
        let reparsed = Playbook::from_yaml(&yaml).unwrap();

        assert_eq!(reparsed.attribute("ocp-ver"), Some("4.15"));
        assert_eq!(reparsed.attribute("page-pagination"), Some(""));
        assert_eq!(reparsed.other, playbook.other);
        assert_eq!(reparsed.asciidoc.other, playbook.asciidoc.other);
    }

    #[test]
    fn test_asciidoc_written_first() {
        let playbook = Playbook::from_yaml(PLAYBOOK).unwrap();
        let yaml = playbook.to_yaml().unwrap();
        assert!(yaml.starts_with("asciidoc:"));
        assert!(yaml.contains("\nsite:"));
    }

    #[test]
    fn test_missing_asciidoc_section() {
        let mut playbook = Playbook::from_yaml("site:\n  title: Docs\n").unwrap();
        assert!(playbook.asciidoc.attributes.is_empty());
        playbook.set_attribute("prod-ver", "2.35");
        assert_eq!(playbook.attribute("prod-ver"), Some("2.35"));
    }

    #[test]
    fn test_empty_document() {
        let playbook = Playbook::from_yaml("  \n").unwrap();
        assert_eq!(playbook, Playbook::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Playbook::load(Path::new("/nonexistent/antora-playbook.yml"));
        assert!(result.unwrap_err().to_string().contains("Failed to read playbook"));
    }
}
