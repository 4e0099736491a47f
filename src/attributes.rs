//! Targets a [`VersionSet`](crate::version::VersionSet) can be merged into.

use std::collections::{BTreeMap, HashMap};

use serde_yaml::{Mapping, Value};

/// A key-value attribute store owned by the documentation tool.
pub trait AttributeStore {
    /// Set `name` to `value`, replacing any existing value.
    fn set_attribute(&mut self, name: &str, value: &str);
}

impl AttributeStore for BTreeMap<String, String> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

impl AttributeStore for HashMap<String, String> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// Playbook attribute blocks; an overwritten key keeps its position.
impl AttributeStore for Mapping {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.insert(
            Value::String(name.to_string()),
            Value::String(value.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::extract_versions;

    const SAMPLE: &str = "OPENSHIFT_VERSION = 4.15.2\nCRC_VERSION = 2.35.0\nMICROSHIFT_VERSION = 4.15.2\n";

    #[test]
    fn test_merge_into_btreemap_overwrites() {
        let mut store = BTreeMap::new();
        store.insert("ocp-ver".to_string(), "4.14".to_string());
        store.insert("page-title".to_string(), "CRC".to_string());

        extract_versions(SAMPLE).unwrap().merge_into(&mut store);

        assert_eq!(store["ocp-ver"], "4.15");
        assert_eq!(store["page-title"], "CRC");
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_merge_into_mapping_keeps_order() {
        let mut store: Mapping = serde_yaml::from_str("ocp-ver: '4.14'\nexperimental: true\n").unwrap();

        extract_versions(SAMPLE).unwrap().merge_into(&mut store);

        let keys: Vec<_> = store.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys[0], "ocp-ver");
        assert_eq!(keys[1], "experimental");
        assert_eq!(store.get("ocp-ver").and_then(Value::as_str), Some("4.15"));
        assert_eq!(store.get("experimental"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_merge_into_hashmap() {
        let mut store = HashMap::new();
        extract_versions(SAMPLE).unwrap().merge_into(&mut store);
        assert_eq!(store.get("ushift-ver").map(String::as_str), Some("4.15.2"));
    }
}
