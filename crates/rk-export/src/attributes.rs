//! Attribute sets built per emitted element

/// Ordered attribute name/value pairs of one XML element
///
/// A set is built fresh for every element and consumed when the element is
/// created; nothing carries over from one object to the next. Optional
/// values that are `None` are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value of the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    /// Set an attribute only when a value is present
    pub fn set_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    fn insert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_omitted() {
        let attrs = AttributeSet::new()
            .set("name", "box1")
            .set_opt("pos", None::<String>)
            .set_opt("size", Some("2 1 1"));

        assert_eq!(attrs.len(), 2);
        assert!(!attrs.contains("pos"));
        assert_eq!(attrs.get("size"), Some("2 1 1"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let attrs = AttributeSet::new()
            .set("type", "box")
            .set("pos", "1 0 0")
            .set("type", "mesh");

        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "pos"]);
        assert_eq!(attrs.get("type"), Some("mesh"));
    }
}
