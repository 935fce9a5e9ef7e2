use indexmap::IndexMap;

/// Insertion-ordered map from alias to a handle into a parser-owned store.
///
/// Several aliases may point at the same handle (`"verbose v"`). The map only
/// holds `Copy` handles, never the options or parsers themselves.
#[derive(Debug, Clone)]
pub struct AliasMap<H> {
    entries: IndexMap<String, H>,
}

impl<H> Default for AliasMap<H> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<H: Copy> AliasMap<H> {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` for `handle`. A later registration of the same key wins.
    pub fn add(&mut self, key: &str, handle: H) {
        if self.entries.insert(key.to_string(), handle).is_some() {
            tracing::warn!(alias = key, "alias registered twice; the later registration wins");
        }
    }

    /// Split `keys` on ASCII spaces and register each piece for `handle`.
    pub fn add_split(&mut self, keys: &str, handle: H) {
        for key in keys.split(' ').filter(|k| !k.is_empty()) {
            self.add(key, handle);
        }
    }

    /// The handle registered for `key`.
    pub fn get(&self, key: &str) -> Option<H> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of aliases, not of distinct handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aliases and their handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, H)> + '_ {
        self.entries.iter().map(|(k, h)| (k.as_str(), *h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keys_share_one_handle() {
        let mut map = AliasMap::new();
        map.add_split("bool b", 0usize);
        map.add_split("  string   s ", 1usize);

        assert_eq!(map.get("bool"), Some(0));
        assert_eq!(map.get("b"), Some(0));
        assert_eq!(map.get("s"), Some(1));
        assert!(map.contains("string"));
        assert!(!map.contains(""));
        assert_eq!(map.get("missing"), None);

        let order: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["bool", "b", "string", "s"]);
    }

    #[test]
    fn duplicate_alias_keeps_position_and_takes_new_handle() {
        let mut map = AliasMap::new();
        map.add("x", 0usize);
        map.add("y", 1usize);
        map.add("x", 2usize);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x"), Some(2));
        assert_eq!(map.iter().next(), Some(("x", 2)));
    }
}
