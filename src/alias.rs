//! Command aliases
//!
//! Short tokens substituted with a full command before dispatch. Keys and
//! targets are stored lowercase and lookups are lowercased too; resolution is
//! a single lookup, never chained.

use std::collections::HashMap;

use tracing::debug;

/// Aliases present in every table
const BUILTIN_ALIASES: [(&str, &str); 3] = [("ls", "help"), ("h", "help"), ("q", "quit")];

/// Alias to target command mapping
#[derive(Clone, Debug)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasTable {
    /// Create a table seeded with the built-in aliases
    pub fn new() -> Self {
        let entries = BUILTIN_ALIASES
            .iter()
            .map(|(alias, target)| (alias.to_string(), target.to_string()))
            .collect();
        Self { entries }
    }

    /// Map `alias` to `target`, replacing any previous mapping
    pub fn register(&mut self, alias: &str, target: &str) {
        let alias = alias.to_lowercase();
        let target = target.to_lowercase();
        debug!("alias '{}' => '{}'", alias, target);
        self.entries.insert(alias, target);
    }

    /// Map `alias` to `target` unless `alias` is already mapped
    pub fn register_default(&mut self, alias: &str, target: &str) {
        if !self.entries.contains_key(&alias.to_lowercase()) {
            self.register(alias, target);
        }
    }

    /// Target for `cmd`, or `cmd` itself when it is not an alias
    pub fn resolve<'a>(&'a self, cmd: &'a str) -> &'a str {
        self.entries
            .get(&cmd.to_lowercase())
            .map(String::as_str)
            .unwrap_or(cmd)
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
    fn test_builtin_aliases() {
        let table = AliasTable::new();
        assert_eq!(table.resolve("ls"), "help");
        assert_eq!(table.resolve("h"), "help");
        assert_eq!(table.resolve("q"), "quit");
        assert_eq!(table.resolve("get foo"), "get foo");
    }

    #[test]
    fn test_register_lowercases_both_sides() {
        let mut table = AliasTable::new();
        table.register("Sws", "Set Workspace");
        assert_eq!(table.resolve("sws"), "set workspace");
        assert_eq!(table.resolve("SWS"), "set workspace");
        // Unknown commands keep their case
        assert_eq!(table.resolve("Get Foo"), "Get Foo");
    }

    #[test]
    fn test_register_overwrites_builtin() {
        let mut table = AliasTable::new();
        table.register("q", "query all");
        assert_eq!(table.resolve("q"), "query all");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_register_default_keeps_existing() {
        let mut table = AliasTable::new();
        table.register("sws", "set workspace mine");
        table.register_default("SWS", "set workspace settings");
        table.register_default("pws", "print workspace settings");
        table.register_default("q", "query");

        assert_eq!(table.resolve("sws"), "set workspace mine");
        assert_eq!(table.resolve("pws"), "print workspace settings");
        assert_eq!(table.resolve("q"), "quit");
    }

    #[test]
    fn test_resolution_is_single_hop() {
        let mut table = AliasTable::new();
        table.register("x", "q");
        assert_eq!(table.resolve("x"), "q");
    }
}
