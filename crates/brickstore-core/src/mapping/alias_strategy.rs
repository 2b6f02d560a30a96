//! Naming strategy backed by the column alias tables

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::aliases::ColumnAliases;
use super::naming::{to_snake_case, NamingStrategy};
use super::property::PersistentProperty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NameKind {
    Column,
    ReverseColumn,
    KeyColumn,
}

type MemoKey = (NameKind, String, &'static str);

/// [`NamingStrategy`] that consults [`ColumnAliases`] before the convention
///
/// - `column_name`: alias for `"<owner table>.<default column>"`, else the
///   default column
/// - `reverse_column_name`: alias for the property name, else the owner's
///   table name
/// - `key_column`: alias for the property name, else `reverse_column_name`
///   plus `_key`
///
/// Resolved names are memoized per owner and property. The alias tables are
/// immutable, so the memo never changes an answer.
#[derive(Debug)]
pub struct AliasNamingStrategy {
    aliases: Arc<ColumnAliases>,
    memo: RwLock<HashMap<MemoKey, String>>,
}

impl AliasNamingStrategy {
    pub fn new(aliases: ColumnAliases) -> Self {
        Self::shared(Arc::new(aliases))
    }

    pub fn shared(aliases: Arc<ColumnAliases>) -> Self {
        Self {
            aliases,
            memo: RwLock::new(HashMap::new()),
        }
    }

    pub fn aliases(&self) -> &ColumnAliases {
        &self.aliases
    }

    fn memoized(
        &self,
        kind: NameKind,
        property: &PersistentProperty,
        resolve: impl FnOnce() -> String,
    ) -> String {
        let key = (
            kind,
            self.table_name(property.owner()),
            property.name(),
        );

        if let Ok(memo) = self.memo.read() {
            if let Some(name) = memo.get(&key) {
                return name.clone();
            }
        }

        let name = resolve();
        if let Ok(mut memo) = self.memo.write() {
            memo.entry(key).or_insert_with(|| name.clone());
        }
        name
    }
}

impl NamingStrategy for AliasNamingStrategy {
    fn column_name(&self, property: &PersistentProperty) -> String {
        self.memoized(NameKind::Column, property, || {
            let default_name = to_snake_case(property.name());
            let table = self.table_name(property.owner());
            match self.aliases.column_alias(&table, &default_name) {
                Some(alias) => alias.to_string(),
                None => default_name,
            }
        })
    }

    fn reverse_column_name(&self, property: &PersistentProperty) -> String {
        self.memoized(NameKind::ReverseColumn, property, || {
            match self.aliases.reverse_column_alias(property.name()) {
                Some(alias) => alias.to_string(),
                None => self.table_name(property.owner()),
            }
        })
    }

    fn key_column(&self, property: &PersistentProperty) -> String {
        self.memoized(NameKind::KeyColumn, property, || {
            match self.aliases.key_column_alias(property.name()) {
                Some(alias) => alias.to_string(),
                None => format!("{}_key", self.reverse_column_name(property)),
            }
        })
    }
}
