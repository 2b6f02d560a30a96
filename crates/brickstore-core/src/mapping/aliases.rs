//! Column alias tables
//!
//! Three lookup tables consulted by [`super::AliasNamingStrategy`]. They are
//! built once at startup (from code or from the `[naming]` config section)
//! and only read afterwards.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{BrickstoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnAliases {
    /// `"<table>.<default column>"` → physical column
    pub column_aliases: BTreeMap<String, String>,
    /// property name → back-reference column in the child table
    pub reverse_column_aliases: BTreeMap<String, String>,
    /// property name → map-key column in the child table
    pub key_column_aliases: BTreeMap<String, String>,
}

impl ColumnAliases {
    /// No overrides; every name falls back to the convention
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aliases matching the shipped `lego_set` / `handbuch` / `model` schema
    pub fn standard() -> Self {
        Self::empty()
            .with_column_alias("lego_set.int_maximum_age", "max_age")
            .with_column_alias("lego_set.int_minimum_age", "min_age")
            .with_reverse_column_alias("manual", "handbuch_id")
            .with_key_column_alias("models", "name")
    }

    pub fn with_column_alias(mut self, qualified: impl Into<String>, alias: impl Into<String>) -> Self {
        self.column_aliases.insert(qualified.into(), alias.into());
        self
    }

    pub fn with_reverse_column_alias(
        mut self,
        property: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.reverse_column_aliases
            .insert(property.into(), alias.into());
        self
    }

    pub fn with_key_column_alias(mut self, property: impl Into<String>, alias: impl Into<String>) -> Self {
        self.key_column_aliases.insert(property.into(), alias.into());
        self
    }

    pub fn column_alias(&self, table: &str, default_column: &str) -> Option<&str> {
        self.column_aliases
            .get(&format!("{}.{}", table, default_column))
            .map(String::as_str)
    }

    pub fn reverse_column_alias(&self, property: &str) -> Option<&str> {
        self.reverse_column_aliases
            .get(property)
            .map(String::as_str)
    }

    pub fn key_column_alias(&self, property: &str) -> Option<&str> {
        self.key_column_aliases.get(property).map(String::as_str)
    }

    /// Reject entries that could never produce a usable identifier
    ///
    /// Column alias keys must be table-qualified (`table.column`); no key
    /// or value may be blank.
    pub fn validate(&self) -> Result<()> {
        let all = self
            .column_aliases
            .iter()
            .chain(self.reverse_column_aliases.iter())
            .chain(self.key_column_aliases.iter());

        for (key, value) in all {
            if key.trim().is_empty() {
                return Err(BrickstoreError::InvalidAlias {
                    key: key.clone(),
                    reason: "key is blank".to_string(),
                }
                .into());
            }
            if value.trim().is_empty() {
                return Err(BrickstoreError::InvalidAlias {
                    key: key.clone(),
                    reason: "alias is blank".to_string(),
                }
                .into());
            }
        }

        for key in self.column_aliases.keys() {
            let qualified = key
                .split_once('.')
                .is_some_and(|(table, column)| !table.is_empty() && !column.is_empty());
            if !qualified {
                return Err(BrickstoreError::InvalidAlias {
                    key: key.clone(),
                    reason: "expected <table>.<column>".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_standard_aliases() {
        let aliases = ColumnAliases::standard();
        assert_eq!(aliases.column_alias("lego_set", "int_maximum_age"), Some("max_age"));
        assert_eq!(aliases.column_alias("lego_set", "int_minimum_age"), Some("min_age"));
        assert_eq!(aliases.column_alias("lego_set", "name"), None);
        assert_eq!(aliases.reverse_column_alias("manual"), Some("handbuch_id"));
        assert_eq!(aliases.key_column_alias("models"), Some("name"));
        assert!(aliases.validate().is_ok());
    }

    #[test]
    fn test_unqualified_column_alias_rejected() {
        let aliases = ColumnAliases::empty().with_column_alias("int_maximum_age", "max_age");
        let err = aliases.validate().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("<table>.<column>"));
    }

    #[test]
    fn test_blank_alias_rejected() {
        let aliases = ColumnAliases::empty().with_key_column_alias("models", "  ");
        assert!(aliases.validate().is_err());
    }
}
