//! Naming strategy trait and the default convention

use super::property::{EntityType, PersistentProperty};

/// Policy translating logical model names into physical schema names
///
/// The provided methods implement the default convention:
///
/// - table: explicit table name, else snake case of the type name
/// - column: snake case of the property name
/// - reverse column (back-reference from a child table): owner's table name
/// - key column (map key in a child table): reverse column + `_key`
pub trait NamingStrategy: Send + Sync {
    fn table_name(&self, entity: &EntityType) -> String {
        match entity.table() {
            Some(table) => table.to_string(),
            None => to_snake_case(entity.type_name()),
        }
    }

    fn column_name(&self, property: &PersistentProperty) -> String {
        to_snake_case(property.name())
    }

    fn reverse_column_name(&self, property: &PersistentProperty) -> String {
        self.table_name(property.owner())
    }

    fn key_column(&self, property: &PersistentProperty) -> String {
        format!("{}_key", self.reverse_column_name(property))
    }
}

/// The convention with no overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamingStrategy;

impl NamingStrategy for DefaultNamingStrategy {}

/// Lower snake case of a camel or Pascal case identifier
///
/// An underscore goes before an uppercase letter that follows a lowercase
/// letter or digit, and before the last capital of an acronym that starts a
/// new word (`URLValue` becomes `url_value`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
