//! SQL for the LegoSet aggregate, generated from a naming strategy
//!
//! Statements are rendered once per repository. Every identifier comes from
//! the [`NamingStrategy`] and is quoted, so aliases from configuration never
//! reach SQL unescaped.

use brickstore_core::mapping::NamingStrategy;
use brickstore_core::{LegoSet, Manual, Model};

/// Double-quote an SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Value bound to one column of a `model` row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValue {
    /// Back-reference to the owning set
    SetId,
    /// Map key under which the model is stored in the set
    Key,
    Name,
    Description,
}

/// Physical names resolved for the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateNames {
    pub set_table: String,
    pub set_id: String,
    pub set_name: String,
    pub set_min_age: String,
    pub set_max_age: String,
    pub manual_table: String,
    pub manual_set_ref: String,
    pub manual_author: String,
    pub manual_text: String,
    pub model_table: String,
    pub model_set_ref: String,
    pub model_key: String,
    pub model_name: String,
    pub model_description: String,
}

impl AggregateNames {
    pub fn resolve(naming: &dyn NamingStrategy) -> Self {
        Self {
            set_table: naming.table_name(&LegoSet::ENTITY),
            set_id: naming.column_name(&LegoSet::ID),
            set_name: naming.column_name(&LegoSet::NAME),
            set_min_age: naming.column_name(&LegoSet::MINIMUM_AGE),
            set_max_age: naming.column_name(&LegoSet::MAXIMUM_AGE),
            manual_table: naming.table_name(&Manual::ENTITY),
            manual_set_ref: naming.reverse_column_name(&LegoSet::MANUAL),
            manual_author: naming.column_name(&Manual::AUTHOR),
            manual_text: naming.column_name(&Manual::TEXT),
            model_table: naming.table_name(&Model::ENTITY),
            model_set_ref: naming.reverse_column_name(&LegoSet::MODELS),
            model_key: naming.key_column(&LegoSet::MODELS),
            model_name: naming.column_name(&Model::NAME),
            model_description: naming.column_name(&Model::DESCRIPTION),
        }
    }

    /// `(property, physical name)` pairs, for diagnostics
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("LegoSet (table)", self.set_table.clone()),
            ("LegoSet.id", self.set_id.clone()),
            ("LegoSet.name", self.set_name.clone()),
            ("LegoSet.intMinimumAge", self.set_min_age.clone()),
            ("LegoSet.intMaximumAge", self.set_max_age.clone()),
            ("Manual (table)", self.manual_table.clone()),
            ("LegoSet.manual (reverse column)", self.manual_set_ref.clone()),
            ("Manual.author", self.manual_author.clone()),
            ("Manual.text", self.manual_text.clone()),
            ("Model (table)", self.model_table.clone()),
            ("LegoSet.models (reverse column)", self.model_set_ref.clone()),
            ("LegoSet.models (key column)", self.model_key.clone()),
            ("Model.name", self.model_name.clone()),
            ("Model.description", self.model_description.clone()),
        ]
    }
}

/// Rendered statements for the aggregate
#[derive(Debug, Clone)]
pub struct LegoSetStatements {
    pub names: AggregateNames,

    pub upsert_set: String,
    pub select_set: String,
    pub select_set_ids: String,
    pub count_sets: String,
    pub max_set_id: String,
    pub delete_set: String,

    pub insert_manual: String,
    pub select_manual: String,
    pub delete_manual: String,

    /// Bind order for `insert_model`
    pub model_values: Vec<ModelValue>,
    pub insert_model: String,
    pub select_models: String,
    pub delete_models: String,
}

impl LegoSetStatements {
    pub fn new(naming: &dyn NamingStrategy) -> Self {
        let names = AggregateNames::resolve(naming);
        let q = quote_ident;

        let set_table = q(&names.set_table);
        let set_id = q(&names.set_id);
        let set_name = q(&names.set_name);
        let set_min = q(&names.set_min_age);
        let set_max = q(&names.set_max_age);

        let upsert_set = format!(
            "INSERT INTO {set_table} ({set_id}, {set_name}, {set_min}, {set_max})
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT({set_id}) DO UPDATE SET
                {set_name} = excluded.{set_name},
                {set_min} = excluded.{set_min},
                {set_max} = excluded.{set_max}"
        );
        let select_set = format!(
            "SELECT {set_id}, {set_name}, {set_min}, {set_max} FROM {set_table} WHERE {set_id} = ?1"
        );
        let select_set_ids = format!("SELECT {set_id} FROM {set_table} ORDER BY {set_id}");
        let count_sets = format!("SELECT COUNT(*) FROM {set_table}");
        let max_set_id = format!("SELECT COALESCE(MAX({set_id}), 0) FROM {set_table}");
        let delete_set = format!("DELETE FROM {set_table} WHERE {set_id} = ?1");

        let manual_table = q(&names.manual_table);
        let manual_ref = q(&names.manual_set_ref);
        let manual_author = q(&names.manual_author);
        let manual_text = q(&names.manual_text);

        let insert_manual = format!(
            "INSERT INTO {manual_table} ({manual_ref}, {manual_author}, {manual_text}) VALUES (?1, ?2, ?3)"
        );
        let select_manual = format!(
            "SELECT rowid, {manual_ref}, {manual_author} FROM {manual_table} WHERE {manual_ref} = ?1"
        );
        let delete_manual = format!("DELETE FROM {manual_table} WHERE {manual_ref} = ?1");

        // The map key column may coincide with the model's own name column;
        // each physical column is written once.
        let mut model_columns: Vec<String> = Vec::new();
        let mut model_values = Vec::new();
        for (column, value) in [
            (&names.model_set_ref, ModelValue::SetId),
            (&names.model_key, ModelValue::Key),
            (&names.model_name, ModelValue::Name),
            (&names.model_description, ModelValue::Description),
        ] {
            if !model_columns.contains(column) {
                model_columns.push(column.clone());
                model_values.push(value);
            }
        }

        let model_table = q(&names.model_table);
        let model_ref = q(&names.model_set_ref);
        let model_key = q(&names.model_key);
        let model_name = q(&names.model_name);

        let insert_model = format!(
            "INSERT INTO {model_table} ({}) VALUES ({})",
            model_columns
                .iter()
                .map(|c| q(c))
                .collect::<Vec<_>>()
                .join(", "),
            (1..=model_columns.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", "),
        );
        let select_models = format!(
            "SELECT rowid, {model_key}, {model_name} FROM {model_table} WHERE {model_ref} = ?1 ORDER BY {model_key}"
        );
        let delete_models = format!("DELETE FROM {model_table} WHERE {model_ref} = ?1");

        Self {
            names,
            upsert_set,
            select_set,
            select_set_ids,
            count_sets,
            max_set_id,
            delete_set,
            insert_manual,
            select_manual,
            delete_manual,
            model_values,
            insert_model,
            select_models,
            delete_models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickstore_core::mapping::{AliasNamingStrategy, ColumnAliases, DefaultNamingStrategy};

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("max_age"), "\"max_age\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_standard_statements_use_aliases() {
        let naming = AliasNamingStrategy::new(ColumnAliases::standard());
        let statements = LegoSetStatements::new(&naming);

        assert!(statements.upsert_set.contains("\"min_age\""));
        assert!(statements.upsert_set.contains("\"max_age\""));
        assert!(statements.insert_manual.starts_with("INSERT INTO \"handbuch\" (\"handbuch_id\""));
        assert!(statements.select_models.contains("WHERE \"lego_set\" = ?1"));
    }

    #[test]
    fn test_key_column_shared_with_name_is_written_once() {
        let naming = AliasNamingStrategy::new(ColumnAliases::standard());
        let statements = LegoSetStatements::new(&naming);

        assert_eq!(
            statements.model_values,
            vec![ModelValue::SetId, ModelValue::Key, ModelValue::Description]
        );
        assert_eq!(
            statements.insert_model,
            "INSERT INTO \"model\" (\"lego_set\", \"name\", \"description\") VALUES (?1, ?2, ?3)"
        );
    }

    #[test]
    fn test_default_naming_keeps_separate_key_column() {
        let statements = LegoSetStatements::new(&DefaultNamingStrategy);

        assert_eq!(statements.names.model_key, "lego_set_key");
        assert_eq!(statements.names.manual_set_ref, "lego_set");
        assert_eq!(statements.model_values.len(), 4);
    }
}
