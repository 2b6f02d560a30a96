use brickstore_core::mapping::{
    to_snake_case, AliasNamingStrategy, ColumnAliases, DefaultNamingStrategy, EntityType,
    NamingStrategy, PersistentProperty,
};
use brickstore_core::{LegoSet, Manual, Model};
use proptest::prelude::*;
use std::sync::Arc;

fn standard() -> AliasNamingStrategy {
    AliasNamingStrategy::new(ColumnAliases::standard())
}

#[test]
fn test_lego_set_physical_names() {
    let naming = standard();

    assert_eq!(naming.table_name(&LegoSet::ENTITY), "lego_set");
    assert_eq!(naming.column_name(&LegoSet::ID), "id");
    assert_eq!(naming.column_name(&LegoSet::NAME), "name");
    assert_eq!(naming.column_name(&LegoSet::MINIMUM_AGE), "min_age");
    assert_eq!(naming.column_name(&LegoSet::MAXIMUM_AGE), "max_age");
}

#[test]
fn test_child_tables() {
    let naming = standard();

    assert_eq!(naming.table_name(&Manual::ENTITY), "handbuch");
    assert_eq!(naming.reverse_column_name(&LegoSet::MANUAL), "handbuch_id");
    assert_eq!(naming.table_name(&Model::ENTITY), "model");
    assert_eq!(naming.reverse_column_name(&LegoSet::MODELS), "lego_set");
    assert_eq!(naming.key_column(&LegoSet::MODELS), "name");
}

#[test]
fn test_empty_aliases_match_default_strategy() {
    let aliased = AliasNamingStrategy::new(ColumnAliases::empty());
    let default = DefaultNamingStrategy;

    for property in [
        LegoSet::MAXIMUM_AGE,
        LegoSet::MINIMUM_AGE,
        LegoSet::MANUAL,
        LegoSet::MODELS,
        Manual::TEXT,
    ] {
        assert_eq!(aliased.column_name(&property), default.column_name(&property));
        assert_eq!(
            aliased.reverse_column_name(&property),
            default.reverse_column_name(&property)
        );
        assert_eq!(aliased.key_column(&property), default.key_column(&property));
    }
}

#[test]
fn test_shared_across_threads() {
    let naming = Arc::new(standard());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let naming = naming.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|_| naming.column_name(&LegoSet::MAXIMUM_AGE))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().iter().all(|name| name == "max_age"));
    }
}

fn leak(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

proptest! {
    #[test]
    fn prop_snake_case_is_lowercase_and_idempotent(name in "[a-z][a-zA-Z0-9]{0,20}") {
        let snake = to_snake_case(&name);
        prop_assert_eq!(snake.to_lowercase(), snake.clone());
        prop_assert_eq!(to_snake_case(&snake), snake);
    }

    #[test]
    fn prop_unmapped_properties_fall_back(name in "[a-z][a-zA-Z]{0,15}") {
        prop_assume!(!["intMaximumAge", "intMinimumAge", "manual", "models"].contains(&name.as_str()));

        let owner = EntityType::new("LegoSet");
        let property = PersistentProperty::new(owner, leak(name.clone()));
        let naming = standard();

        prop_assert_eq!(naming.column_name(&property), to_snake_case(&name));
        prop_assert_eq!(naming.reverse_column_name(&property), "lego_set");
        prop_assert_eq!(naming.key_column(&property), "lego_set_key");
    }

    #[test]
    fn prop_resolution_is_repeatable(name in "[a-z][a-zA-Z]{0,15}") {
        let property = PersistentProperty::new(Model::ENTITY, leak(name));
        let naming = standard();

        let first = (
            naming.column_name(&property),
            naming.reverse_column_name(&property),
            naming.key_column(&property),
        );
        let second = (
            naming.column_name(&property),
            naming.reverse_column_name(&property),
            naming.key_column(&property),
        );
        prop_assert_eq!(first, second);
    }
}
