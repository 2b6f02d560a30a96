//! Embedded SQL migrations

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_lego_set_schema",
            sql: include_str!("../../migrations/001_lego_set_schema.sql"),
        },
        Migration {
            id: "002_model_lookup_index",
            sql: include_str!("../../migrations/002_model_lookup_index.sql"),
        },
    ]
}
