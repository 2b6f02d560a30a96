//! Shared state for one CLI invocation

use std::path::PathBuf;

use brickstore_core::config::{AggregateConfiguration, BrickstoreConfig};
use brickstore_core::events::IdSettingListener;
use brickstore_core::logging_facility;
use brickstore_core::Result;
use brickstore_store::{db, migrations, LegoSetRepository};
use rusqlite::Connection;

pub struct Context {
    pub conn: Connection,
    pub repo: LegoSetRepository,
}

impl Context {
    /// Load configuration, open the database and wire the repository
    ///
    /// Migrations are applied on every open, so `init` is optional. The id
    /// counter resumes after the highest stored id.
    pub fn open(db_override: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => BrickstoreConfig::load(path)?,
            None => BrickstoreConfig::default(),
        };
        logging_facility::init(config.logging.profile);

        let db_path = db_override.unwrap_or_else(|| config.database.path.clone());
        let mut conn = db::open(&db_path)?;
        migrations::apply_migrations(&mut conn)?;

        let stored = LegoSetRepository::new(&AggregateConfiguration::from_config(
            &config,
            IdSettingListener::new(),
        ));
        let last_id = stored.max_id(&conn)?;

        let wiring =
            AggregateConfiguration::from_config(&config, IdSettingListener::starting_after(last_id));

        Ok(Self {
            conn,
            repo: LegoSetRepository::new(&wiring),
        })
    }
}
