//! Application configuration and component wiring
//!
//! [`BrickstoreConfig`] is read from TOML. [`AggregateConfiguration`] turns it
//! into the components the store consumes: the id-setting listener, the
//! alias naming strategy and the CLOB converter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::convert::{ClobToStringConverter, ConversionCustomizer, CustomConversions};
use crate::errors::{io_error, BrickstoreError, Result};
use crate::events::{EventPublisher, IdSettingListener};
use crate::logging_facility::Profile;
use crate::mapping::{AliasNamingStrategy, ColumnAliases, NamingStrategy};

pub const DEFAULT_DB_PATH: &str = ".brickstore/store.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

/// Top-level configuration file
///
/// ```toml
/// [database]
/// path = "sets.db"
///
/// [logging]
/// profile = "production"
///
/// [naming.column_aliases]
/// "lego_set.int_maximum_age" = "max_age"
///
/// [naming.reverse_column_aliases]
/// manual = "handbuch_id"
///
/// [naming.key_column_aliases]
/// models = "name"
/// ```
///
/// A missing `[naming]` section means the standard aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrickstoreConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub naming: ColumnAliases,
}

impl Default for BrickstoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            naming: ColumnAliases::standard(),
        }
    }
}

impl BrickstoreConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| BrickstoreError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.naming.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| io_error("load_config", e))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

/// The mapping components, built once and shared read-only
#[derive(Debug, Clone)]
pub struct AggregateConfiguration {
    id_setting: Arc<IdSettingListener>,
    naming: Arc<AliasNamingStrategy>,
    conversions: Arc<CustomConversions>,
    events: Arc<EventPublisher>,
}

impl AggregateConfiguration {
    /// Wiring with the standard aliases and a counter starting at 0
    pub fn standard() -> Self {
        Self::new(ColumnAliases::standard(), IdSettingListener::new())
    }

    pub fn from_config(config: &BrickstoreConfig, id_setting: IdSettingListener) -> Self {
        Self::new(config.naming.clone(), id_setting)
    }

    pub fn new(aliases: ColumnAliases, id_setting: IdSettingListener) -> Self {
        let id_setting = Arc::new(id_setting);

        let mut conversions = CustomConversions::new();
        Self::conversion_customizer().customize(&mut conversions);

        let events = EventPublisher::new().with_listener(id_setting.clone());

        Self {
            id_setting,
            naming: Arc::new(AliasNamingStrategy::new(aliases)),
            conversions: Arc::new(conversions),
            events: Arc::new(events),
        }
    }

    /// Replace the converter registry, e.g. to apply extra customizers
    pub fn with_conversions(mut self, conversions: CustomConversions) -> Self {
        self.conversions = Arc::new(conversions);
        self
    }

    /// Registers [`ClobToStringConverter`] for CLOB columns
    pub fn conversion_customizer() -> impl ConversionCustomizer {
        |conversions: &mut CustomConversions| {
            conversions.add_clob_converter(Arc::new(ClobToStringConverter));
        }
    }

    pub fn id_setting(&self) -> Arc<IdSettingListener> {
        self.id_setting.clone()
    }

    pub fn naming_strategy(&self) -> Arc<dyn NamingStrategy> {
        self.naming.clone()
    }

    pub fn conversions(&self) -> Arc<CustomConversions> {
        self.conversions.clone()
    }

    pub fn event_publisher(&self) -> Arc<EventPublisher> {
        self.events.clone()
    }
}
