use std::collections::BTreeMap;

use super::manual::Manual;
use crate::mapping::{EntityType, PersistentProperty};

/// LegoSet - the aggregate root
///
/// Owns an optional [`Manual`] and the set's [`Model`]s keyed by model name.
/// An `id` of 0 means "not yet assigned"; the id-setting listener fills it
/// in on first save.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegoSet {
    pub id: i32,
    pub name: String,
    /// Minimum recommended age in years
    pub minimum_age: u32,
    /// Maximum recommended age in years
    pub maximum_age: u32,
    pub manual: Option<Manual>,
    pub models: BTreeMap<String, Model>,
}

impl LegoSet {
    pub const ENTITY: EntityType = EntityType::new("LegoSet");

    pub const ID: PersistentProperty = PersistentProperty::new(Self::ENTITY, "id");
    pub const NAME: PersistentProperty = PersistentProperty::new(Self::ENTITY, "name");
    pub const MINIMUM_AGE: PersistentProperty =
        PersistentProperty::new(Self::ENTITY, "intMinimumAge");
    pub const MAXIMUM_AGE: PersistentProperty =
        PersistentProperty::new(Self::ENTITY, "intMaximumAge");
    pub const MANUAL: PersistentProperty = PersistentProperty::new(Self::ENTITY, "manual");
    pub const MODELS: PersistentProperty = PersistentProperty::new(Self::ENTITY, "models");

    /// Create an unsaved set with no manual and no models
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age_range(mut self, minimum_age: u32, maximum_age: u32) -> Self {
        self.minimum_age = minimum_age;
        self.maximum_age = maximum_age;
        self
    }

    pub fn set_manual(&mut self, manual: Manual) {
        self.manual = Some(manual);
    }

    /// Add or replace the model stored under `name`
    pub fn add_model(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let model = Model::new(name, description);
        self.models.insert(model.name.clone(), model);
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// A buildable model contained in a set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub name: String,
    pub description: String,
}

impl Model {
    pub const ENTITY: EntityType = EntityType::new("Model");

    pub const NAME: PersistentProperty = PersistentProperty::new(Self::ENTITY, "name");
    pub const DESCRIPTION: PersistentProperty =
        PersistentProperty::new(Self::ENTITY, "description");

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
