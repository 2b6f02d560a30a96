/// Mapping metadata for an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityType {
    type_name: &'static str,
    table: Option<&'static str>,
}

impl EntityType {
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            table: None,
        }
    }

    /// Pin the table name instead of deriving it from the type name
    pub const fn with_table(self, table: &'static str) -> Self {
        Self {
            type_name: self.type_name,
            table: Some(table),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table(&self) -> Option<&'static str> {
        self.table
    }
}

/// A logical property of an entity, named as in the domain model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistentProperty {
    owner: EntityType,
    name: &'static str,
}

impl PersistentProperty {
    pub const fn new(owner: EntityType, name: &'static str) -> Self {
        Self { owner, name }
    }

    pub fn owner(&self) -> &EntityType {
        &self.owner
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
