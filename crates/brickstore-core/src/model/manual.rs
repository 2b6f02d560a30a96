use crate::mapping::{EntityType, PersistentProperty};

/// Building instructions owned by a [`super::LegoSet`]
///
/// `id` mirrors the owning set's id and is never chosen independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manual {
    pub id: i64,
    pub author: String,
    pub text: String,
}

impl Manual {
    pub const ENTITY: EntityType = EntityType::new("Manual").with_table("handbuch");

    pub const AUTHOR: PersistentProperty = PersistentProperty::new(Self::ENTITY, "author");
    pub const TEXT: PersistentProperty = PersistentProperty::new(Self::ENTITY, "text");

    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: 0,
            author: author.into(),
            text: text.into(),
        }
    }
}
