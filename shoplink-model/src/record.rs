use crate::Category;
use serde::{Deserialize, Serialize};
use shoplink_types::{Identity, IdentityType};

/// Any synchronizable entity, tagged by its kind.
///
/// Controllers are selected by [`EntityRecord::identity_type`]; each one
/// accepts only its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum EntityRecord {
    Category(Category),
}

impl EntityRecord {
    /// The entity type this record belongs to.
    pub fn identity_type(&self) -> IdentityType {
        match self {
            Self::Category(_) => IdentityType::Category,
        }
    }

    /// The record's own identity.
    pub fn id(&self) -> &Identity {
        match self {
            Self::Category(c) => &c.id,
        }
    }

    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Self::Category(c) => Some(c),
        }
    }

    pub fn into_category(self) -> Option<Category> {
        match self {
            Self::Category(c) => Some(c),
        }
    }
}

impl From<Category> for EntityRecord {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}
